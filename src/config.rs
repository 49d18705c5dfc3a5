//! Provides the dashboard [`Settings`]: built-in defaults, optionally
//! overridden by a TOML file.
//!

use color_eyre::{Result, eyre::eyre};
use config;
use log::*;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// How to invoke the diagnostics tool and which labels to scrape from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSettings {
    pub command: String,
    pub cpu_label: String,
    pub gpu_section: String,
    pub gpu_temp_label: String,
    pub gpu_fan_label: String,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            command: "sensors".to_string(),
            cpu_label: "Tctl:".to_string(),
            gpu_section: "amdgpu-pci".to_string(),
            gpu_temp_label: "edge:".to_string(),
            gpu_fan_label: "fan1:".to_string(),
        }
    }
}

/// Scale of each bar graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub bar_length: usize,
    pub cpu_temp_max: f64,
    pub gpu_temp_max: f64,
    pub gpu_fan_max: f64,
    pub ram_max: f64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            bar_length: 20,
            cpu_temp_max: 100.0,
            gpu_temp_max: 110.0,
            gpu_fan_max: 3300.0,
            ram_max: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub interval_ms: u64,
    pub sensors: SensorSettings,
    pub display: DisplaySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            sensors: SensorSettings::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl Settings {
    /// Defaults, or defaults overlaid with `file_path` when one is given.
    pub fn load(file_path: Option<PathBuf>) -> Result<Settings> {
        let settings = match file_path {
            Some(path) => Self::load_from_file(path)?,
            None => Settings::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(eyre!("interval_ms must be greater than zero"));
        }
        if self.display.bar_length == 0 {
            return Err(eyre!("display.bar_length must be greater than zero"));
        }
        if self.sensors.command.trim().is_empty() {
            return Err(eyre!("sensors.command must not be empty"));
        }
        let maxima = [
            ("cpu_temp_max", self.display.cpu_temp_max),
            ("gpu_temp_max", self.display.gpu_temp_max),
            ("gpu_fan_max", self.display.gpu_fan_max),
            ("ram_max", self.display.ram_max),
        ];
        for (name, max) in maxima {
            if !max.is_finite() || max < 0.0 {
                return Err(eyre!(
                    "display.{} must be a finite number >= 0, got {}",
                    name,
                    max
                ));
            }
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn load_from_file(file_path: PathBuf) -> Result<Settings> {
        info!(target: "Config", "Loading settings from {:?}", file_path);
        let raw = config::Config::builder()
            .add_source(config::File::from(file_path).format(config::FileFormat::Toml))
            .build()?;
        Ok(raw.try_deserialize()?)
    }
}

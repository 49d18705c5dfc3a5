use std::{
    io,
    process::{ExitStatus, Stdio},
    string::FromUtf8Error,
};

use color_eyre::eyre::eyre;
use log::*;
use tokio::process::Command;

use crate::config::SensorSettings;

pub mod parse;

pub use parse::{GpuStats, SensorReadings};

/// Why the diagnostics tool produced no usable output this cycle.
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("{0} is not installed")]
    NotInstalled(String),
    #[error("failed to run sensors command: {0}")]
    Spawn(#[source] io::Error),
    #[error("sensors command failed: {0}")]
    Exit(ExitStatus),
    #[error("sensors output is not UTF-8: {0}")]
    Encoding(#[source] FromUtf8Error),
}

/// Runs the diagnostics tool and scrapes its report.
#[derive(Debug)]
pub struct SensorReader {
    program: String,
    args: Vec<String>,
    settings: SensorSettings,
    available: Option<bool>,
}

impl SensorReader {
    pub fn new(settings: &SensorSettings) -> color_eyre::Result<Self> {
        let strings = shlex::split(&settings.command).ok_or(eyre!("Bad command string"))?;
        let (program, args) = strings
            .split_first()
            .ok_or(eyre!("Must specify a sensors command"))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            settings: settings.clone(),
            available: None,
        })
    }

    /// Invoke the tool once and return its standard output.
    pub async fn read(&self) -> Result<String, SensorError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => SensorError::NotInstalled(self.program.clone()),
                _ => SensorError::Spawn(err),
            })?;
        if !output.status.success() {
            return Err(SensorError::Exit(output.status));
        }
        String::from_utf8(output.stdout).map_err(SensorError::Encoding)
    }

    /// Read and parse in one go. Any failure leaves every reading absent.
    pub async fn sample(&mut self) -> SensorReadings {
        match self.read().await {
            Ok(text) => {
                if self.available != Some(true) {
                    info!(target: "Sensors", "Reading sensors from {:?}", self.program);
                }
                self.available = Some(true);
                SensorReadings::parse(&text, &self.settings)
            }
            Err(err) => {
                if self.available == Some(false) {
                    debug!(target: "Sensors", "{}", err);
                } else {
                    warn!(target: "Sensors", "Sensors unavailable: {}", err);
                }
                self.available = Some(false);
                SensorReadings::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(command: &str) -> SensorReader {
        let settings = SensorSettings {
            command: command.to_string(),
            ..SensorSettings::default()
        };
        SensorReader::new(&settings).unwrap()
    }

    #[test]
    fn command_is_split_like_a_shell() {
        let r = reader("sensors -A 'k10temp-pci-00c3'");
        assert_eq!(r.program, "sensors");
        assert_eq!(r.args, vec!["-A", "k10temp-pci-00c3"]);
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        let settings = SensorSettings {
            command: "sensors 'oops".to_string(),
            ..SensorSettings::default()
        };
        assert!(SensorReader::new(&settings).is_err());
    }

    #[tokio::test]
    async fn missing_tool_is_not_installed() {
        let r = reader("shellstats-no-such-sensors-tool");
        let err = r.read().await.unwrap_err();
        assert!(matches!(err, SensorError::NotInstalled(_)), "{err:?}");
    }

    #[tokio::test]
    async fn missing_tool_degrades_to_absent_readings() {
        let mut r = reader("shellstats-no-such-sensors-tool");
        assert_eq!(r.sample().await, SensorReadings::default());
        assert_eq!(r.available, Some(false));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_tool_reports_its_exit_status() {
        let r = reader("sh -c 'exit 3'");
        let err = r.read().await.unwrap_err();
        match err {
            SensorError::Exit(status) => assert_eq!(status.code(), Some(3)),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_utf8_output_is_an_encoding_error() {
        let mut r = reader("printf 'Tctl: +4\\377°C\\n'");
        let err = r.read().await.unwrap_err();
        assert!(matches!(err, SensorError::Encoding(_)), "{err:?}");
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(r.sample().await, SensorReadings::default());
        assert_eq!(r.available, Some(false));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unlaunchable_tool_is_a_spawn_error() {
        let mut r = reader("/");
        let err = r.read().await.unwrap_err();
        assert!(matches!(err, SensorError::Spawn(_)), "{err:?}");
        assert!(err.to_string().starts_with("failed to run sensors command"));
        assert_eq!(r.sample().await, SensorReadings::default());
    }

    #[test]
    fn error_messages() {
        let err = SensorError::NotInstalled("sensors".to_string());
        assert_eq!(err.to_string(), "sensors is not installed");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stub_tool_output_is_parsed() {
        let mut r = reader("printf 'k10temp-pci-00c3\\nTctl:         +51.25°C\\n'");
        let readings = r.sample().await;
        assert_eq!(readings.cpu_temp, Some(51.25));
        assert_eq!(readings.gpu, GpuStats::default());
        assert_eq!(r.available, Some(true));
    }
}

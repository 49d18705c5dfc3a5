//! Scrapes readings out of the text report printed by `sensors`.
//!
//! ```"not rust"
//! k10temp-pci-00c3
//! Adapter: PCI adapter
//! Tctl:         +45.6°C
//!
//! amdgpu-pci-0300
//! Adapter: PCI adapter
//! fan1:        1234 RPM  (min =    0 RPM, max = 3300 RPM)
//! edge:         +40.0°C  (crit = +100.0°C, hyst = -273.1°C)
//! ```
//!
//! Every lookup returns `None` rather than failing when a label is missing or
//! a number is malformed.

use crate::config::SensorSettings;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GpuStats {
    pub temperature: Option<f64>,
    pub fan: Option<u32>,
}

/// Everything one report yields.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SensorReadings {
    pub cpu_temp: Option<f64>,
    pub gpu: GpuStats,
}

impl SensorReadings {
    pub fn parse(text: &str, labels: &SensorSettings) -> Self {
        Self {
            cpu_temp: cpu_temperature(text, labels),
            gpu: gpu_stats(text, labels),
        }
    }
}

/// The first line labelled as the CPU temperature.
pub fn cpu_temperature(text: &str, labels: &SensorSettings) -> Option<f64> {
    text.lines()
        .find(|line| line.trim_start().starts_with(&labels.cpu_label))
        .and_then(temperature)
}

/// Temperature and fan speed, looked up only from the GPU section marker on.
pub fn gpu_stats(text: &str, labels: &SensorSettings) -> GpuStats {
    let mut stats = GpuStats::default();
    let mut in_section = false;
    for line in text.lines() {
        if line.contains(&labels.gpu_section) {
            in_section = true;
        }
        if !in_section {
            continue;
        }
        let trimmed = line.trim_start();
        if trimmed.starts_with(&labels.gpu_temp_label) {
            stats.temperature = temperature(line);
        }
        if trimmed.starts_with(&labels.gpu_fan_label) {
            stats.fan = fan_speed(trimmed, &labels.gpu_fan_label);
        }
        if stats.temperature.is_some() && stats.fan.is_some() {
            break;
        }
    }
    stats
}

/// The signed decimal between the first `+` and the degree sign.
fn temperature(line: &str) -> Option<f64> {
    let (_, rest) = line.split_once('+')?;
    let (number, _) = rest.split_once('°')?;
    number.trim().parse().ok()
}

/// The first token after `label`. Fractional speeds are truncated.
fn fan_speed(line: &str, label: &str) -> Option<u32> {
    let token = line.strip_prefix(label)?.split_whitespace().next()?;
    token
        .parse::<u32>()
        .ok()
        .or_else(|| token.parse::<f64>().ok().filter(|v| *v >= 0.0).map(|v| v as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
k10temp-pci-00c3
Adapter: PCI adapter
Tctl:         +45.6°C
Tccd1:        +38.2°C

nvme-pci-0100
Adapter: PCI adapter
Composite:    +33.9°C  (low  = -273.1°C, high = +81.8°C)

amdgpu-pci-0300
Adapter: PCI adapter
vddgfx:      825.00 mV
fan1:        1234 RPM  (min =    0 RPM, max = 3300 RPM)
edge:         +40.0°C  (crit = +100.0°C, hyst = -273.1°C)
junction:     +42.0°C  (crit = +110.0°C, hyst = -273.1°C)
";

    fn labels() -> SensorSettings {
        SensorSettings::default()
    }

    #[test]
    fn full_report() {
        let readings = SensorReadings::parse(REPORT, &labels());
        assert_eq!(readings.cpu_temp, Some(45.6));
        assert_eq!(readings.gpu.temperature, Some(40.0));
        assert_eq!(readings.gpu.fan, Some(1234));
    }

    #[test]
    fn no_gpu_section() {
        let text = "k10temp-pci-00c3\nTctl:         +45.6°C\nedge:  +99.0°C\nfan1: 900 RPM\n";
        assert_eq!(gpu_stats(text, &labels()), GpuStats::default());
        assert_eq!(cpu_temperature(text, &labels()), Some(45.6));
    }

    #[test]
    fn gpu_labels_before_the_marker_are_ignored() {
        let text = "edge: +99.0°C\namdgpu-pci-0300\nedge: +41.5°C\n";
        let stats = gpu_stats(text, &labels());
        assert_eq!(stats.temperature, Some(41.5));
        assert_eq!(stats.fan, None);
    }

    #[test]
    fn stops_once_both_gpu_fields_are_found() {
        let text = "amdgpu-pci-0300\nfan1: 1000 RPM\nedge: +50.0°C\nfan1: 2000 RPM\nedge: +60.0°C\n";
        let stats = gpu_stats(text, &labels());
        assert_eq!(stats.temperature, Some(50.0));
        assert_eq!(stats.fan, Some(1000));
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_eq!(cpu_temperature("tctl: +45.0°C\n", &labels()), None);
    }

    #[test]
    fn label_must_start_the_line() {
        assert_eq!(cpu_temperature("xTctl: +45.0°C\n", &labels()), None);
        assert_eq!(cpu_temperature("    Tctl: +45.0°C\n", &labels()), Some(45.0));
    }

    #[test]
    fn malformed_values_are_absent() {
        assert_eq!(cpu_temperature("Tctl: 45.0°C\n", &labels()), None);
        assert_eq!(cpu_temperature("Tctl: +45.0C\n", &labels()), None);
        assert_eq!(cpu_temperature("Tctl: +hot°C\n", &labels()), None);
        let stats = gpu_stats("amdgpu-pci\nfan1: N/A\nedge: +°C\n", &labels());
        assert_eq!(stats, GpuStats::default());
    }

    #[test]
    fn fractional_fan_speed_is_truncated() {
        let stats = gpu_stats("amdgpu-pci\nfan1: 1500.7 RPM\n", &labels());
        assert_eq!(stats.fan, Some(1500));
    }

    #[test]
    fn fan_value_directly_after_the_label() {
        let stats = gpu_stats("amdgpu-pci\nfan1:1800 RPM\n", &labels());
        assert_eq!(stats.fan, Some(1800));
    }

    #[test]
    fn fan_label_with_spaces() {
        let labels = SensorSettings {
            gpu_section: "nvidia".to_string(),
            gpu_fan_label: "Fan Speed:".to_string(),
            ..SensorSettings::default()
        };
        let stats = gpu_stats("nvidia-gpu\nFan Speed: 1800 RPM\n", &labels);
        assert_eq!(stats.fan, Some(1800));
    }

    #[test]
    fn custom_labels() {
        let labels = SensorSettings {
            cpu_label: "Package id 0:".to_string(),
            gpu_section: "nouveau-pci".to_string(),
            gpu_temp_label: "temp1:".to_string(),
            ..SensorSettings::default()
        };
        let text = "coretemp-isa-0000\nPackage id 0:  +62.0°C  (high = +80.0°C)\n\nnouveau-pci-0100\nfan1: 2100 RPM\ntemp1: +55.0°C\n";
        let readings = SensorReadings::parse(text, &labels);
        assert_eq!(readings.cpu_temp, Some(62.0));
        assert_eq!(readings.gpu.temperature, Some(55.0));
        assert_eq!(readings.gpu.fan, Some(2100));
    }

    #[test]
    fn empty_report() {
        assert_eq!(SensorReadings::parse("", &labels()), SensorReadings::default());
    }
}

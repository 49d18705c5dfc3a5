use std::time::Instant;

use crate::{metrics::HostReading, metrics::rate::Counters, sensors::SensorReadings};

/// Everything gathered in one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: Instant,
    pub cpu_temp: Option<f64>,
    pub gpu_temp: Option<f64>,
    pub gpu_fan: Option<u32>,
    pub ram_percent: f64,
    pub counters: Counters,
}

impl Sample {
    pub(crate) fn new(timestamp: Instant, sensors: SensorReadings, host: HostReading) -> Self {
        Self {
            timestamp,
            cpu_temp: sensors.cpu_temp,
            gpu_temp: sensors.gpu.temperature,
            gpu_fan: sensors.gpu.fan,
            ram_percent: host.ram_percent,
            counters: host.counters,
        }
    }
}

use color_eyre::eyre::{Result, eyre};
use log::*;
use sysinfo::{Networks, System};

pub mod rate;
pub mod sample;

pub use rate::{Counters, Rates};
pub use sample::Sample;

/// One reading of the OS-level counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostReading {
    pub ram_percent: f64,
    pub counters: Counters,
}

/// Source of memory utilization and cumulative network counters.
///
/// Errors here are fatal to the dashboard: without a baseline there is
/// nothing to compute rates against.
pub trait HostMetrics {
    fn read(&mut self) -> Result<HostReading>;
}

/// [`HostMetrics`] backed by `sysinfo`.
#[derive(Debug)]
pub struct SystemMetrics {
    sys: System,
    networks: Networks,
}

impl SystemMetrics {
    pub fn new() -> Self {
        let networks = Networks::new_with_refreshed_list();
        debug!(target: "Metrics", "Watching {} network interfaces", networks.list().len());
        Self {
            sys: System::new(),
            networks,
        }
    }
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl HostMetrics for SystemMetrics {
    fn read(&mut self) -> Result<HostReading> {
        self.sys.refresh_memory();
        let ram_percent = memory_percent(self.sys.total_memory(), self.sys.available_memory())
            .ok_or(eyre!("memory information unavailable"))?;

        self.networks.refresh(true);
        let counters = self
            .networks
            .list()
            .values()
            .fold(Counters::default(), |acc, data| Counters {
                sent: acc.sent.saturating_add(data.total_transmitted()),
                received: acc.received.saturating_add(data.total_received()),
            });
        trace!(target: "Metrics", "RAM {:.1}% {:?}", ram_percent, counters);

        Ok(HostReading {
            ram_percent,
            counters,
        })
    }
}

/// Share of memory in use, `None` when the total is unknown.
fn memory_percent(total: u64, available: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let used = total.saturating_sub(available);
    Some(used as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_percent_of_known_total() {
        assert_eq!(memory_percent(1000, 250), Some(75.0));
        assert_eq!(memory_percent(1000, 1000), Some(0.0));
    }

    #[test]
    fn memory_percent_never_exceeds_full() {
        assert_eq!(memory_percent(1000, 2000), Some(0.0));
        assert_eq!(memory_percent(1000, 0), Some(100.0));
    }

    #[test]
    fn unknown_total_is_unavailable() {
        assert_eq!(memory_percent(0, 0), None);
    }

    #[test]
    fn system_reading_is_within_bounds() {
        let mut metrics = SystemMetrics::new();
        if let Ok(reading) = metrics.read() {
            assert!((0.0..=100.0).contains(&reading.ram_percent));
        }
    }
}

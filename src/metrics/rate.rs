use log::*;

/// Cumulative bytes moved across all interfaces.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub sent: u64,
    pub received: u64,
}

/// Bytes moved during one interval, per direction.
///
/// A direction is `None` when its counter went backwards, which happens when
/// an interface disappears or a counter is reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rates {
    pub upload: Option<u64>,
    pub download: Option<u64>,
}

impl Counters {
    /// Difference from `previous`. Elapsed time is not taken into account.
    pub fn delta(&self, previous: &Counters) -> Rates {
        let rates = Rates {
            upload: self.sent.checked_sub(previous.sent),
            download: self.received.checked_sub(previous.received),
        };
        if rates.upload.is_none() || rates.download.is_none() {
            warn!(
                target: "Metrics",
                "Network counters went backwards: {:?} -> {:?}", previous, self
            );
        }
        rates
    }
}

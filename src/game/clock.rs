//! Hazard Cadence
//!
//! The hazard check runs once per period of elapsed time. The clock only
//! counts; whoever owns it decides where elapsed time comes from (a tokio
//! interval in the server, plain numbers in tests).

use std::time::Duration;

/// Shortest period accepted; anything smaller is raised to this.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Accumulates elapsed time and reports how many checks are due.
#[derive(Clone, Debug)]
pub struct HazardClock {
    period: Duration,
    carried: Duration,
}

impl HazardClock {
    /// Create a clock firing once per `period`.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            carried: Duration::ZERO,
        }
    }

    /// Configured period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time accumulated toward the next check.
    pub fn carried(&self) -> Duration {
        self.carried
    }

    /// Add `elapsed` and return how many whole periods completed.
    ///
    /// The remainder carries over to the next call.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.carried = self.carried.saturating_add(elapsed);
        let due = self.carried.as_nanos() / self.period.as_nanos();
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        self.carried = self.carried.saturating_sub(self.period.saturating_mul(due));
        due
    }
}

impl Default for HazardClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::HAZARD_INTERVAL_MS))
    }
}

//! Politeness delay between requests.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random pause taken before each request except the first one of the
/// process. A `Nap` without a range never sleeps.
pub struct Nap {
    range: Option<(u64, u64)>,
    first_call: bool,
    rng: StdRng,
}

impl Nap {
    /// Nap for a whole number of seconds drawn uniformly from `[min, max]`.
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            range: Some((min_secs.min(max_secs), min_secs.max(max_secs))),
            first_call: true,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            range: None,
            first_call: true,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn range(&self) -> Option<(u64, u64)> {
        self.range
    }

    /// How long to wait before the request about to be made.
    ///
    /// Returns `None` for the first request and when napping is disabled.
    pub fn next_delay(&mut self) -> Option<Duration> {
        let first = std::mem::replace(&mut self.first_call, false);
        if first {
            return None;
        }
        let (min, max) = self.range?;
        Some(Duration::from_secs(self.rng.random_range(min..=max)))
    }

    /// Block the current thread for the next delay, if any.
    pub fn take(&mut self) {
        if let Some(delay) = self.next_delay() {
            log::info!("Napping for {} seconds.", delay.as_secs());
            std::thread::sleep(delay);
        }
    }
}

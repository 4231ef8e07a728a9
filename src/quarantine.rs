//! Quarantine cohort bookkeeping.
//!
//! Every day a population admits the individuals it newly infected as a single cohort. The cohort
//! is filed under its *release day*, the day on which it leaves quarantine and becomes fully
//! infectious. Until then only the `leak` fraction of the cohort transmits. Cohorts shrink each
//! day at the same recovery and death rates as the bulk infected compartment, whether or not they
//! have been released.
//!
//! Cohorts are kept in insertion order. Because release days are assigned in increasing order
//! this is also release-day order, and it fixes the summation order of [`QuarantineSchedule::active`]
//! so that results are reproducible to the last bit.

use crate::log::{trace, warn};
use indexmap::IndexMap;

/// The release day of the cohort present when a population is created.
pub const SEED_RELEASE_DAY: u64 = 0;

/// The longest quarantine a population may be built with, one hundred years.
pub const MAX_QUARANTINE_LENGTH: u64 = 36_500;

/// Maps release days to the (real valued) size of the still living cohort released on that day.
#[derive(Clone, Debug)]
pub struct QuarantineSchedule {
    cohorts: IndexMap<u64, f64>,
    leak: f64,
    length: u64,
}

impl QuarantineSchedule {
    /// Creates a schedule holding a single seed cohort of size `seed` released on day 0.
    #[must_use]
    pub fn new(seed: f64, leak: f64, length: u64) -> Self {
        let mut cohorts = IndexMap::new();
        cohorts.insert(SEED_RELEASE_DAY, seed);
        QuarantineSchedule {
            cohorts,
            leak,
            length,
        }
    }

    /// Proportion of a cohort that transmits before its release day.
    #[must_use]
    pub fn leak(&self) -> f64 {
        self.leak
    }

    /// Number of days between infection and release.
    #[must_use]
    pub fn length(&self) -> u64 {
        self.length
    }

    /// The number of cohorts, released or not, that are being tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }

    /// The size of the cohort released on `release_day`, if one was admitted.
    #[must_use]
    pub fn cohort(&self, release_day: u64) -> Option<f64> {
        self.cohorts.get(&release_day).copied()
    }

    /// Iterates over `(release_day, size)` pairs in admission order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.cohorts.iter().map(|(day, size)| (*day, *size))
    }

    /// The combined size of all cohorts.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.cohorts.values().sum()
    }

    /// Number of infected that transmit on `day`: released cohorts count in full, cohorts still
    /// in quarantine count only in proportion to the leak.
    #[must_use]
    pub fn active(&self, day: u64) -> f64 {
        let mut active = 0.0_f64;
        for (&release_day, &size) in &self.cohorts {
            if release_day <= day {
                active += size;
            } else {
                active += size * self.leak;
            }
        }
        active
    }

    /// Removes the recovered (`gamma`) and dead (`mu`) fractions from every cohort currently in
    /// the schedule.
    pub fn age(&mut self, gamma: f64, mu: f64) {
        for size in self.cohorts.values_mut() {
            *size += -(gamma * *size) - (mu * *size);
        }
    }

    /// Files a cohort infected on `day` under release day `day + length`, saturating at `u64::MAX`.
    ///
    /// An existing cohort with the same release day is replaced, not merged, and its size is
    /// returned. The replaced cohort keeps its position in the iteration order.
    pub fn admit(&mut self, day: u64, size: f64) -> Option<f64> {
        let release_day = day.saturating_add(self.length);
        trace!("admitting cohort of {size} released on day {release_day}");
        let replaced = self.cohorts.insert(release_day, size);
        if let Some(previous) = replaced {
            warn!("cohort of {previous} released on day {release_day} was overwritten by {size}");
        }
        replaced
    }
}

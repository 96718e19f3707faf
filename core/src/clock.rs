//! Reference clock — the fixed "now" every timestamp is measured against.
//!
//! The anchor comes from the run config, never from the wall clock, so a
//! run is a pure function of (seed, target rows, anchor).

use crate::{
    error::{GenError, GenResult},
    rng::SimRng,
};
use chrono::{Duration, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceClock {
    pub now: NaiveDateTime,
}

impl ReferenceClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    pub fn days_ago(&self, days: i64) -> NaiveDateTime {
        self.now - Duration::days(days)
    }

    /// Uniform timestamp, whole seconds, in [start, end].
    pub fn between(&self, start: NaiveDateTime, end: NaiveDateTime, rng: &mut SimRng) -> NaiveDateTime {
        let span = (end - start).num_seconds().max(0);
        start + Duration::seconds(rng.range_inclusive(0, span))
    }

    /// Uniform timestamp between `from_days` and `to_days` before now.
    pub fn within_days_ago(&self, from_days: i64, to_days: i64, rng: &mut SimRng) -> NaiveDateTime {
        self.between(self.days_ago(from_days), self.days_ago(to_days), rng)
    }
}

/// Uniform calendar date in [start, end].
pub fn date_between(start: NaiveDate, end: NaiveDate, rng: &mut SimRng) -> NaiveDate {
    let span = (end - start).num_days().max(0);
    start + Duration::days(rng.range_inclusive(0, span))
}

/// Same calendar day `years` earlier; Feb 29 falls back to Feb 28.
pub fn years_before(date: NaiveDate, years: u32) -> GenResult<NaiveDate> {
    date.checked_sub_months(Months::new(years * 12))
        .ok_or_else(|| GenError::InvalidConfig {
            reason: format!("{date} minus {years} years is out of range"),
        })
}

pub fn years_after(date: NaiveDate, years: u32) -> GenResult<NaiveDate> {
    date.checked_add_months(Months::new(years * 12))
        .ok_or_else(|| GenError::InvalidConfig {
            reason: format!("{date} plus {years} years is out of range"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> ReferenceClock {
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        ReferenceClock::new(now)
    }

    #[test]
    fn within_days_ago_stays_in_window() {
        let clock = clock();
        let mut rng = SimRng::new(1);
        for _ in 0..1_000 {
            let ts = clock.within_days_ago(90, 5, &mut rng);
            assert!(ts >= clock.days_ago(90) && ts <= clock.days_ago(5));
        }
    }

    #[test]
    fn leap_day_shift() {
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            years_before(leap, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
    }
}

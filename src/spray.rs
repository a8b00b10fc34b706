//! Spray treatments: instantaneous vector mortality applied at scheduled
//! days of the season.

use serde::{Deserialize, Serialize};

use crate::dynamics::{State, INFECTED, SUSCEPTIBLE};
use crate::error::VecdynError;

/// One application of a treatment killing the fraction `mortality` of
/// both vector classes. Host prevalence and accumulated yield are
/// untouched; the state jump is discontinuous.
#[derive(Debug, Clone, Copy)]
pub struct SprayEvent {
    pub mortality: f64,
}

impl SprayEvent {
    /// Returns the post-spray state `(D, (1-m)S, (1-m)I, Y)`.
    #[must_use]
    pub fn apply(&self, state: &State) -> State {
        let survival = 1.0 - self.mortality;
        let mut next = *state;
        next[SUSCEPTIBLE] *= survival;
        next[INFECTED] *= survival;
        next
    }
}

/// The ordered set of days a treatment is applied, with one mortality
/// fraction applied uniformly at every scheduled day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpraySchedule {
    pub days: Vec<f64>,
    pub mortality: f64,
}

impl SpraySchedule {
    #[must_use]
    pub fn new(days: Vec<f64>, mortality: f64) -> SpraySchedule {
        SpraySchedule { days, mortality }
    }

    /// The untreated schedule: no applications at all.
    #[must_use]
    pub fn none() -> SpraySchedule {
        SpraySchedule {
            days: Vec::new(),
            mortality: 0.0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[must_use]
    pub fn event(&self) -> SprayEvent {
        SprayEvent {
            mortality: self.mortality,
        }
    }

    /// Checks the schedule against a season of length `season_length`:
    /// days strictly increasing, each inside `(0, season_length)`, and
    /// mortality in `(0, 1)`. An empty schedule is always valid.
    pub fn validate(&self, season_length: f64) -> Result<(), VecdynError> {
        if self.days.is_empty() {
            return Ok(());
        }
        if !self.mortality.is_finite() || self.mortality <= 0.0 || self.mortality >= 1.0 {
            return Err(VecdynError::InvalidParameter(format!(
                "spray_mortality must lie in (0, 1), got {}",
                self.mortality
            )));
        }
        let mut previous = 0.0;
        for &day in &self.days {
            if !day.is_finite() || day <= 0.0 || day >= season_length {
                return Err(VecdynError::EventOutOfRange(format!(
                    "spray day {day} outside the season (0, {season_length})"
                )));
            }
            if day <= previous {
                return Err(VecdynError::EventOutOfRange(format!(
                    "spray days must be strictly increasing, got {day} after {previous}"
                )));
            }
            previous = day;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn mortality_scales_both_vector_classes() {
        let event = SprayEvent { mortality: 0.5 };
        let after = event.apply(&[0.3, 0.44, 0.08, 0.91]);
        assert_eq!(after[SUSCEPTIBLE], 0.22);
        assert_eq!(after[INFECTED], 0.04);
    }

    #[test]
    fn host_state_and_yield_are_untouched() {
        let event = SprayEvent { mortality: 0.9 };
        let before = [0.3, 0.44, 0.08, 0.91];
        let after = event.apply(&before);
        assert_eq!(after[crate::dynamics::DISEASED], before[crate::dynamics::DISEASED]);
        assert_eq!(after[crate::dynamics::YIELD], before[crate::dynamics::YIELD]);
        // 90% mortality leaves a tenth of each vector class.
        assert!((after[SUSCEPTIBLE] - 0.044).abs() < 1e-15);
        assert!((after[INFECTED] - 0.008).abs() < 1e-15);
    }

    #[test]
    fn empty_schedule_is_always_valid() {
        SpraySchedule::none().validate(150.0).unwrap();
    }

    #[test]
    fn rejects_day_outside_season() {
        let schedule = SpraySchedule::new(vec![14.0, 150.0], 0.9);
        let error = schedule.validate(150.0).unwrap_err();
        assert!(matches!(error, VecdynError::EventOutOfRange(_)));
    }

    #[test]
    fn rejects_day_zero() {
        let schedule = SpraySchedule::new(vec![0.0], 0.9);
        assert!(schedule.validate(150.0).is_err());
    }

    #[test]
    fn rejects_unsorted_days() {
        let schedule = SpraySchedule::new(vec![21.0, 14.0], 0.9);
        let error = schedule.validate(150.0).unwrap_err();
        assert!(error.to_string().contains("strictly increasing"));
    }

    #[test]
    fn rejects_duplicate_days() {
        let schedule = SpraySchedule::new(vec![14.0, 14.0], 0.9);
        assert!(schedule.validate(150.0).is_err());
    }

    #[test]
    fn rejects_mortality_outside_unit_interval() {
        for mortality in [0.0, 1.0, 1.2, f64::NAN] {
            let schedule = SpraySchedule::new(vec![14.0], mortality);
            let error = schedule.validate(150.0).unwrap_err();
            assert!(matches!(error, VecdynError::InvalidParameter(_)));
        }
    }
}

//! Treated vs. untreated comparison runs.

use crate::error::VecdynError;
use crate::log::info;
use crate::parameters::Parameters;
use crate::simulator::{simulate, Trajectory};
use crate::spray::SpraySchedule;

/// The two season trajectories produced from one parameter set: one
/// under the configured spray schedule, one never sprayed.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub treated: Trajectory,
    pub untreated: Trajectory,
}

impl ScenarioOutcome {
    /// Final-season yield under the configured schedule.
    #[must_use]
    pub fn yield_treated(&self) -> f64 {
        self.treated.final_yield()
    }

    /// Final-season yield with no sprays at all.
    #[must_use]
    pub fn yield_untreated(&self) -> f64 {
        self.untreated.final_yield()
    }
}

/// Runs the simulator twice over identical parameters, initial state and
/// time grid — once with the configured spray schedule and once with the
/// empty schedule — and returns both trajectories.
///
/// The two runs are independent and share only immutable inputs.
pub fn run_scenario(parameters: &Parameters) -> Result<ScenarioOutcome, VecdynError> {
    let grid = parameters.output_grid();
    let initial = parameters.initial_state();

    info!(
        "running treated scenario: {} spray day(s), mortality {}",
        parameters.spray_days.len(),
        parameters.spray_mortality
    );
    let treated = simulate(initial, parameters, &grid, &parameters.spray_schedule())?;

    info!("running untreated scenario");
    let untreated = simulate(initial, parameters, &grid, &SpraySchedule::none())?;

    Ok(ScenarioOutcome { treated, untreated })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn treatment_outyields_no_treatment() {
        let outcome = run_scenario(&Parameters::default()).unwrap();
        assert!(
            outcome.yield_treated() > outcome.yield_untreated(),
            "treated {} <= untreated {}",
            outcome.yield_treated(),
            outcome.yield_untreated()
        );
        for value in [outcome.yield_treated(), outcome.yield_untreated()] {
            assert!(value > 0.0 && value <= 1.0, "yield {value} outside (0, 1]");
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let parameters = Parameters::default();
        let first = run_scenario(&parameters).unwrap();
        let second = run_scenario(&parameters).unwrap();
        assert_eq!(first.treated, second.treated);
        assert_eq!(first.untreated, second.untreated);
    }

    #[test]
    fn trajectories_end_at_the_season_boundary() {
        let parameters = Parameters::default();
        let outcome = run_scenario(&parameters).unwrap();
        assert_eq!(
            outcome.treated.final_sample().time,
            parameters.season_length
        );
        assert_eq!(
            outcome.untreated.final_sample().time,
            parameters.season_length
        );
    }
}

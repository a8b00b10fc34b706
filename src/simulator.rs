//! Event-driven season integration.
//!
//! A run validates all inputs, then alternates continuous integration
//! with instantaneous spray events: the solver integrates up to each
//! breakpoint (output sample or spray day), the spray transform is
//! applied exactly at its scheduled instant, and integration resumes
//! from the post-event state with a fresh step-size controller.

use serde::{Deserialize, Serialize};

use crate::dynamics::{State, VectorDiseaseDynamics, DISEASED, INFECTED, SUSCEPTIBLE, YIELD};
use crate::error::VecdynError;
use crate::log::debug;
use crate::parameters::Parameters;
use crate::solver::Rk45;
use crate::spray::SpraySchedule;

/// One sampled point of a season trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub diseased: f64,
    pub susceptible: f64,
    pub infected: f64,
    pub relative_yield: f64,
}

impl Sample {
    fn from_state(time: f64, state: &State) -> Sample {
        Sample {
            time,
            diseased: state[DISEASED],
            susceptible: state[SUSCEPTIBLE],
            infected: state[INFECTED],
            relative_yield: state[YIELD],
        }
    }
}

/// The ordered `(time, state)` samples produced by one run; times are
/// strictly increasing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The state at the end of the season.
    #[must_use]
    pub fn final_sample(&self) -> &Sample {
        self.samples.last().expect("a trajectory is never empty")
    }

    /// The cumulative relative yield at the end of the season.
    #[must_use]
    pub fn final_yield(&self) -> f64 {
        self.final_sample().relative_yield
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

struct Breakpoint {
    time: f64,
    spray: bool,
}

/// Integrates the season dynamics from `initial` over `grid`, applying
/// the spray schedule at its scheduled days.
///
/// The trajectory is sampled at every grid point plus every spray day;
/// spray days are mandatory integration breakpoints, never interpolated
/// over. The sample recorded at a spray day is the pre-spray left limit;
/// the post-spray state seeds the next segment. The last grid point
/// defines the season end, and the schedule must fall strictly inside
/// the season.
///
/// Identical inputs always produce identical trajectories.
pub fn simulate(
    initial: State,
    parameters: &Parameters,
    grid: &[f64],
    schedule: &SpraySchedule,
) -> Result<Trajectory, VecdynError> {
    parameters.validate()?;
    validate_grid(grid)?;
    validate_initial(&initial)?;
    let season_end = *grid.last().expect("validated grid is non-empty");
    schedule.validate(season_end)?;

    let breakpoints = merge_breakpoints(grid, &schedule.days);
    let dynamics = VectorDiseaseDynamics::new(parameters);
    let event = schedule.event();

    let mut state = initial;
    let mut t = grid[0];
    let mut samples = Vec::with_capacity(breakpoints.len() + 1);
    samples.push(Sample::from_state(t, &state));

    for breakpoint in &breakpoints {
        // A fresh solver per segment: the discontinuity at a spray day
        // must not feed the step-size controller of the next segment.
        let mut solver = Rk45::default();
        state = solver.integrate(&dynamics, t, &state, breakpoint.time)?;
        samples.push(Sample::from_state(breakpoint.time, &state));
        if breakpoint.spray {
            state = event.apply(&state);
            debug!(
                "spray on day {}: vector density {:.6} -> {:.6}",
                breakpoint.time,
                samples.last().expect("sample just pushed").susceptible
                    + samples.last().expect("sample just pushed").infected,
                state[SUSCEPTIBLE] + state[INFECTED],
            );
        }
        t = breakpoint.time;
    }

    Ok(Trajectory { samples })
}

fn validate_grid(grid: &[f64]) -> Result<(), VecdynError> {
    if grid.len() < 2 {
        return Err(VecdynError::InvalidParameter(format!(
            "time grid needs at least a start and an end point, got {} point(s)",
            grid.len()
        )));
    }
    if grid[0] != 0.0 {
        return Err(VecdynError::InvalidParameter(format!(
            "time grid must start at 0, got {}",
            grid[0]
        )));
    }
    for pair in grid.windows(2) {
        if !pair[1].is_finite() || pair[1] <= pair[0] {
            return Err(VecdynError::InvalidParameter(format!(
                "time grid must be strictly increasing, got {} after {}",
                pair[1], pair[0]
            )));
        }
    }
    Ok(())
}

fn validate_initial(initial: &State) -> Result<(), VecdynError> {
    if !initial[DISEASED].is_finite() || !(0.0..=1.0).contains(&initial[DISEASED]) {
        return Err(VecdynError::InvalidParameter(format!(
            "initial diseased proportion must lie in [0, 1], got {}",
            initial[DISEASED]
        )));
    }
    for (name, value) in [
        ("susceptible vector density", initial[SUSCEPTIBLE]),
        ("infected vector density", initial[INFECTED]),
        ("yield integral", initial[YIELD]),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(VecdynError::InvalidParameter(format!(
                "initial {name} must be non-negative and finite, got {value}"
            )));
        }
    }
    Ok(())
}

/// Merges spray days into the output grid; both inputs are validated
/// strictly increasing, and every spray day lies inside the grid span.
/// A spray day coinciding with a grid point yields one breakpoint.
fn merge_breakpoints(grid: &[f64], spray_days: &[f64]) -> Vec<Breakpoint> {
    let mut breakpoints = Vec::with_capacity(grid.len() - 1 + spray_days.len());
    let mut sprays = spray_days.iter().copied().peekable();
    for &time in &grid[1..] {
        while sprays.peek().is_some_and(|&day| day < time) {
            breakpoints.push(Breakpoint {
                time: sprays.next().expect("peeked spray day"),
                spray: true,
            });
        }
        let spray_here = sprays.peek().is_some_and(|&day| day == time);
        if spray_here {
            sprays.next();
        }
        breakpoints.push(Breakpoint {
            time,
            spray: spray_here,
        });
    }
    debug_assert!(sprays.peek().is_none(), "spray day beyond the season end");
    breakpoints
}

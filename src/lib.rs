//! A simulator for vector-borne plant pathogen dynamics under spray
//! interventions
//!
//! Vecdyn models the coupled dynamics of a plant pathogen, the insect
//! vector population spreading it, and host-plant disease prevalence
//! over one growing season, together with the relative yield lost to
//! infection. Pesticide sprays enter as instantaneous mortality events
//! at scheduled days, and a season can be compared treated vs.
//! untreated to put a number on whether spraying pays.
//!
//! The pieces fit together as follows:
//! * [`parameters`] holds the immutable configuration of a run — model
//!   rates, yield-curve shape, initial state, season layout and spray
//!   schedule — with validation that runs before any numerical work.
//! * [`dynamics`] defines the right-hand side of the four-variable ODE
//!   system, and [`yield_curve`] the per-capita yield of a plant as a
//!   function of its day of infection.
//! * [`solver`] integrates any [`solver::OdeSystem`] with an adaptive
//!   embedded Runge–Kutta pair.
//! * [`simulator`] drives the solver over the season, treating spray
//!   days as mandatory breakpoints where the [`spray`] transform is
//!   applied exactly.
//! * [`scenario`] runs the treated and untreated seasons from one
//!   parameter set; [`report`] writes trajectories as CSV and
//!   [`economics`] turns the two final yields into a dollars
//!   comparison.

pub mod dynamics;
pub mod economics;
pub mod error;
pub mod log;
pub mod parameters;
pub mod report;
pub mod scenario;
pub mod simulator;
pub mod solver;
pub mod spray;
pub mod yield_curve;

pub use crate::error::VecdynError;
pub use crate::log::{debug, error, info, trace, warn};
pub use crate::parameters::{Parameters, ParametersBuilder};
pub use crate::scenario::{run_scenario, ScenarioOutcome};
pub use crate::simulator::{simulate, Sample, Trajectory};
pub use crate::spray::{SprayEvent, SpraySchedule};

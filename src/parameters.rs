//! Run configuration: model rates, yield-curve shape, initial state,
//! season layout and the spray schedule.
//!
//! A `Parameters` value is immutable for the duration of a run. Builder
//! defaults describe the reference barley scenario; a JSON file can
//! override any subset of fields.

use std::fs;
use std::path::Path;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::dynamics::State;
use crate::error::VecdynError;
use crate::spray::SpraySchedule;

#[derive(Serialize, Deserialize, Clone, Debug, Builder)]
#[serde(default)]
pub struct Parameters {
    /// Host infection rate per unit of infected-vector density (a).
    #[builder(default = "0.2")]
    pub transmission_rate: f64,

    /// Per-capita vector death rate (delta).
    #[builder(default = "0.003")]
    pub vector_death_rate: f64,

    /// Rate at which virus-free vectors acquire the pathogen from
    /// diseased hosts (lambda).
    #[builder(default = "0.2")]
    pub acquisition_rate: f64,

    /// Relative vector preference for infected hosts (rho+). 1.0 means
    /// no preference.
    #[builder(default = "1.0")]
    pub infected_host_preference: f64,

    /// Relative vector preference for uninfected hosts (rho-). 1.0 means
    /// no preference.
    #[builder(default = "1.0")]
    pub healthy_host_preference: f64,

    /// Vector birth rate on healthy hosts (b).
    #[builder(default = "0.1015")]
    pub birth_rate_healthy: f64,

    /// Vector birth rate on diseased hosts (b_i).
    #[builder(default = "0.07")]
    pub birth_rate_diseased: f64,

    /// Constant vector immigration rate (IM).
    #[builder(default = "0.01")]
    pub immigration_rate: f64,

    /// Shape exponent of the yield curve (k).
    #[builder(default = "1.68453")]
    pub yield_shape: f64,

    /// Half-maximal-time parameter of the yield curve (alpha).
    #[builder(default = "511.15")]
    pub yield_half_time: f64,

    /// Proportion of hosts diseased at season start (D0).
    #[builder(default = "0.0")]
    pub initial_diseased: f64,

    /// Virus-free vector density at season start, relative to the
    /// disease-free carrying capacity (S0).
    #[builder(default = "0.01")]
    pub initial_susceptible: f64,

    /// Infected vector density at season start (I0).
    #[builder(default = "0.0001")]
    pub initial_infected: f64,

    /// Cumulative relative yield at season start (Y0).
    #[builder(default = "1.0")]
    pub initial_yield: f64,

    /// Season length in days (L).
    #[builder(default = "150.0")]
    pub season_length: f64,

    /// Spacing of trajectory output samples, in days.
    #[builder(default = "1.0")]
    pub output_interval: f64,

    /// Days on which a spray treatment is applied; strictly increasing,
    /// each inside `(0, season_length)`.
    #[builder(default = "vec![14.0, 21.0, 28.0]")]
    pub spray_days: Vec<f64>,

    /// Fraction of vectors killed by one application (m).
    #[builder(default = "0.9")]
    pub spray_mortality: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        ParametersBuilder::default().build().unwrap()
    }
}

impl Parameters {
    /// Loads and validates parameters from a JSON file. Missing fields
    /// fall back to the reference-scenario defaults.
    pub fn from_json_file(path: &Path) -> Result<Parameters, VecdynError> {
        let raw = fs::read_to_string(path)?;
        let parameters: Parameters = serde_json::from_str(&raw)?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Checks every positivity and range invariant. Runs before any
    /// numerical work so malformed scenarios never reach the solver.
    pub fn validate(&self) -> Result<(), VecdynError> {
        let positive = [
            ("transmission_rate", self.transmission_rate),
            ("vector_death_rate", self.vector_death_rate),
            ("acquisition_rate", self.acquisition_rate),
            ("infected_host_preference", self.infected_host_preference),
            ("healthy_host_preference", self.healthy_host_preference),
            ("birth_rate_healthy", self.birth_rate_healthy),
            ("birth_rate_diseased", self.birth_rate_diseased),
            ("immigration_rate", self.immigration_rate),
            ("yield_shape", self.yield_shape),
            ("yield_half_time", self.yield_half_time),
            ("season_length", self.season_length),
            ("output_interval", self.output_interval),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(VecdynError::nonpositive_parameter(name, value));
            }
        }

        if !self.initial_diseased.is_finite()
            || !(0.0..=1.0).contains(&self.initial_diseased)
        {
            return Err(VecdynError::InvalidParameter(format!(
                "initial_diseased must lie in [0, 1], got {}",
                self.initial_diseased
            )));
        }
        let nonnegative = [
            ("initial_susceptible", self.initial_susceptible),
            ("initial_infected", self.initial_infected),
            ("initial_yield", self.initial_yield),
        ];
        for (name, value) in nonnegative {
            if !value.is_finite() || value < 0.0 {
                return Err(VecdynError::InvalidParameter(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }

        self.spray_schedule().validate(self.season_length)
    }

    /// The state vector `[D, S, I, Y]` at season start.
    #[must_use]
    pub fn initial_state(&self) -> State {
        [
            self.initial_diseased,
            self.initial_susceptible,
            self.initial_infected,
            self.initial_yield,
        ]
    }

    /// The configured treatment schedule.
    #[must_use]
    pub fn spray_schedule(&self) -> SpraySchedule {
        SpraySchedule::new(self.spray_days.clone(), self.spray_mortality)
    }

    /// Output sample times `0, Δ, 2Δ, …` ending exactly at
    /// `season_length`; strictly increasing.
    #[must_use]
    pub fn output_grid(&self) -> Vec<f64> {
        let mut grid = Vec::new();
        let mut step = 0u64;
        let mut t = 0.0;
        while t < self.season_length {
            grid.push(t);
            step += 1;
            t = step as f64 * self.output_interval;
        }
        grid.push(self.season_length);
        grid
    }
}

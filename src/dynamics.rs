//! Right-hand side of the coupled host–vector–yield system.
//!
//! Four quantities evolve jointly over a season: the proportion of hosts
//! diseased, the densities of virus-free and infected vectors (scaled to
//! the disease-free carrying capacity), and the cumulative relative
//! yield integral.

use crate::parameters::Parameters;
use crate::solver::OdeSystem;
use crate::yield_curve::relative_yield;

/// Proportion of hosts diseased (D).
pub const DISEASED: usize = 0;
/// Virus-free vector density (S).
pub const SUSCEPTIBLE: usize = 1;
/// Infected vector density (I).
pub const INFECTED: usize = 2;
/// Cumulative relative yield integral (Y).
pub const YIELD: usize = 3;

pub const STATE_DIM: usize = 4;

/// The state vector `[D, S, I, Y]`.
pub type State = [f64; STATE_DIM];

/// The season dynamics for one immutable parameter set.
///
/// Pure `(t, state) -> derivative`; all tunables come from the borrowed
/// [`Parameters`], never from captured mutable state.
pub struct VectorDiseaseDynamics<'a> {
    params: &'a Parameters,
}

impl<'a> VectorDiseaseDynamics<'a> {
    #[must_use]
    pub fn new(params: &'a Parameters) -> VectorDiseaseDynamics<'a> {
        VectorDiseaseDynamics { params }
    }
}

impl OdeSystem<STATE_DIM> for VectorDiseaseDynamics<'_> {
    fn rhs(&self, t: f64, y: &State, dydt: &mut State) {
        let p = self.params;
        let diseased = y[DISEASED];
        let susceptible = y[SUSCEPTIBLE];
        let infected = y[INFECTED];
        let total = susceptible + infected;

        // Vector preference weights the contact-rate denominators.
        // `1 - D + D*rho` stays strictly positive for validated
        // parameters (rho > 0, D in [0, 1]).
        let new_infections = p.transmission_rate * (1.0 - diseased) * infected
            / (1.0 - diseased + diseased * p.infected_host_preference);
        let acquisition = p.acquisition_rate * diseased * p.healthy_host_preference
            / (1.0 - diseased + diseased * p.healthy_host_preference);

        // Logistic births blended between healthy- and diseased-host
        // rates by prevalence. T(1-T) goes negative when total density
        // exceeds the carrying capacity; the model does not clamp it.
        let births = (p.birth_rate_healthy * (1.0 - diseased)
            + p.birth_rate_diseased * diseased)
            * total
            * (1.0 - total);

        dydt[DISEASED] = new_infections;
        dydt[SUSCEPTIBLE] = births - p.vector_death_rate * susceptible
            - acquisition * susceptible
            + p.immigration_rate;
        dydt[INFECTED] = acquisition * susceptible - p.vector_death_rate * infected
            + p.immigration_rate;
        // Yield is lost at the rate new infections arrive, weighted by
        // the shortfall of a plant infected on day t.
        dydt[YIELD] = (relative_yield(t, p.yield_half_time, p.yield_shape) - 1.0)
            * new_infections;
    }
}

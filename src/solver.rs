//! Adaptive embedded Runge–Kutta integration.
//!
//! The integrator is the Dormand–Prince 5(4) pair: a fifth-order
//! solution with an embedded fourth-order estimate whose difference
//! drives step-size control. The dynamics are supplied through the
//! [`OdeSystem`] trait so the model definition carries no solver state
//! and the integrator is swappable.

use crate::error::VecdynError;

/// A system of ordinary differential equations with `N` state variables.
///
/// Implement this trait for your model to provide the right-hand side
/// `dy/dt = f(t, y)`. The integrator repeatedly calls `rhs` with the
/// current time and state and expects the derivative written into
/// `dydt`. Implementations must be pure: no captured mutable state, the
/// same `(t, y)` always producing the same derivative.
pub trait OdeSystem<const N: usize> {
    fn rhs(&self, t: f64, y: &[f64; N], dydt: &mut [f64; N]);
}

/// Absolute and relative local error targets for the adaptive stepper.
#[derive(Debug, Clone, Copy)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Tolerances {
    pub fn new(abs: f64, rel: f64) -> Result<Tolerances, VecdynError> {
        if !abs.is_finite() || abs <= 0.0 {
            return Err(VecdynError::nonpositive_parameter("abs tolerance", abs));
        }
        if !rel.is_finite() || rel <= 0.0 {
            return Err(VecdynError::nonpositive_parameter("rel tolerance", rel));
        }
        Ok(Tolerances { abs, rel })
    }
}

impl Default for Tolerances {
    // Well inside the 1e-6 local-error contract of the simulator.
    fn default() -> Self {
        Tolerances {
            abs: 1e-8,
            rel: 1e-8,
        }
    }
}

/// Counters describing the work done by an integration.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolverStats {
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub fn_evals: usize,
}

// Hard ceiling on step attempts per integration call. Generously above
// anything a season-length segment needs; exhausting it is reported as
// divergence rather than looping forever.
const MAX_STEPS: usize = 1_000_000;

const SAFETY: f64 = 0.9;
const MIN_SCALE: f64 = 0.2;
const MAX_SCALE: f64 = 5.0;

// Dormand & Prince (1980) 5(4) tableau. The last `A` row equals `B`, so
// the seventh stage evaluates the right-hand side at the accepted
// solution and seeds the next step (first-same-as-last).
const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];
#[rustfmt::skip]
const A: [[f64; 6]; 7] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [19372.0 / 6561.0, -25360.0 / 2187.0, 64448.0 / 6561.0, -212.0 / 729.0, 0.0, 0.0],
    [9017.0 / 3168.0, -355.0 / 33.0, 46732.0 / 5247.0, 49.0 / 176.0, -5103.0 / 18656.0, 0.0],
    [35.0 / 384.0, 0.0, 500.0 / 1113.0, 125.0 / 192.0, -2187.0 / 6784.0, 11.0 / 84.0],
];
const B: [f64; 7] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
    0.0,
];
const B_HAT: [f64; 7] = [
    5179.0 / 57600.0,
    0.0,
    7571.0 / 16695.0,
    393.0 / 640.0,
    -92097.0 / 339200.0,
    187.0 / 2100.0,
    1.0 / 40.0,
];

/// Adaptive Dormand–Prince 5(4) integrator.
///
/// One value integrates one continuous segment; the step-size controller
/// starts fresh on every call, so discontinuous state jumps between
/// segments never feed the controller.
pub struct Rk45 {
    tolerances: Tolerances,
    pub stats: SolverStats,
}

impl Default for Rk45 {
    fn default() -> Self {
        Rk45::new(Tolerances::default())
    }
}

impl Rk45 {
    #[must_use]
    pub fn new(tolerances: Tolerances) -> Rk45 {
        Rk45 {
            tolerances,
            stats: SolverStats::default(),
        }
    }

    /// Integrates `system` from `(t0, y0)` to exactly `t_end`.
    ///
    /// The final step is clamped to land on `t_end`; the endpoint is
    /// never interpolated over. Fails with `SolverDivergence` if the
    /// step budget is exhausted, the step size underflows, or any state
    /// component stops being finite.
    pub fn integrate<const N: usize, S: OdeSystem<N>>(
        &mut self,
        system: &S,
        t0: f64,
        y0: &[f64; N],
        t_end: f64,
    ) -> Result<[f64; N], VecdynError> {
        let span = t_end - t0;
        if span < 0.0 {
            return Err(VecdynError::InvalidParameter(format!(
                "integration interval runs backwards: {t0} -> {t_end}"
            )));
        }
        if span == 0.0 {
            return Ok(*y0);
        }

        let min_step = span * 1e-14;
        let mut t = t0;
        let mut y = *y0;
        let mut h = span / 100.0;
        let mut k = [[0.0; N]; 7];

        system.rhs(t, &y, &mut k[0]);
        self.stats.fn_evals += 1;

        let mut attempts = 0;
        while t < t_end {
            attempts += 1;
            if attempts > MAX_STEPS {
                return Err(VecdynError::divergence(t, "step budget exhausted"));
            }
            let last = t_end - t <= h;
            if last {
                h = t_end - t;
            } else if h < min_step {
                return Err(VecdynError::divergence(t, "step size underflow"));
            }

            // Stages 2..7. The stage-7 state is the fifth-order solution
            // because the last `A` row equals `B`.
            let mut y_stage = [0.0; N];
            for stage in 1..7 {
                for i in 0..N {
                    let mut increment = 0.0;
                    for j in 0..stage {
                        increment += A[stage][j] * k[j][i];
                    }
                    y_stage[i] = y[i] + h * increment;
                }
                system.rhs(t + C[stage] * h, &y_stage, &mut k[stage]);
            }
            self.stats.fn_evals += 6;
            let y_new = y_stage;

            // Mixed absolute/relative error norm of the embedded pair.
            let mut error_norm_sq = 0.0;
            for i in 0..N {
                let mut difference = 0.0;
                for stage in 0..7 {
                    difference += (B[stage] - B_HAT[stage]) * k[stage][i];
                }
                let scale = self.tolerances.abs
                    + self.tolerances.rel * y[i].abs().max(y_new[i].abs());
                error_norm_sq += (h * difference / scale).powi(2);
            }
            let error = (error_norm_sq / N as f64).sqrt();

            if !error.is_finite() || y_new.iter().any(|value| !value.is_finite()) {
                return Err(VecdynError::divergence(t, "non-finite state"));
            }

            if error <= 1.0 {
                t = if last { t_end } else { t + h };
                y = y_new;
                k[0] = k[6];
                self.stats.accepted_steps += 1;
            } else {
                self.stats.rejected_steps += 1;
            }

            let scale = if error == 0.0 {
                MAX_SCALE
            } else {
                (SAFETY * error.powf(-0.2)).clamp(MIN_SCALE, MAX_SCALE)
            };
            h *= scale;
        }

        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Decay {
        rate: f64,
    }

    impl OdeSystem<1> for Decay {
        fn rhs(&self, _t: f64, y: &[f64; 1], dydt: &mut [f64; 1]) {
            dydt[0] = -self.rate * y[0];
        }
    }

    struct Logistic {
        growth: f64,
    }

    impl OdeSystem<1> for Logistic {
        fn rhs(&self, _t: f64, y: &[f64; 1], dydt: &mut [f64; 1]) {
            dydt[0] = self.growth * y[0] * (1.0 - y[0]);
        }
    }

    struct Orbit;

    impl OdeSystem<2> for Orbit {
        fn rhs(&self, _t: f64, y: &[f64; 2], dydt: &mut [f64; 2]) {
            dydt[0] = -y[1];
            dydt[1] = y[0];
        }
    }

    struct Blowup;

    impl OdeSystem<1> for Blowup {
        fn rhs(&self, _t: f64, y: &[f64; 1], dydt: &mut [f64; 1]) {
            dydt[0] = y[0] * y[0];
        }
    }

    struct Poisoned;

    impl OdeSystem<1> for Poisoned {
        fn rhs(&self, _t: f64, _y: &[f64; 1], dydt: &mut [f64; 1]) {
            dydt[0] = f64::NAN;
        }
    }

    #[test]
    fn exponential_decay_matches_closed_form() {
        let mut solver = Rk45::default();
        let y = solver
            .integrate(&Decay { rate: 0.5 }, 0.0, &[1.0], 10.0)
            .unwrap();
        let expected = (-0.5_f64 * 10.0).exp();
        assert!(
            (y[0] - expected).abs() < 1e-8,
            "got {}, expected {expected}",
            y[0]
        );
    }

    #[test]
    fn logistic_reaches_carrying_capacity() {
        let mut solver = Rk45::default();
        let y = solver
            .integrate(&Logistic { growth: 0.8 }, 0.0, &[0.01], 30.0)
            .unwrap();
        assert!((y[0] - 1.0).abs() < 1e-6, "got {}", y[0]);
    }

    #[test]
    fn circular_orbit_preserves_radius() {
        let mut solver = Rk45::default();
        let y = solver
            .integrate(&Orbit, 0.0, &[1.0, 0.0], std::f64::consts::TAU)
            .unwrap();
        let radius = y[0].hypot(y[1]);
        assert!((radius - 1.0).abs() < 1e-7, "radius {radius}");
    }

    #[test]
    fn empty_interval_returns_initial_state() {
        let mut solver = Rk45::default();
        let y = solver.integrate(&Orbit, 3.0, &[0.5, 0.5], 3.0).unwrap();
        assert_eq!(y, [0.5, 0.5]);
        assert_eq!(solver.stats.accepted_steps, 0);
    }

    #[test]
    fn backwards_interval_is_rejected() {
        let mut solver = Rk45::default();
        let error = solver.integrate(&Orbit, 1.0, &[1.0, 0.0], 0.0).unwrap_err();
        assert!(matches!(error, VecdynError::InvalidParameter(_)));
    }

    #[test]
    fn finite_time_blowup_is_surfaced() {
        // dy/dt = y^2 from y(0)=1 has a singularity at t=1; integrating
        // past it must fail loudly rather than return garbage.
        let mut solver = Rk45::default();
        let error = solver.integrate(&Blowup, 0.0, &[1.0], 2.0).unwrap_err();
        assert!(matches!(error, VecdynError::SolverDivergence { .. }));
    }

    #[test]
    fn non_finite_dynamics_are_surfaced() {
        let mut solver = Rk45::default();
        let error = solver.integrate(&Poisoned, 0.0, &[1.0], 1.0).unwrap_err();
        match error {
            VecdynError::SolverDivergence { time, .. } => assert_eq!(time, 0.0),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn stats_account_for_every_evaluation() {
        let mut solver = Rk45::default();
        solver
            .integrate(&Decay { rate: 1.0 }, 0.0, &[1.0], 5.0)
            .unwrap();
        let attempts = solver.stats.accepted_steps + solver.stats.rejected_steps;
        assert!(solver.stats.accepted_steps > 0);
        assert_eq!(solver.stats.fn_evals, 1 + 6 * attempts);
    }

    #[test]
    fn tolerances_must_be_positive() {
        assert!(Tolerances::new(0.0, 1e-6).is_err());
        assert!(Tolerances::new(1e-6, -1.0).is_err());
        assert!(Tolerances::new(1e-9, 1e-9).is_ok());
    }
}

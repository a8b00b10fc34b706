//! Dollar-space arithmetic over final-yield outcomes.
//!
//! Downstream of the numeric core: consumes the two final-yield scalars
//! a scenario produces, nothing else.

use serde::{Deserialize, Serialize};

use crate::scenario::ScenarioOutcome;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Economics {
    /// Market value of a full-yield crop, dollars per unit area.
    pub crop_value: f64,

    /// Cost of one spray application, dollars per unit area.
    pub spray_cost: f64,

    /// Season overhead independent of treatment, dollars per unit area.
    pub fixed_cost: f64,
}

impl Default for Economics {
    fn default() -> Self {
        Economics {
            crop_value: 500.0,
            spray_cost: 12.0,
            fixed_cost: 50.0,
        }
    }
}

impl Economics {
    /// Season margin for a given relative yield and number of sprays.
    #[must_use]
    pub fn gross_margin(&self, relative_yield: f64, n_sprays: usize) -> f64 {
        self.crop_value * relative_yield
            - self.spray_cost * n_sprays as f64
            - self.fixed_cost
    }

    /// Margin gained (or lost) by treating instead of not treating.
    #[must_use]
    pub fn net_benefit(&self, outcome: &ScenarioOutcome, n_sprays: usize) -> f64 {
        self.gross_margin(outcome.yield_treated(), n_sprays)
            - self.gross_margin(outcome.yield_untreated(), 0)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn margin_charges_each_application() {
        let economics = Economics::default();
        let no_sprays = economics.gross_margin(0.8, 0);
        let three_sprays = economics.gross_margin(0.8, 3);
        assert_eq!(no_sprays - three_sprays, 3.0 * economics.spray_cost);
    }

    #[test]
    fn full_yield_untreated_margin() {
        let economics = Economics {
            crop_value: 400.0,
            spray_cost: 10.0,
            fixed_cost: 25.0,
        };
        assert_eq!(economics.gross_margin(1.0, 0), 375.0);
    }
}

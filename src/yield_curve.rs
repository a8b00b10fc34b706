//! Per-capita relative yield of a host plant as a function of the day it
//! became infected.

/// Relative yield of a plant infected on season day `t`, in `[0, 1)`.
///
/// Saturating curve `t^k / (t^k + alpha)`: a plant infected at emergence
/// yields nothing, and the penalty fades the later in the season
/// infection arrives. Crosses 0.5 exactly at `t = alpha^(1/k)`.
///
/// Callers only evaluate at `t >= 0`; behavior for negative `t` is
/// undefined.
#[must_use]
pub fn relative_yield(t: f64, alpha: f64, k: f64) -> f64 {
    debug_assert!(t >= 0.0, "yield curve evaluated at negative time {t}");
    let tk = t.powf(k);
    tk / (tk + alpha)
}

//! Adaptive polynomial degree selection.
//!
//! When the caller does not request an explicit degree, the pipeline maps the
//! point count to a degree with a fixed policy:
//!
//! - `formula = n / 2`
//! - clamp to `[3, 7]`
//! - never exceed `n - 1` (a degree-d fit needs at least d+1 points)
//!
//! The policy is intentionally simple; there is no cross-validation or
//! residual-based stopping rule.

/// Lower clamp for the adaptive degree (when the point count allows it).
pub const MIN_DEGREE: usize = 3;

/// Upper clamp for the adaptive degree.
pub const MAX_DEGREE: usize = 7;

/// Select a polynomial degree for `num_points` samples.
///
/// The result never exceeds `num_points - 1` and never falls below
/// [`MIN_DEGREE`] unless too few points exist to allow it.
pub fn adaptive_degree(num_points: usize) -> usize {
    let formula_degree = num_points / 2;

    let feasible_max = MAX_DEGREE.min(num_points.saturating_sub(1));
    let effective_min = MIN_DEGREE.min(feasible_max);

    effective_min.max(formula_degree.min(feasible_max))
}

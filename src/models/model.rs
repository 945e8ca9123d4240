//! Polynomial evaluation and rendering.
//!
//! A fitted model is just its coefficient array in ascending power order
//! (`coeffs[i]` multiplies `x^i`). The reporting layer relies on two primitive
//! operations:
//!
//! - evaluate the polynomial at a score (for predictions/residuals)
//! - render the formula string (for the compiled document and reports)
//!
//! The rendered formula is a contract surface: downstream tools parse the
//! 12-decimal fixed format, so the precision policy here must not drift.

/// Coefficients with absolute value below this render as exactly zero.
const ZERO_SNAP: f64 = 1e-12;

/// Evaluate `Σ coeffs[i]·x^i` with a running power product.
///
/// Uses the same ascending-power convention as the moment sums in the fitter.
pub fn evaluate(coeffs: &[f64], x: f64) -> f64 {
    let mut acc = 0.0;
    let mut x_pow = 1.0;
    for &c in coeffs {
        acc += c * x_pow;
        x_pow *= x;
    }
    acc
}

/// Round to 2 decimal places, the convention for reported percentiles.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Render a coefficient at fixed 12-decimal precision.
///
/// Values below [`ZERO_SNAP`] in magnitude collapse to `0.000000000000` to
/// suppress floating-point noise near zero.
fn format_coeff(coeff: f64) -> String {
    if coeff.abs() < ZERO_SNAP {
        return "0.000000000000".to_string();
    }
    format!("{coeff:.12}")
}

/// Render the polynomial from the highest power down to the constant term.
///
/// The leading term keeps its own sign; subsequent terms are joined with
/// ` + ` / ` - ` and rendered as absolute values. Power 1 renders as `x`,
/// power 0 has no variable part.
pub fn format_polynomial(coeffs: &[f64]) -> String {
    let degree = coeffs.len().saturating_sub(1);
    let mut formula = String::new();

    for i in (0..=degree).rev() {
        let coeff = coeffs[i];

        if i == degree {
            formula.push_str(&format_coeff(coeff));
        } else if coeff >= 0.0 {
            formula.push_str(" + ");
            formula.push_str(&format_coeff(coeff));
        } else {
            formula.push_str(" - ");
            formula.push_str(&format_coeff(coeff.abs()));
        }

        match i {
            0 => {}
            1 => formula.push('x'),
            _ => formula.push_str(&format!("x^{i}")),
        }
    }

    formula
}

//! Polynomial curve fitting.
//!
//! Responsibilities:
//!
//! - build the least-squares normal equations from sample points
//! - solve them for the coefficient vector
//! - pick a polynomial degree from the point count when none is given

pub mod degree;
pub mod fitter;

pub use degree::*;
pub use fitter::*;

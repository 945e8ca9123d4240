//! Polynomial model primitives.
//!
//! Models are implemented as small, pure functions so that fitting and
//! reporting code can stay generic over the coefficient array.

pub mod model;

pub use model::*;

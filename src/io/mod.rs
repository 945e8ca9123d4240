//! Input/output helpers.
//!
//! - record directory scan + validation (`ingest`)
//! - compiled document read/write (`export`)
//! - record file renaming (`rename`)

pub mod export;
pub mod ingest;
pub mod rename;

pub use export::*;
pub use ingest::*;
pub use rename::*;

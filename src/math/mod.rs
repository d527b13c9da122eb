//! Mathematical utilities: the normal-equation solver and basic statistics.

pub mod linsolve;
pub mod stats;

pub use linsolve::*;
pub use stats::*;

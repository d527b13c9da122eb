//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - fit each model kind (`fitter`)
//! - compute goodness-of-fit metrics (`metrics`)
//! - run all fits and select the best model by R² (`selection`)

pub mod fitter;
pub mod metrics;
pub mod selection;

pub use fitter::*;
pub use metrics::*;
pub use selection::*;

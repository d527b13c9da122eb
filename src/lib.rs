//! `approx-fit` library crate.
//!
//! Least-squares approximation of 2-D point sets by six model families
//! (linear, quadratic, cubic, exponential, logarithmic, power), with quality
//! metrics and best-model selection by R².
//!
//! The binary (`approx`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the fitting engine is usable on its own (see [`fit::approximate`])

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;

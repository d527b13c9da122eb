//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the paired input observations (`SampleSet`)
//! - model kinds and fitted models (`ModelKind`, `FittedModel`)
//! - fit outputs (`QualityMetrics`, `Report`, `CurveFile`)
//! - run configuration (`FitConfig`, `SampleConfig`)

pub mod types;

pub use types::*;

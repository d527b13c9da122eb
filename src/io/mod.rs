//! Input/output helpers.
//!
//! - point ingest from text / CSV / manual entry (`ingest`)
//! - plain-text report saving (`export`)
//! - curve JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod ingest;

pub use curve::*;
pub use export::*;
pub use ingest::*;

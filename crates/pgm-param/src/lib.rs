#![deny(unsafe_code)]

//! Template parameterization engine.
//!
//! Turns a template object graph (fields marked free, fixed, or
//! excluded; relationships to further templates) into a flat set of
//! random variables bound to qualified attribute paths, plus the partial
//! assignment of the fixed fields. The result seeds a fully factorized
//! starting distribution or merges with other parameterizations.

pub mod engine;
pub mod error;
pub mod result;

pub use engine::Parameterizer;
pub use error::ParameterizeError;
pub use result::Parameterization;

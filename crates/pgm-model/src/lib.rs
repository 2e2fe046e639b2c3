#![deny(unsafe_code)]

//! Random variable and event model definitions.
//!
//! This crate holds the value types shared by the parameterization engine
//! and the circuit layer: scalar values, symbol sets, variable domains,
//! random variables, and simple events (partial assignments).

pub mod error;
pub mod event;
pub mod set;
pub mod value;
pub mod variable;

pub use error::ModelError;
pub use event::{EventValue, SimpleEvent};
pub use set::SymbolSet;
pub use value::{DomainKind, ScalarValue};
pub use variable::{RandomVariable, VariableDomain};

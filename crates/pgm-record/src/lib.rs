#![deny(unsafe_code)]

//! Structured-record introspection for template objects.
//!
//! A template object is a domain object whose fields carry markers
//! (free, fixed, excluded) or relationship edges instead of plain data.
//! This crate defines the record descriptor a template converts into and
//! the [`Record`] capability trait the conversion goes through, so the
//! parameterization engine never depends on reflection.

pub mod descriptor;
pub mod error;
pub mod template;

pub use descriptor::{Record, RecordDescriptor};
pub use error::MappingError;
pub use template::{FieldTemplate, TemplateField};

use thiserror::Error;

use pgm_circuit::CircuitError;
use pgm_model::{DomainKind, ModelError, ScalarValue};
use pgm_record::MappingError;

#[derive(Debug, Error)]
pub enum ParameterizeError {
    /// The record mapping layer rejected a template object.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// A declared domain was invalid for variable construction.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A fixed value does not lie in the field's declared domain.
    #[error("fixed value {value} for '{path}' is outside the declared {expected} domain")]
    TypeMismatch {
        path: String,
        expected: DomainKind,
        value: ScalarValue,
    },

    /// A template object was revisited while still on the active
    /// traversal path.
    #[error("cycle detected at '{path}': template object is already being traversed")]
    CycleDetected { path: String },

    /// Two parameterizations fix the same path to different values.
    #[error("conflicting fixed values for '{path}': {existing} vs {incoming}")]
    ConflictingAssignment {
        path: String,
        existing: ScalarValue,
        incoming: ScalarValue,
    },

    /// Two parameterizations declare the same path over different domains.
    #[error("conflicting domains for '{path}' during merge")]
    ConflictingDomains { path: String },

    /// Distribution construction was requested with zero variables.
    #[error("cannot build a distribution from an empty parameterization")]
    EmptyParameterization,

    /// Circuit construction failed downstream.
    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

pub type Result<T> = std::result::Result<T, ParameterizeError>;

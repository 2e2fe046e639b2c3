use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    #[error("cannot build a circuit over zero variables")]
    NoVariables,

    #[error("non-positive variance for variable '{name}'")]
    InvalidVariance { name: String },

    #[error("no assignment for variable '{name}' in likelihood query")]
    MissingAssignment { name: String },

    #[error("symbol '{symbol}' is outside the domain of variable '{name}'")]
    SymbolOutsideDomain { name: String, symbol: String },

    #[error("value kind does not match the domain of variable '{name}'")]
    KindMismatch { name: String },
}

pub type Result<T> = std::result::Result<T, CircuitError>;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag for a variable's domain.
///
/// Every random variable falls into one of three kinds, which determine
/// both the values it can take and the default leaf distribution it
/// receives in a fully factorized model:
/// - `Continuous`: real-valued observations
/// - `Integer`: whole-number observations
/// - `Symbolic`: observations drawn from a finite label set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainKind {
    /// Real-valued domain.
    Continuous,
    /// Whole-number domain.
    Integer,
    /// Finite label-set domain.
    Symbolic,
}

impl DomainKind {
    /// Returns the kind name as used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainKind::Continuous => "continuous",
            DomainKind::Integer => "integer",
            DomainKind::Symbolic => "symbolic",
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A concrete scalar observation bound to a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    /// A real value.
    Continuous(f64),
    /// A whole-number value.
    Integer(i64),
    /// A symbol label.
    Symbol(String),
}

impl ScalarValue {
    /// Returns the domain kind this value belongs to.
    pub fn kind(&self) -> DomainKind {
        match self {
            ScalarValue::Continuous(_) => DomainKind::Continuous,
            ScalarValue::Integer(_) => DomainKind::Integer,
            ScalarValue::Symbol(_) => DomainKind::Symbolic,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Continuous(v) => write!(f, "{v}"),
            ScalarValue::Integer(v) => write!(f, "{v}"),
            ScalarValue::Symbol(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Continuous(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Integer(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Symbol(value.to_string())
    }
}

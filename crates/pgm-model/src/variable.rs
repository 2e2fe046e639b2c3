use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ModelError;
use crate::set::SymbolSet;
use crate::value::{DomainKind, ScalarValue};

/// The declared domain of a random variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VariableDomain {
    /// All real values.
    Continuous,
    /// All whole numbers.
    Integer,
    /// A finite, non-empty label set.
    Symbolic(SymbolSet),
}

impl VariableDomain {
    /// Returns the kind tag for this domain.
    pub fn kind(&self) -> DomainKind {
        match self {
            VariableDomain::Continuous => DomainKind::Continuous,
            VariableDomain::Integer => DomainKind::Integer,
            VariableDomain::Symbolic(_) => DomainKind::Symbolic,
        }
    }

    /// Returns true if the value is a member of this domain.
    ///
    /// For continuous and integer domains this is a kind check; for
    /// symbolic domains the label must also be in the declared set.
    pub fn contains(&self, value: &ScalarValue) -> bool {
        match (self, value) {
            (VariableDomain::Continuous, ScalarValue::Continuous(_)) => true,
            (VariableDomain::Integer, ScalarValue::Integer(_)) => true,
            (VariableDomain::Symbolic(set), ScalarValue::Symbol(symbol)) => set.contains(symbol),
            _ => false,
        }
    }
}

/// A random variable keyed by its qualified path name.
///
/// Variable identity is the name: two variables with the same name refer
/// to the same position in an object graph. The domain carries the value
/// space the variable ranges over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomVariable {
    name: String,
    domain: VariableDomain,
}

impl RandomVariable {
    /// Creates a variable over an arbitrary domain.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptySymbolicDomain`] when the domain is
    /// symbolic with no labels.
    pub fn new(name: impl Into<String>, domain: VariableDomain) -> Result<Self, ModelError> {
        let name = name.into();
        if let VariableDomain::Symbolic(set) = &domain
            && set.is_empty()
        {
            return Err(ModelError::EmptySymbolicDomain { name });
        }
        Ok(Self { name, domain })
    }

    /// Creates a continuous variable.
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: VariableDomain::Continuous,
        }
    }

    /// Creates an integer variable.
    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: VariableDomain::Integer,
        }
    }

    /// Creates a symbolic variable over a label set.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptySymbolicDomain`] when the set is empty.
    pub fn symbolic(name: impl Into<String>, set: SymbolSet) -> Result<Self, ModelError> {
        Self::new(name, VariableDomain::Symbolic(set))
    }

    /// The qualified path name of this variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared domain of this variable.
    pub fn domain(&self) -> &VariableDomain {
        &self.domain
    }

    /// The kind tag of the declared domain.
    pub fn kind(&self) -> DomainKind {
        self.domain.kind()
    }
}

impl fmt::Display for RandomVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind())
    }
}

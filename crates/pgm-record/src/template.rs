//! Field markers for template objects.

use std::fmt;
use std::sync::Arc;

use pgm_model::{ScalarValue, VariableDomain};

use crate::descriptor::Record;

/// The per-field policy of a template object.
///
/// Each field of a template is exactly one of these variants. The first
/// three are scalar policies; the last two are relationship edges to
/// further template objects. `Excluded` applies to any field, scalar or
/// composite, and removes it from parameterization entirely.
#[derive(Clone)]
pub enum FieldTemplate {
    /// Scalar field, parameterized with no fixed value.
    Free(VariableDomain),
    /// Scalar field, parameterized and bound to a value.
    Fixed(VariableDomain, ScalarValue),
    /// Field contributes nothing and is never recursed into.
    Excluded,
    /// One-to-one relationship to a nested template object.
    Nested(Arc<dyn Record>),
    /// One-to-many relationship to an ordered collection of template objects.
    Many(Vec<Arc<dyn Record>>),
}

impl fmt::Debug for FieldTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free(domain) => f.debug_tuple("Free").field(domain).finish(),
            Self::Fixed(domain, value) => {
                f.debug_tuple("Fixed").field(domain).field(value).finish()
            }
            Self::Excluded => f.write_str("Excluded"),
            Self::Nested(_) => f.write_str("Nested(..)"),
            Self::Many(children) => write!(f, "Many({} records)", children.len()),
        }
    }
}

/// A named field of a record descriptor.
#[derive(Debug, Clone)]
pub struct TemplateField {
    /// Field name, unique within its record.
    pub name: String,
    /// The field's marker or relationship.
    pub template: FieldTemplate,
}

impl TemplateField {
    /// A free scalar field over the given domain.
    pub fn free(name: impl Into<String>, domain: VariableDomain) -> Self {
        Self {
            name: name.into(),
            template: FieldTemplate::Free(domain),
        }
    }

    /// A scalar field fixed to a value.
    pub fn fixed(
        name: impl Into<String>,
        domain: VariableDomain,
        value: impl Into<ScalarValue>,
    ) -> Self {
        Self {
            name: name.into(),
            template: FieldTemplate::Fixed(domain, value.into()),
        }
    }

    /// An excluded field.
    pub fn excluded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: FieldTemplate::Excluded,
        }
    }

    /// A one-to-one relationship field.
    pub fn nested(name: impl Into<String>, child: Arc<dyn Record>) -> Self {
        Self {
            name: name.into(),
            template: FieldTemplate::Nested(child),
        }
    }

    /// A one-to-many relationship field.
    pub fn many(name: impl Into<String>, children: Vec<Arc<dyn Record>>) -> Self {
        Self {
            name: name.into(),
            template: FieldTemplate::Many(children),
        }
    }
}

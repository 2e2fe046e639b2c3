//! Record descriptors and the introspection capability trait.

use std::collections::BTreeSet;

use crate::error::MappingError;
use crate::template::TemplateField;

/// The introspected shape of one template object.
///
/// `name` is the mapped record type name (the DAO-layer name, e.g.
/// `PositionDAO`) and roots the qualified paths of all variables derived
/// from this object. Fields are kept in declaration order; traversal
/// visits them in exactly this order.
#[derive(Debug, Clone)]
pub struct RecordDescriptor {
    /// Mapped record type name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<TemplateField>,
}

impl RecordDescriptor {
    /// Creates a descriptor from a record name and its fields.
    pub fn new(name: impl Into<String>, fields: Vec<TemplateField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Checks the mapping-layer contract.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UnnamedRecord`] for an empty record name,
    /// [`MappingError::InvalidFieldName`] for an empty field name or one
    /// containing the `.` path delimiter, and
    /// [`MappingError::DuplicateField`] when two fields share a name.
    /// Such names would produce colliding or ambiguous qualified paths,
    /// which is a contract violation of the record mapping, not a runtime
    /// policy.
    pub fn validate(&self) -> Result<(), MappingError> {
        if self.name.is_empty() {
            return Err(MappingError::UnnamedRecord);
        }
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if field.name.is_empty() || field.name.contains('.') {
                return Err(MappingError::InvalidFieldName {
                    record: self.name.clone(),
                    field: field.name.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(MappingError::DuplicateField {
                    record: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Capability trait for template objects: describe your fields and
/// relationships.
///
/// Every domain type that participates in parameterization provides its
/// own record mapping by implementing this trait; the engine never
/// inspects the object in any other way. Object identity for cycle
/// detection is the trait object's data pointer, so a template graph must
/// hand out the same allocation when two edges refer to the same object.
pub trait Record {
    /// Converts this template object into its structured record form.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] when the object cannot be introspected.
    fn describe(&self) -> Result<RecordDescriptor, MappingError>;
}

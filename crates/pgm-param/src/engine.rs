//! The template traversal engine.

use tracing::{debug, warn};

use pgm_model::RandomVariable;
use pgm_record::{FieldTemplate, MappingError, Record, RecordDescriptor};

use crate::error::{ParameterizeError, Result};
use crate::result::Parameterization;

/// Engine deriving random variables from a template object graph.
///
/// The engine walks a template depth-first in field declaration order,
/// creating one variable per included scalar field and recursing through
/// one-to-one and one-to-many relationships. Variable names are the
/// dot-joined qualified paths of the traversal, so results are
/// deterministic and merge-safe whenever two traversals start from
/// different root records.
///
/// Each call produces an independent [`Parameterization`]; the engine
/// holds no state between calls and concurrent calls on independent
/// templates need no coordination.
///
/// # Example
///
/// ```ignore
/// use pgm_param::Parameterizer;
///
/// let parameterization = Parameterizer::new().generate_parameterizations(&template)?;
/// for variable in parameterization.variables() {
///     println!("{variable}");
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Parameterizer;

impl Parameterizer {
    /// Creates a traversal engine.
    pub fn new() -> Self {
        Self
    }

    /// Derives the variables and partial assignment of a template object.
    ///
    /// The root qualified path is the root record's mapped name; nested
    /// paths append field names, and collection elements append their
    /// index as an extra segment.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterizeError::Mapping`] when a template cannot be
    /// introspected or a descriptor repeats a field name,
    /// [`ParameterizeError::TypeMismatch`] when a fixed value lies outside
    /// its declared domain, and [`ParameterizeError::CycleDetected`] when
    /// the object graph loops back onto the active traversal path.
    pub fn generate_parameterizations(&self, template: &dyn Record) -> Result<Parameterization> {
        let mut active = Vec::new();
        let mut result = Parameterization::new();
        self.parameterize_record(template, None, &mut active, &mut result)?;
        Ok(result)
    }

    /// Walks one record, splicing its variables into `result`.
    ///
    /// `prefix` is the qualified path this record is mounted at; the root
    /// record has none and is rooted at its own descriptor name.
    fn parameterize_record(
        &self,
        record: &dyn Record,
        prefix: Option<&str>,
        active: &mut Vec<usize>,
        result: &mut Parameterization,
    ) -> Result<()> {
        let identity = record_identity(record);
        if active.contains(&identity) {
            // Only a nested record can be a revisit, so a prefix is
            // always present here.
            let path = prefix.unwrap_or_default().to_string();
            return Err(ParameterizeError::CycleDetected { path });
        }
        let descriptor = record.describe()?;
        descriptor.validate()?;
        let path = match prefix {
            Some(prefix) => prefix.to_string(),
            None => descriptor.name.clone(),
        };
        debug!(
            record = %descriptor.name,
            path = %path,
            fields = descriptor.fields.len(),
            "descending into record"
        );
        active.push(identity);
        let outcome = self.parameterize_fields(&descriptor, &path, active, result);
        active.pop();
        outcome
    }

    fn parameterize_fields(
        &self,
        descriptor: &RecordDescriptor,
        path: &str,
        active: &mut Vec<usize>,
        result: &mut Parameterization,
    ) -> Result<()> {
        for field in &descriptor.fields {
            let field_path = format!("{path}.{name}", name = field.name);
            match &field.template {
                FieldTemplate::Excluded => {}
                FieldTemplate::Free(domain) => {
                    self.guard_unique(descriptor, &field.name, &field_path, result)?;
                    let variable = RandomVariable::new(field_path, domain.clone())?;
                    result.insert_variable(variable);
                }
                FieldTemplate::Fixed(domain, value) => {
                    if !domain.contains(value) {
                        return Err(ParameterizeError::TypeMismatch {
                            path: field_path,
                            expected: domain.kind(),
                            value: value.clone(),
                        });
                    }
                    self.guard_unique(descriptor, &field.name, &field_path, result)?;
                    let variable = RandomVariable::new(field_path.clone(), domain.clone())?;
                    result.insert_variable(variable);
                    result.insert_singleton(&field_path, value.clone());
                }
                FieldTemplate::Nested(child) => {
                    self.parameterize_record(child.as_ref(), Some(&field_path), active, result)?;
                }
                FieldTemplate::Many(children) => {
                    if children.is_empty() {
                        warn!(path = %field_path, "empty collection yields no variables");
                    }
                    for (index, child) in children.iter().enumerate() {
                        let element_path = format!("{field_path}.{index}");
                        self.parameterize_record(
                            child.as_ref(),
                            Some(&element_path),
                            active,
                            result,
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Qualified paths are unique by construction once descriptors pass
    /// validation; a collision here means the record mapping broke its
    /// contract.
    fn guard_unique(
        &self,
        descriptor: &RecordDescriptor,
        field: &str,
        field_path: &str,
        result: &Parameterization,
    ) -> Result<()> {
        if result.contains_path(field_path) {
            return Err(ParameterizeError::Mapping(MappingError::DuplicateField {
                record: descriptor.name.clone(),
                field: field.to_string(),
            }));
        }
        Ok(())
    }
}

impl Default for Parameterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity of a template object on the traversal path.
fn record_identity(record: &dyn Record) -> usize {
    std::ptr::from_ref(record).cast::<()>() as usize
}

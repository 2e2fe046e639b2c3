//! The parameterization result container.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use pgm_circuit::{FactorizedOptions, ProbabilisticCircuit, fully_factorized};
use pgm_model::{EventValue, RandomVariable, ScalarValue, SimpleEvent};

use crate::error::{ParameterizeError, Result};

/// Variables and partial assignment produced by one traversal.
///
/// Variables are kept in traversal (insertion) order and keyed by their
/// qualified path; the partial assignment holds the values of fixed
/// fields. Invariant: every assignment key names a variable in the
/// collection.
///
/// The container is a pure value object. It is only mutated by
/// [`fill_missing_variables`](Self::fill_missing_variables) and
/// [`merge_parameterization`](Self::merge_parameterization); concurrent
/// mutation of one instance requires external locking by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameterization {
    variables: IndexMap<String, RandomVariable>,
    event: SimpleEvent,
}

impl Parameterization {
    /// Creates an empty parameterization.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if no variables were produced.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// The variables in traversal order.
    pub fn variables(&self) -> impl ExactSizeIterator<Item = &RandomVariable> {
        self.variables.values()
    }

    /// The qualified paths in traversal order.
    pub fn paths(&self) -> impl ExactSizeIterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Looks up a variable by qualified path.
    pub fn variable(&self, path: &str) -> Option<&RandomVariable> {
        self.variables.get(path)
    }

    /// Returns true if a variable exists for the qualified path.
    pub fn contains_path(&self, path: &str) -> bool {
        self.variables.contains_key(path)
    }

    /// The domain-typed variable representations for the circuit layer,
    /// in traversal order.
    pub fn random_events_variables(&self) -> Vec<RandomVariable> {
        self.variables.values().cloned().collect()
    }

    /// The partial assignment of fixed fields.
    pub fn simple_event(&self) -> &SimpleEvent {
        &self.event
    }

    /// Completes the partial assignment in place.
    ///
    /// Every variable without an assignment entry receives an explicit
    /// whole-domain entry. Idempotent; existing entries are untouched.
    pub fn fill_missing_variables(&mut self) {
        for path in self.variables.keys() {
            if !self.event.contains(path) {
                self.event.insert(path.clone(), EventValue::WholeDomain);
            }
        }
    }

    /// Builds a fully factorized distribution over all variables.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterizeError::EmptyParameterization`] when there are
    /// no variables.
    pub fn create_fully_factorized_distribution(&self) -> Result<ProbabilisticCircuit> {
        if self.variables.is_empty() {
            return Err(ParameterizeError::EmptyParameterization);
        }
        let variables = self.random_events_variables();
        let circuit = fully_factorized(&variables, &self.event, &FactorizedOptions::new())?;
        Ok(circuit)
    }

    /// Unions another parameterization into this one.
    ///
    /// The variable collection becomes this parameterization's variables
    /// followed by the other's variables not already present by path; the
    /// assignments are unioned. A whole-domain entry is no constraint and
    /// loses to a singleton on the same path. On error, this
    /// parameterization is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterizeError::ConflictingAssignment`] when both fix
    /// the same path to different values and
    /// [`ParameterizeError::ConflictingDomains`] when a shared path
    /// carries two different declared domains.
    pub fn merge_parameterization(&mut self, other: Parameterization) -> Result<()> {
        for (path, incoming) in &other.variables {
            if let Some(existing) = self.variables.get(path)
                && existing.domain() != incoming.domain()
            {
                return Err(ParameterizeError::ConflictingDomains { path: path.clone() });
            }
        }
        for (path, incoming) in other.event.iter() {
            if let (Some(EventValue::Singleton(existing)), EventValue::Singleton(new)) =
                (self.event.get(path), incoming)
                && existing != new
            {
                return Err(ParameterizeError::ConflictingAssignment {
                    path: path.to_string(),
                    existing: existing.clone(),
                    incoming: new.clone(),
                });
            }
        }

        for (path, variable) in other.variables {
            self.variables.entry(path).or_insert(variable);
        }
        for (path, value) in other.event {
            match (self.event.get(&path), &value) {
                (None, _) => {
                    self.event.insert(path, value);
                }
                (Some(EventValue::WholeDomain), EventValue::Singleton(_)) => {
                    self.event.insert(path, value);
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub(crate) fn insert_variable(&mut self, variable: RandomVariable) {
        let path = variable.name().to_string();
        self.variables.insert(path, variable);
    }

    pub(crate) fn insert_singleton(&mut self, path: &str, value: ScalarValue) {
        self.event.insert(path, EventValue::Singleton(value));
    }
}

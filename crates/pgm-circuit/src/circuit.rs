//! Fully factorized product circuits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use pgm_model::{EventValue, RandomVariable, ScalarValue, SimpleEvent, VariableDomain};

use crate::distribution::{FactorNode, LeafDistribution};
use crate::error::CircuitError;

const DEFAULT_MEAN: f64 = 0.0;
const DEFAULT_VARIANCE: f64 = 1.0;

/// Per-variable Gaussian parameter overrides for [`fully_factorized`].
///
/// Overrides are keyed by qualified variable name. Variables without an
/// override get mean 0.0 and variance 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorizedOptions {
    means: BTreeMap<String, f64>,
    variances: BTreeMap<String, f64>,
}

impl FactorizedOptions {
    /// Creates options with only defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the mean for one variable.
    #[must_use]
    pub fn with_mean(mut self, name: impl Into<String>, mean: f64) -> Self {
        self.means.insert(name.into(), mean);
        self
    }

    /// Sets the variance for one variable.
    #[must_use]
    pub fn with_variance(mut self, name: impl Into<String>, variance: f64) -> Self {
        self.variances.insert(name.into(), variance);
        self
    }

    fn mean_for(&self, name: &str) -> f64 {
        self.means.get(name).copied().unwrap_or(DEFAULT_MEAN)
    }

    fn variance_for(&self, name: &str) -> f64 {
        self.variances
            .get(name)
            .copied()
            .unwrap_or(DEFAULT_VARIANCE)
    }
}

/// A product circuit treating all its variables as independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilisticCircuit {
    factors: Vec<FactorNode>,
}

impl ProbabilisticCircuit {
    /// The factors in variable order.
    pub fn factors(&self) -> &[FactorNode] {
        &self.factors
    }

    /// The covered variables, in the order they were given.
    pub fn variables(&self) -> impl ExactSizeIterator<Item = &RandomVariable> {
        self.factors.iter().map(FactorNode::variable)
    }

    /// Number of variables in the circuit.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Returns true if the circuit covers no variables.
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Log likelihood of a full assignment.
    ///
    /// The event must bind every circuit variable to a singleton value.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::MissingAssignment`] when a variable has no
    /// bound value, plus the per-leaf errors of
    /// [`FactorNode::log_density`].
    pub fn log_likelihood(&self, event: &SimpleEvent) -> Result<f64, CircuitError> {
        let mut total = 0.0;
        for factor in &self.factors {
            let name = factor.variable().name();
            let value = event
                .singleton(name)
                .ok_or_else(|| CircuitError::MissingAssignment {
                    name: name.to_string(),
                })?;
            total += factor.log_density(value)?;
        }
        Ok(total)
    }
}

/// Builds a fully factorized circuit over the given variables.
///
/// Each variable becomes one independent leaf:
/// - a `Singleton` entry in `event` yields a Dirac leaf at that value
///   (the value must lie in the variable's domain);
/// - otherwise numeric variables get a Gaussian leaf from `options` and
///   symbolic variables a uniform leaf over their declared set.
///
/// A `WholeDomain` entry is treated exactly like an absent entry.
///
/// # Errors
///
/// Returns [`CircuitError::NoVariables`] for an empty variable list,
/// [`CircuitError::InvalidVariance`] for a non-positive variance, and
/// [`CircuitError::KindMismatch`] / [`CircuitError::SymbolOutsideDomain`]
/// for a bound value outside its variable's domain.
pub fn fully_factorized(
    variables: &[RandomVariable],
    event: &SimpleEvent,
    options: &FactorizedOptions,
) -> Result<ProbabilisticCircuit, CircuitError> {
    if variables.is_empty() {
        return Err(CircuitError::NoVariables);
    }

    let mut factors = Vec::with_capacity(variables.len());
    for variable in variables {
        let name = variable.name();
        let distribution = match event.get(name) {
            Some(EventValue::Singleton(value)) => {
                if !variable.domain().contains(value) {
                    return Err(domain_violation(variable, value));
                }
                LeafDistribution::Dirac {
                    value: value.clone(),
                }
            }
            Some(EventValue::WholeDomain) | None => match variable.domain() {
                VariableDomain::Continuous | VariableDomain::Integer => {
                    let variance = options.variance_for(name);
                    if variance <= 0.0 {
                        return Err(CircuitError::InvalidVariance {
                            name: name.to_string(),
                        });
                    }
                    LeafDistribution::Gaussian {
                        mean: options.mean_for(name),
                        variance,
                    }
                }
                VariableDomain::Symbolic(set) => LeafDistribution::UniformSymbolic {
                    set: set.clone(),
                },
            },
        };
        factors.push(FactorNode::new(variable.clone(), distribution));
    }

    Ok(ProbabilisticCircuit { factors })
}

fn domain_violation(variable: &RandomVariable, value: &ScalarValue) -> CircuitError {
    match (variable.domain(), value) {
        (VariableDomain::Symbolic(_), ScalarValue::Symbol(symbol)) => {
            CircuitError::SymbolOutsideDomain {
                name: variable.name().to_string(),
                symbol: symbol.clone(),
            }
        }
        _ => CircuitError::KindMismatch {
            name: variable.name().to_string(),
        },
    }
}

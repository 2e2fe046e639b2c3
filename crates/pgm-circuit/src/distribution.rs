//! Leaf distributions for fully factorized circuits.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use pgm_model::{RandomVariable, ScalarValue, SymbolSet};

use crate::error::CircuitError;

/// A univariate leaf distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LeafDistribution {
    /// Gaussian over a numeric variable.
    Gaussian { mean: f64, variance: f64 },
    /// Unit mass at a single value.
    Dirac { value: ScalarValue },
    /// Uniform over a finite label set.
    UniformSymbolic { set: SymbolSet },
}

/// One variable of a product circuit together with its leaf distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorNode {
    variable: RandomVariable,
    distribution: LeafDistribution,
}

impl FactorNode {
    pub(crate) fn new(variable: RandomVariable, distribution: LeafDistribution) -> Self {
        Self {
            variable,
            distribution,
        }
    }

    /// The variable this factor covers.
    pub fn variable(&self) -> &RandomVariable {
        &self.variable
    }

    /// The leaf distribution of this factor.
    pub fn distribution(&self) -> &LeafDistribution {
        &self.distribution
    }

    /// Log density of the leaf at a concrete value.
    ///
    /// Integer observations under a Gaussian leaf are evaluated at their
    /// real embedding. A Dirac leaf has unit mass at its atom and zero
    /// mass elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::KindMismatch`] when the value kind does not
    /// fit the leaf and [`CircuitError::SymbolOutsideDomain`] for a symbol
    /// missing from a uniform leaf's set.
    pub fn log_density(&self, value: &ScalarValue) -> Result<f64, CircuitError> {
        match (&self.distribution, value) {
            (LeafDistribution::Gaussian { mean, variance }, ScalarValue::Continuous(x)) => {
                Ok(gaussian_log_density(*x, *mean, *variance))
            }
            (LeafDistribution::Gaussian { mean, variance }, ScalarValue::Integer(i)) => {
                Ok(gaussian_log_density(*i as f64, *mean, *variance))
            }
            (LeafDistribution::Dirac { value: atom }, observed) => {
                if atom.kind() != observed.kind() {
                    return Err(CircuitError::KindMismatch {
                        name: self.variable.name().to_string(),
                    });
                }
                Ok(if atom == observed { 0.0 } else { f64::NEG_INFINITY })
            }
            (LeafDistribution::UniformSymbolic { set }, ScalarValue::Symbol(symbol)) => {
                if set.contains(symbol) {
                    Ok(-(set.len() as f64).ln())
                } else {
                    Err(CircuitError::SymbolOutsideDomain {
                        name: self.variable.name().to_string(),
                        symbol: symbol.clone(),
                    })
                }
            }
            _ => Err(CircuitError::KindMismatch {
                name: self.variable.name().to_string(),
            }),
        }
    }
}

fn gaussian_log_density(x: f64, mean: f64, variance: f64) -> f64 {
    let residual = x - mean;
    -0.5 * (residual * residual / variance + variance.ln() + TAU.ln())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn standard_gaussian_log_density_at_mean() {
        let factor = FactorNode::new(
            RandomVariable::continuous("x"),
            LeafDistribution::Gaussian {
                mean: 0.0,
                variance: 1.0,
            },
        );
        let density = factor
            .log_density(&ScalarValue::Continuous(0.0))
            .expect("density");
        assert!(close(density, -0.5 * TAU.ln()));
    }

    #[test]
    fn gaussian_accepts_integer_observations() {
        let factor = FactorNode::new(
            RandomVariable::integer("n"),
            LeafDistribution::Gaussian {
                mean: 0.0,
                variance: 1.0,
            },
        );
        let at_two = factor
            .log_density(&ScalarValue::Integer(2))
            .expect("density");
        assert!(close(at_two, -0.5 * (4.0 + TAU.ln())));
    }

    #[test]
    fn dirac_has_unit_mass_at_atom() {
        let factor = FactorNode::new(
            RandomVariable::continuous("y"),
            LeafDistribution::Dirac {
                value: ScalarValue::Continuous(3.14),
            },
        );
        assert_eq!(
            factor.log_density(&ScalarValue::Continuous(3.14)),
            Ok(0.0)
        );
        assert_eq!(
            factor.log_density(&ScalarValue::Continuous(2.0)),
            Ok(f64::NEG_INFINITY)
        );
        assert_eq!(
            factor.log_density(&ScalarValue::Symbol("pi".to_string())),
            Err(CircuitError::KindMismatch {
                name: "y".to_string()
            })
        );
    }

    #[test]
    fn uniform_symbolic_mass_and_domain_check() {
        let set: SymbolSet = ["red", "green", "blue"].into_iter().collect();
        let factor = FactorNode::new(
            RandomVariable::symbolic("color", set.clone()).expect("variable"),
            LeafDistribution::UniformSymbolic { set },
        );
        let density = factor
            .log_density(&ScalarValue::Symbol("red".to_string()))
            .expect("density");
        assert!(close(density, -(3.0f64).ln()));
        assert_eq!(
            factor.log_density(&ScalarValue::Symbol("yellow".to_string())),
            Err(CircuitError::SymbolOutsideDomain {
                name: "color".to_string(),
                symbol: "yellow".to_string(),
            })
        );
    }
}

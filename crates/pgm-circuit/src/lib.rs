#![deny(unsafe_code)]

//! Probabilistic-circuit construction over random variables.
//!
//! The only model family this crate builds is the fully factorized one:
//! a product unit with one univariate leaf per variable. Bound variables
//! become Dirac leaves, free numeric variables Gaussian leaves, and free
//! symbolic variables uniform leaves over their declared set.

pub mod circuit;
pub mod distribution;
pub mod error;

pub use circuit::{FactorizedOptions, ProbabilisticCircuit, fully_factorized};
pub use distribution::{FactorNode, LeafDistribution};
pub use error::CircuitError;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("symbolic variable '{name}' has an empty symbol set")]
    EmptySymbolicDomain { name: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;

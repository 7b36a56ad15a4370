use thiserror::Error;

/// Register transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("timeout")]
    Timeout,
}

/// Action dispatch failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("action '{0}' not supported")]
    UnknownAction(String),
    #[error("action '{action}' requires a numeric '{slot}' parameter")]
    MissingParameter { action: String, slot: String },
    #[error("register access failed: {0}")]
    Register(#[from] RegisterError),
}

use thiserror::Error;

use stockgate_core::DomainError;

/// Store operation error.
///
/// ## Error Categories
///
/// - **InvalidInput**: the value handed to the store is malformed (caller fault)
/// - **NotFound**: nothing has been persisted yet (missing upstream data)
/// - **Corrupt**: persisted bytes exist but cannot be parsed
/// - **Storage**: I/O failure or timeout while reading/writing durable state
///
/// Stores never retry on their own; the caller decides whether to repeat the
/// whole request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("corrupt data: {0}")]
    Corrupt(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl StoreError {
    /// Stable machine-readable tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::InvalidInput(_) => "invalid_input",
            StoreError::NotFound(_) => "not_found",
            StoreError::Corrupt(_) => "corrupt",
            StoreError::Storage(_) => "storage_error",
        }
    }
}

impl From<DomainError> for StoreError {
    fn from(value: DomainError) -> Self {
        StoreError::InvalidInput(value.to_string())
    }
}

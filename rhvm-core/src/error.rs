use thiserror::Error;

#[derive(Error, Debug)]
pub enum RhvmError {
    #[error("Unrecognized power state: {0:?}")]
    UnrecognizedPowerState(String),

    #[error("Provider unavailable during {operation}: {cause}")]
    ProviderUnavailable { operation: String, cause: String },

    #[error("Unregister failed for {vm_ref}: {message}")]
    UnregisterError { vm_ref: String, message: String },

    #[error("{operation} requires API version {minimum} or newer, provider offers {version}")]
    UnsupportedApiVersion {
        operation: String,
        version: u32,
        minimum: u32,
    },

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl RhvmError {
    /// Errors raised by the provider side of a call. Retrying these is the
    /// caller's decision; nothing in this crate retries.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            RhvmError::ProviderUnavailable { .. } | RhvmError::UnregisterError { .. }
        )
    }

    pub fn provider_unavailable(operation: &str, cause: impl std::fmt::Display) -> Self {
        RhvmError::ProviderUnavailable {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RhvmError>;

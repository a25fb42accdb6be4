use thiserror::Error;

/// Result type for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Errors from the remote classification strategy.
///
/// These never surface past the classifier facade; every variant triggers
/// fallback to the local strategy with a logged diagnostic.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Remote endpoint or credentials missing
    #[error("Remote classification not configured")]
    NotConfigured,

    /// Transport failure or timeout
    #[error("Remote classification transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Remote classification endpoint returned status {0}")]
    Status(u16),

    /// Response did not match the expected {services, edges} schema
    #[error("Remote classification response violated the expected schema: {0}")]
    SchemaViolation(String),
}

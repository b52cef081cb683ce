use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine-wide error type, consolidating all failure modes into a single enum.
#[derive(Debug, Error, Clone)]
pub enum EngineError {
    /// Represents caller errors: empty or missing required text, out-of-range parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Represents transport failures, timeouts and non-success status codes
    /// from an LLM backend. Always carries the provider name.
    #[error("Provider '{provider}' unavailable: {reason}")]
    ProviderUnavailable { provider: String, reason: String },

    /// Represents configuration errors: unknown provider name, missing
    /// credential, malformed base URL.
    #[error("Provider misconfigured: {0}")]
    ProviderMisconfigured(String),

    /// Represents an LLM response that could not be decoded as structured data.
    /// Providers degrade this to a raw-text result; it only surfaces from the
    /// pure extraction function.
    #[error("Response parse failed: {0}")]
    ParseFailure(String),

    /// Represents an unexpected numeric or algorithmic fault in a statistical branch.
    #[error("Compute error: {0}")]
    ComputeError(String),
}

/// Machine-readable error category, mirrored into [`AnalysisError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    ProviderUnavailable,
    ProviderMisconfigured,
    ParseFailure,
    ComputeError,
}

/// Serializable error value carried inside composite analysis results.
///
/// Branch boundaries convert [`EngineError`] into this so that one failed
/// branch never aborts a hybrid or comprehensive call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisError {
    pub kind: ErrorKind,
    pub message: String,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidInput(_) => ErrorKind::InvalidInput,
            EngineError::ProviderUnavailable { .. } => ErrorKind::ProviderUnavailable,
            EngineError::ProviderMisconfigured(_) => ErrorKind::ProviderMisconfigured,
            EngineError::ParseFailure(_) => ErrorKind::ParseFailure,
            EngineError::ComputeError(_) => ErrorKind::ComputeError,
        }
    }
}

impl From<EngineError> for AnalysisError {
    fn from(err: EngineError) -> Self {
        AnalysisError {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<&EngineError> for AnalysisError {
    fn from(err: &EngineError) -> Self {
        err.clone().into()
    }
}

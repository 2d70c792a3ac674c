use adaptive_engine::errors::EvalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    /// The stored weights could not be read back; callers fall back to defaults.
    #[error("Corrupted parameter store {path}: {reason}")]
    CorruptedParameterStore { path: String, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Hand evaluation failed: {0}")]
    Eval(#[from] EvalError),
    #[error("Internal state invariant violated: {0}")]
    StateInvariantViolation(String),
    #[error("Unknown AI type: {0}")]
    UnknownKind(String),
}

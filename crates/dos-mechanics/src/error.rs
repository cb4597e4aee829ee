//! Error types for the roll engine.

/// Errors that can occur while building or resolving a roll.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A roll request is malformed (missing fields, thresholds out of order).
    #[error("invalid roll request: {0}")]
    InvalidRequest(String),

    /// A dice roll handed to the evaluator has no kept die.
    #[error("invalid roll: {0}")]
    InvalidRoll(String),

    /// A dice formula could not be parsed.
    #[error("invalid dice formula: {0}")]
    InvalidFormula(String),

    /// A roll configuration could not be read.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Reading a configuration or request file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

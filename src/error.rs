use thiserror::Error;

/// Hard failures raised by the engine.
///
/// Falling short of a level's target accuracy or score is *not* an error; those
/// outcomes come back as results with `success: false`.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed request or configuration, mismatched vector lengths, or an
    /// illegal attempt state transition.
    #[error("validation error: {0}")]
    Validation(String),

    /// Too few usable inputs remained after filtering.
    #[error("need {missing} more {what} (have {found}, minimum is {needed})")]
    InsufficientData {
        needed: usize,
        found: usize,
        missing: usize,
        what: &'static str,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }

    pub fn insufficient(needed: usize, found: usize, what: &'static str) -> Self {
        EngineError::InsufficientData {
            needed,
            found,
            missing: needed.saturating_sub(found),
            what,
        }
    }

    /// Short machine-readable tag used in HTTP error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "validation_error",
            EngineError::InsufficientData { .. } => "insufficient_data",
            EngineError::Io(_) => "io_error",
            EngineError::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

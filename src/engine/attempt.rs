use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Lifecycle of one training or simulation attempt.
///
/// `Idle -> Running -> Succeeded | Failed`. Terminal states stay terminal;
/// there is no pause, resume or retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl AttemptState {
    pub fn start(self) -> Result<Self> {
        match self {
            AttemptState::Idle => Ok(AttemptState::Running),
            other => Err(invalid(other, "start")),
        }
    }

    /// Moves a running attempt to its terminal state.
    pub fn finish(self, success: bool) -> Result<Self> {
        match self {
            AttemptState::Running if success => Ok(AttemptState::Succeeded),
            AttemptState::Running => Ok(AttemptState::Failed),
            other => Err(invalid(other, "finish")),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AttemptState::Succeeded | AttemptState::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptState::Idle => "idle",
            AttemptState::Running => "running",
            AttemptState::Succeeded => "succeeded",
            AttemptState::Failed => "failed",
        }
    }
}

fn invalid(state: AttemptState, action: &str) -> EngineError {
    EngineError::validation(format!("cannot {action} an attempt that is {}", state.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_paths() {
        let running = AttemptState::default().start().unwrap();
        assert_eq!(running, AttemptState::Running);
        assert_eq!(running.finish(true).unwrap(), AttemptState::Succeeded);
        assert_eq!(running.finish(false).unwrap(), AttemptState::Failed);
    }

    #[test]
    fn illegal_transitions_are_validation_errors() {
        assert!(matches!(AttemptState::Idle.finish(true), Err(EngineError::Validation(_))));
        assert!(AttemptState::Running.start().is_err());
        for done in [AttemptState::Succeeded, AttemptState::Failed] {
            assert!(done.is_terminal());
            assert!(done.start().is_err());
            assert!(done.finish(true).is_err());
        }
    }
}

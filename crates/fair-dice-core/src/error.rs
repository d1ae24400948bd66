//! Error types shared across the game.

use thiserror::Error;

/// Problems with the dice supplied at session start.
///
/// Always fatal to the session: the caller discards it and starts fresh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("only {found} dice were specified, at least {required} are needed")]
    TooFewDice { found: usize, required: usize },

    #[error("die #{index} has {found} faces, every die needs exactly 6 (example: 1,2,2,4,4,6)")]
    WrongFaceCount { index: usize, found: usize },

    #[error("die #{index} has a non-numeric face {value:?} (example: 1,2,3,4,5,6)")]
    InvalidFace { index: usize, value: String },
}

/// Errors from the fairness protocol and the state machine.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: u32, max: u32 },

    #[error("commitment violation: revealed value {value} does not match digest {digest}")]
    CommitmentViolation { value: u32, digest: String },

    #[error("contribution {value} is outside the range {min}..={max}")]
    InvalidContribution { value: u32, min: u32, max: u32 },

    #[error("no die at position {position}, only {available} left to choose from")]
    InvalidSelection { position: usize, available: usize },

    #[error("input closed")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// Whether this error ends the session (as opposed to the whole program).
    pub fn is_session_fatal(&self) -> bool {
        !matches!(self, GameError::InputClosed | GameError::Io(_))
    }
}

/// Result alias for game operations
pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts_into_game_error() {
        let err: GameError = ConfigError::TooFewDice {
            found: 2,
            required: 3,
        }
        .into();
        assert!(matches!(err, GameError::Config(ConfigError::TooFewDice { found: 2, .. })));
        assert!(err.is_session_fatal());
    }

    #[test]
    fn test_input_closed_is_not_session_fatal() {
        assert!(!GameError::InputClosed.is_session_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::WrongFaceCount { index: 1, found: 5 };
        assert!(err.to_string().contains("5 faces"));
    }
}

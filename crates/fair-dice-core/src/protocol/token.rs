//! Input tokens accepted at a prompt.

use thiserror::Error;

/// Token that exits the current session
pub const ABORT: &str = "x";

/// Token that shows the probability table
pub const HELP: &str = "?";

/// A recognised input token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A numeric option in `0..choices`
    Choice(u32),
    Abort,
    Help,
}

/// Input outside the prompt's vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input {input:?}, please choose one of the options: 0..{last}, X, ?")]
pub struct TokenError {
    pub input: String,
    pub last: u32,
}

impl Token {
    /// Match `raw` against a vocabulary of `choices` numeric options plus `x` and `?`.
    ///
    /// Surrounding whitespace and letter case are ignored. Numbers must be
    /// written canonically (`1`, not `01` or `+1`).
    pub fn parse(raw: &str, choices: u32) -> Result<Self, TokenError> {
        let input = raw.trim().to_lowercase();
        match input.as_str() {
            ABORT => return Ok(Token::Abort),
            HELP => return Ok(Token::Help),
            _ => {}
        }
        input
            .parse::<u32>()
            .ok()
            .filter(|n| *n < choices && n.to_string() == input)
            .map(Token::Choice)
            .ok_or_else(|| TokenError {
                input: raw.trim().to_string(),
                last: choices.saturating_sub(1),
            })
    }
}

//! Parties and round outcomes.

use super::dice::Face;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One of the two players
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    User,
    Computer,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::User => write!(f, "user"),
            Party::Computer => write!(f, "computer"),
        }
    }
}

/// Result of comparing the two throws
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    UserWins,
    ComputerWins,
    Tie,
}

impl RoundOutcome {
    /// Higher face wins; equal faces tie
    pub fn judge(user_throw: Face, computer_throw: Face) -> Self {
        match user_throw.cmp(&computer_throw) {
            Ordering::Greater => RoundOutcome::UserWins,
            Ordering::Less => RoundOutcome::ComputerWins,
            Ordering::Equal => RoundOutcome::Tie,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundOutcome::UserWins => "user wins",
            RoundOutcome::ComputerWins => "computer wins",
            RoundOutcome::Tie => "tie",
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wins_with_higher_throw() {
        assert_eq!(RoundOutcome::judge(9, 5), RoundOutcome::UserWins);
    }

    #[test]
    fn test_equal_throws_tie() {
        assert_eq!(RoundOutcome::judge(3, 3), RoundOutcome::Tie);
        assert_eq!(RoundOutcome::Tie.to_string(), "tie");
    }

    #[test]
    fn test_computer_wins_with_higher_throw() {
        assert_eq!(RoundOutcome::judge(2, 8), RoundOutcome::ComputerWins);
    }

    #[test]
    fn test_comparison_is_numeric() {
        // "9" > "10" as text; as numbers 10 wins.
        assert_eq!(RoundOutcome::judge(9, 10), RoundOutcome::ComputerWins);
    }

    #[test]
    fn test_party_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Party::Computer).unwrap(), "\"computer\"");
        assert_eq!(Party::User.to_string(), "user");
    }
}

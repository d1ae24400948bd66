//! Fair Dice Core Library
//!
//! This crate provides the fairness protocol and game logic for a two-party
//! dice game played between a human and the computer: commit-reveal
//! commitments, the fair exchange that combines both sides' values, and the
//! state machine that sequences the game.

pub mod crypto;
pub mod error;
pub mod exchange;
pub mod game;
pub mod protocol;
pub mod random;

pub use crypto::{Commitment, CommitmentDigest, CommitmentGenerator, SecretKey};
pub use error::{ConfigError, GameError, Result};
pub use exchange::{ExchangeMode, ExchangeResult, FairExchange, PendingExchange};
pub use game::{Die, DieSet, Ending, GameStateMachine, Party, Phase, RoundOutcome, SessionId};
pub use protocol::{GameDisplay, GameEvent, HelpExit, Prompt, PromptKind, TokenSource};
pub use random::{Entropy, ScriptedEntropy, SecureEntropy};

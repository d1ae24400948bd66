//! Structured events emitted to the display layer.
//!
//! The core never formats text; every value a front end shows comes from
//! one of these events.

use crate::crypto::CommitmentDigest;
use crate::exchange::{ExchangeMode, ExchangeResult};
use crate::game::{Die, Face, Party, PickedDie, RoundSummary, SessionId};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    SessionStarted {
        session: SessionId,
        dice: Vec<Die>,
    },
    /// The computer committed; only the digest is disclosed
    CommitmentPublished {
        session: SessionId,
        mode: ExchangeMode,
        /// Whose decision the exchange settles (the first mover, or whose die is thrown)
        party: Party,
        min: u32,
        max: u32,
        digest: CommitmentDigest,
    },
    FirstMoverDecided {
        session: SessionId,
        exchange: ExchangeResult,
        first_mover: Party,
    },
    DieSelected {
        session: SessionId,
        party: Party,
        die: PickedDie,
    },
    ThrowResolved {
        session: SessionId,
        party: Party,
        die: Die,
        exchange: ExchangeResult,
        face: Face,
    },
    RoundFinished {
        session: SessionId,
        summary: RoundSummary,
    },
    InputRejected {
        session: SessionId,
        input: String,
        reason: String,
    },
    SessionAborted {
        session: SessionId,
    },
    /// The session hit a fatal error and will be replaced by a fresh one
    SessionFailed {
        session: SessionId,
        reason: String,
    },
}

impl GameEvent {
    pub fn session(&self) -> SessionId {
        match self {
            GameEvent::SessionStarted { session, .. }
            | GameEvent::CommitmentPublished { session, .. }
            | GameEvent::FirstMoverDecided { session, .. }
            | GameEvent::DieSelected { session, .. }
            | GameEvent::ThrowResolved { session, .. }
            | GameEvent::RoundFinished { session, .. }
            | GameEvent::InputRejected { session, .. }
            | GameEvent::SessionAborted { session }
            | GameEvent::SessionFailed { session, .. } => *session,
        }
    }
}

//! Session state: one phase at a time, each carrying only its own data.

use super::dice::{Face, PickedDie};
use super::outcome::{Party, RoundOutcome};
use crate::exchange::ExchangeResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Tags one session in events and logs; a restart always gets a new one
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Both dice once the second mover has chosen
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceSelection {
    pub first_mover: Party,
    pub first_move: ExchangeResult,
    pub user: PickedDie,
    pub computer: PickedDie,
}

impl DiceSelection {
    pub fn die_of(&self, party: Party) -> &PickedDie {
        match party {
            Party::User => &self.user,
            Party::Computer => &self.computer,
        }
    }
}

/// A resolved throw: the exchange that produced it and the face it selected
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Throw {
    pub exchange: ExchangeResult,
    pub face: Face,
}

/// Everything that happened in a finished round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub first_mover: Party,
    pub first_move: ExchangeResult,
    pub user_die: PickedDie,
    pub computer_die: PickedDie,
    pub user_throw: Throw,
    pub computer_throw: Throw,
    pub outcome: RoundOutcome,
}

/// How a session ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Finished(Box<RoundSummary>),
    Aborted,
}

/// Game phases
///
/// ```text
/// DetermineFirstMover
///   -> UserPicksDieFirst     -> UserThrow     -> ComputerThrow -> ResolveOutcome
///   -> ComputerPicksDieFirst -> ComputerThrow -> UserThrow     -> ResolveOutcome
///                                                       ResolveOutcome -> Terminal
/// ```
/// Any prompt may also go straight to `Terminal(Aborted)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    DetermineFirstMover,
    UserPicksDieFirst {
        first_move: ExchangeResult,
    },
    ComputerPicksDieFirst {
        first_move: ExchangeResult,
    },
    UserThrow {
        dice: DiceSelection,
        computer_throw: Option<Throw>,
    },
    ComputerThrow {
        dice: DiceSelection,
        user_throw: Option<Throw>,
    },
    ResolveOutcome {
        dice: DiceSelection,
        user_throw: Throw,
        computer_throw: Throw,
    },
    Terminal(Ending),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::DetermineFirstMover => "determine_first_mover",
            Phase::UserPicksDieFirst { .. } => "user_picks_die_first",
            Phase::ComputerPicksDieFirst { .. } => "computer_picks_die_first",
            Phase::UserThrow { .. } => "user_throw",
            Phase::ComputerThrow { .. } => "computer_throw",
            Phase::ResolveOutcome { .. } => "resolve_outcome",
            Phase::Terminal(_) => "terminal",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Terminal(_))
    }

    fn selection(&self) -> Option<&DiceSelection> {
        match self {
            Phase::UserThrow { dice, .. }
            | Phase::ComputerThrow { dice, .. }
            | Phase::ResolveOutcome { dice, .. } => Some(dice),
            _ => None,
        }
    }
}

/// State of one game, owned by the state machine.
///
/// A restart replaces the whole session; nothing carries over.
#[derive(Clone, Debug)]
pub struct GameSession {
    id: SessionId,
    phase: Phase,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            phase: Phase::DetermineFirstMover,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub(crate) fn advance(&mut self, next: Phase) {
        self.phase = next;
    }

    /// Who moves first, once decided
    pub fn first_mover(&self) -> Option<Party> {
        match &self.phase {
            Phase::UserPicksDieFirst { .. } => Some(Party::User),
            Phase::ComputerPicksDieFirst { .. } => Some(Party::Computer),
            Phase::Terminal(Ending::Finished(summary)) => Some(summary.first_mover),
            phase => phase.selection().map(|dice| dice.first_mover),
        }
    }

    /// The die `party` selected, once both dice are chosen
    pub fn selected_die(&self, party: Party) -> Option<&PickedDie> {
        match &self.phase {
            Phase::Terminal(Ending::Finished(summary)) => Some(match party {
                Party::User => &summary.user_die,
                Party::Computer => &summary.computer_die,
            }),
            phase => phase.selection().map(|dice| dice.die_of(party)),
        }
    }

    /// `party`'s resolved throw value, once thrown
    pub fn throw_value(&self, party: Party) -> Option<Face> {
        let throw = match (&self.phase, party) {
            (Phase::UserThrow { computer_throw, .. }, Party::Computer) => computer_throw.as_ref(),
            (Phase::ComputerThrow { user_throw, .. }, Party::User) => user_throw.as_ref(),
            (Phase::ResolveOutcome { user_throw, .. }, Party::User) => Some(user_throw),
            (Phase::ResolveOutcome { computer_throw, .. }, Party::Computer) => Some(computer_throw),
            (Phase::Terminal(Ending::Finished(summary)), Party::User) => Some(&summary.user_throw),
            (Phase::Terminal(Ending::Finished(summary)), Party::Computer) => {
                Some(&summary.computer_throw)
            }
            _ => None,
        };
        throw.map(|throw| throw.face)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

//! Dice, sessions and the game state machine.

pub mod analysis;
mod dice;
mod machine;
mod outcome;
mod session;

pub use analysis::{win_probability, ProbabilityMatrix};
pub use dice::{Die, DiePool, DieSet, Face, PickedDie, FACES, MIN_DICE};
pub use machine::GameStateMachine;
pub use outcome::{Party, RoundOutcome};
pub use session::{DiceSelection, Ending, GameSession, Phase, RoundSummary, SessionId, Throw};

//! Randomness sources for commitments and the computer's choices.

mod mock;
mod traits;

pub use mock::ScriptedEntropy;
pub use traits::{Entropy, SecureEntropy};

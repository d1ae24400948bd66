//! Drawing a committed random value.

use super::Commitment;
use crate::error::{GameError, Result};
use crate::random::Entropy;

/// Stateless service that draws `r` in `[min, max]` and commits to it.
pub struct CommitmentGenerator;

impl CommitmentGenerator {
    /// Draw a value in the inclusive range and commit to it with a fresh key.
    ///
    /// The value is a 32-bit word reduced modulo the range size. The residual
    /// bias is below 2^-29 for ranges of six or fewer values.
    pub fn generate<E: Entropy + ?Sized>(
        entropy: &mut E,
        min: u32,
        max: u32,
    ) -> Result<Commitment> {
        if min > max {
            return Err(GameError::InvalidRange { min, max });
        }
        let span = u64::from(max - min) + 1;
        let offset = u64::from(entropy.next_word()) % span;
        let value = min + offset as u32;
        let key = entropy.secret_key();
        Ok(Commitment::new(value, key))
    }
}

//! One round of the commit-reveal fair exchange.
//!
//! 1. The owner commits to a random `r` and publishes only the digest.
//! 2. The counterpart submits its value `u`.
//! 3. The owner reveals `r` and the key; both values are combined.
//!
//! Two modes are used by the game and they combine differently:
//! - `FirstMove`: `r, u` in 0..=1, the counterpart wins the decision iff `u == r`
//! - `Throw`: `r, u` in 0..=5, the die index is `(r + u) mod 6`

use crate::crypto::{verify_reveal, Commitment, CommitmentDigest, CommitmentGenerator, SecretKey};
use crate::error::{GameError, Result};
use crate::game::{Die, Face, Party};
use crate::random::Entropy;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Faces on a die, and the modulus of the throw combination
const THROW_MODULUS: u32 = 6;

/// Which decision an exchange settles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeMode {
    /// Guess a binary value; a correct guess wins the first move
    FirstMove,
    /// Add a value modulo 6 to pick a die face
    Throw,
}

impl ExchangeMode {
    pub fn min(&self) -> u32 {
        0
    }

    pub fn max(&self) -> u32 {
        match self {
            ExchangeMode::FirstMove => 1,
            ExchangeMode::Throw => THROW_MODULUS - 1,
        }
    }

    /// Number of valid contributions, `0..choices()`
    pub fn choices(&self) -> u32 {
        self.max() - self.min() + 1
    }

    /// Combine the owner's revealed value with the counterpart's contribution.
    ///
    /// `FirstMove` yields 1 when the guess matched and 0 otherwise.
    pub fn combine(&self, generated: u32, contribution: u32) -> u32 {
        match self {
            ExchangeMode::FirstMove => u32::from(generated == contribution),
            ExchangeMode::Throw => (generated + contribution) % THROW_MODULUS,
        }
    }
}

impl fmt::Display for ExchangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeMode::FirstMove => write!(f, "first-move"),
            ExchangeMode::Throw => write!(f, "throw"),
        }
    }
}

/// Stateless orchestrator of exchange rounds
pub struct FairExchange;

impl FairExchange {
    /// Commit to a fresh value for `mode`; only the digest is visible until settled
    pub fn open<E: Entropy + ?Sized>(
        entropy: &mut E,
        mode: ExchangeMode,
        owner: Party,
    ) -> Result<PendingExchange> {
        let commitment = CommitmentGenerator::generate(entropy, mode.min(), mode.max())?;
        debug!(%mode, %owner, digest = %commitment.digest(), "commitment published");
        Ok(PendingExchange {
            mode,
            owner,
            commitment,
        })
    }

    /// Run a whole round, asking `counterpart` for its value once the digest is public
    pub fn run<E, F>(
        entropy: &mut E,
        mode: ExchangeMode,
        owner: Party,
        counterpart: F,
    ) -> Result<ExchangeResult>
    where
        E: Entropy + ?Sized,
        F: FnOnce(&CommitmentDigest) -> Result<u32>,
    {
        let pending = Self::open(entropy, mode, owner)?;
        let contribution = counterpart(pending.digest())?;
        pending.settle(contribution)
    }
}

/// An exchange whose digest has been published and which awaits the counterpart
#[derive(Debug)]
pub struct PendingExchange {
    mode: ExchangeMode,
    owner: Party,
    commitment: Commitment,
}

impl PendingExchange {
    pub fn digest(&self) -> &CommitmentDigest {
        self.commitment.digest()
    }

    /// Accept the counterpart's value, reveal and combine
    pub fn settle(self, contribution: u32) -> Result<ExchangeResult> {
        let (min, max) = (self.mode.min(), self.mode.max());
        if !(min..=max).contains(&contribution) {
            return Err(GameError::InvalidContribution {
                value: contribution,
                min,
                max,
            });
        }
        let reveal = self.commitment.reveal();
        let result = ExchangeResult {
            mode: self.mode,
            owner: self.owner,
            contribution,
            generated: reveal.value,
            combined: self.mode.combine(reveal.value, contribution),
            key: reveal.key,
            digest: reveal.digest,
        };
        result.verify()?;
        debug!(
            mode = %result.mode,
            generated = result.generated,
            contribution,
            combined = result.combined,
            "exchange settled"
        );
        Ok(result)
    }
}

/// A settled exchange: both contributions, the combination and the opening
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeResult {
    pub mode: ExchangeMode,
    /// Who committed first
    pub owner: Party,
    /// The counterpart's value
    pub contribution: u32,
    /// The owner's revealed value
    pub generated: u32,
    pub combined: u32,
    pub key: SecretKey,
    pub digest: CommitmentDigest,
}

impl ExchangeResult {
    /// Recompute the digest from the revealed key and value
    pub fn verify(&self) -> Result<()> {
        if verify_reveal(&self.key, self.generated, &self.digest) {
            Ok(())
        } else {
            Err(GameError::CommitmentViolation {
                value: self.generated,
                digest: self.digest.to_string(),
            })
        }
    }

    /// Whether the counterpart guessed the owner's value (first-move rule)
    pub fn counterpart_wins(&self) -> bool {
        self.contribution == self.generated
    }

    /// The face of `die` selected by this exchange's combined index
    pub fn face(&self, die: &Die) -> Face {
        die.face(self.combined)
    }
}

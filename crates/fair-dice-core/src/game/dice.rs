//! Dice, the set of dice in play, and the pool players choose from.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of faces on every die
pub const FACES: usize = 6;

/// Fewest dice a session can be played with
pub const MIN_DICE: usize = 3;

/// Face value of a die
pub type Face = u64;

/// A six-sided die with arbitrary (possibly repeated) face values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die([Face; FACES]);

impl Die {
    pub fn faces(&self) -> &[Face; FACES] {
        &self.0
    }

    /// Face at a combined exchange index (0-based, wraps at six)
    pub fn face(&self, index: u32) -> Face {
        self.0[index as usize % FACES]
    }

    /// Parse a comma-separated spec, reporting errors against die `index`
    pub fn parse_indexed(spec: &str, index: usize) -> Result<Self, ConfigError> {
        let parts: Vec<&str> = spec.split(',').collect();
        if parts.len() != FACES {
            return Err(ConfigError::WrongFaceCount {
                index,
                found: parts.len(),
            });
        }
        let mut faces = [0; FACES];
        for (slot, part) in faces.iter_mut().zip(parts) {
            let digits_only = !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
            *slot = digits_only
                .then(|| part.parse::<Face>().ok())
                .flatten()
                .ok_or_else(|| ConfigError::InvalidFace {
                    index,
                    value: part.to_string(),
                })?;
        }
        Ok(Self(faces))
    }
}

impl FromStr for Die {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_indexed(s, 0)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.0.iter().map(Face::to_string).collect();
        write!(f, "{}", faces.join(","))
    }
}

/// The dice supplied for a session, at least three of them
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DieSet(Vec<Die>);

impl DieSet {
    pub fn new(dice: Vec<Die>) -> Result<Self, ConfigError> {
        if dice.len() < MIN_DICE {
            return Err(ConfigError::TooFewDice {
                found: dice.len(),
                required: MIN_DICE,
            });
        }
        Ok(Self(dice))
    }

    /// Parse one spec per die, e.g. `["1,2,3,4,5,6", "6,5,4,3,2,1", "3,3,3,3,3,3"]`
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> Result<Self, ConfigError> {
        let dice = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| Die::parse_indexed(spec.as_ref(), index))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(dice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.0.iter()
    }

    /// A fresh pool holding every die
    pub fn pool(&self) -> DiePool {
        DiePool {
            available: self.0.iter().copied().enumerate().collect(),
        }
    }
}

/// A die as picked by a player: its index in the [`DieSet`] and its faces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedDie {
    pub index: usize,
    pub die: Die,
}

/// Dice still available to choose from.
///
/// Choices address positions in the pool, so after the first pick the
/// second mover sees the remaining dice renumbered from zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiePool {
    available: Vec<(usize, Die)>,
}

impl DiePool {
    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// The dice in pool order, paired with their set index
    pub fn options(&self) -> Vec<PickedDie> {
        self.available
            .iter()
            .map(|&(index, die)| PickedDie { index, die })
            .collect()
    }

    /// Remove and return the die at pool `position`
    pub fn take(&mut self, position: usize) -> Option<PickedDie> {
        if position >= self.available.len() {
            return None;
        }
        let (index, die) = self.available.remove(position);
        Some(PickedDie { index, die })
    }
}

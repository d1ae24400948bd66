//! Entropy trait definition.

use crate::crypto::SecretKey;
use rand::rngs::ThreadRng;
use rand::{Rng, RngCore};

/// Source of randomness for the computer's side of the game
///
/// Implementations can be:
/// - SecureEntropy for real games
/// - ScriptedEntropy for deterministic tests
pub trait Entropy {
    /// Draw a fresh 256-bit commitment key
    fn secret_key(&mut self) -> SecretKey;

    /// Draw a uniformly random 32-bit word
    fn next_word(&mut self) -> u32;

    /// Pick an index in `0..len`; `len` is never zero
    fn pick(&mut self, len: usize) -> usize;
}

/// Cryptographically secure entropy backed by the thread-local CSPRNG
#[derive(Default)]
pub struct SecureEntropy {
    rng: ThreadRng,
}

impl SecureEntropy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Entropy for SecureEntropy {
    fn secret_key(&mut self) -> SecretKey {
        let mut bytes = [0u8; 32];
        self.rng.fill_bytes(&mut bytes);
        SecretKey::from_bytes(bytes)
    }

    fn next_word(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

impl<E: Entropy + ?Sized> Entropy for &mut E {
    fn secret_key(&mut self) -> SecretKey {
        (**self).secret_key()
    }

    fn next_word(&mut self) -> u32 {
        (**self).next_word()
    }

    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

//! Scripted entropy for testing.

use super::traits::Entropy;
use crate::crypto::SecretKey;
use std::collections::VecDeque;

/// Deterministic entropy that replays pre-loaded words and picks
///
/// Keys are `[1; 32]`, `[2; 32]`, ... in draw order. Running past the end of
/// the script panics, which surfaces as a failed test when a flow draws more
/// randomness than expected.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEntropy {
    words: VecDeque<u32>,
    picks: VecDeque<usize>,
    keys_drawn: usize,
    words_drawn: usize,
    picks_drawn: usize,
}

impl ScriptedEntropy {
    /// Create with the given words, no picks
    pub fn new(words: impl IntoIterator<Item = u32>) -> Self {
        Self {
            words: words.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Add picks for the computer's die choices
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn keys_drawn(&self) -> usize {
        self.keys_drawn
    }

    pub fn words_drawn(&self) -> usize {
        self.words_drawn
    }

    pub fn picks_drawn(&self) -> usize {
        self.picks_drawn
    }

    /// Words and picks not consumed yet
    pub fn remaining(&self) -> (usize, usize) {
        (self.words.len(), self.picks.len())
    }

    fn key_for(n: usize) -> SecretKey {
        SecretKey::from_bytes([n as u8; 32])
    }
}

impl Entropy for ScriptedEntropy {
    fn secret_key(&mut self) -> SecretKey {
        self.keys_drawn += 1;
        Self::key_for(self.keys_drawn)
    }

    fn next_word(&mut self) -> u32 {
        self.words_drawn += 1;
        self.words
            .pop_front()
            .unwrap_or_else(|| panic!("script exhausted after {} words", self.words_drawn - 1))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.picks_drawn += 1;
        let pick = self
            .picks
            .pop_front()
            .unwrap_or_else(|| panic!("script exhausted after {} picks", self.picks_drawn - 1));
        assert!(pick < len, "scripted pick {} out of range 0..{}", pick, len);
        pick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_words_in_order() {
        let mut entropy = ScriptedEntropy::new([7, 1, 3]);
        assert_eq!(entropy.next_word(), 7);
        assert_eq!(entropy.next_word(), 1);
        assert_eq!(entropy.words_drawn(), 2);
        assert_eq!(entropy.remaining(), (1, 0));
    }

    #[test]
    fn test_keys_are_distinct_and_predictable() {
        let mut entropy = ScriptedEntropy::default();
        let first = entropy.secret_key();
        assert_eq!(first, SecretKey::from_bytes([1; 32]));
        assert_ne!(first, entropy.secret_key());
        assert_eq!(entropy.keys_drawn(), 2);
    }

    #[test]
    #[should_panic(expected = "script exhausted")]
    fn test_exhausted_script_panics() {
        let mut entropy = ScriptedEntropy::new([]);
        entropy.next_word();
    }

    #[test]
    fn test_picks() {
        let mut entropy = ScriptedEntropy::new([]).with_picks([2, 0]);
        assert_eq!(entropy.pick(3), 2);
        assert_eq!(entropy.pick(2), 0);
        assert_eq!(entropy.picks_drawn(), 2);
    }
}

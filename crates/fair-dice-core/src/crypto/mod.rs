//! Cryptographic primitives for the fair dice game.
//!
//! This module provides:
//! - SecretKey and CommitmentDigest for the commit-reveal scheme
//! - Commitment and Reveal, the hidden and opened forms of a committed value
//! - CommitmentGenerator, which draws a value in a range and commits to it

mod commitment;
mod generator;

pub use commitment::{verify_reveal, Commitment, CommitmentDigest, Reveal, SecretKey};
pub use generator::CommitmentGenerator;

//! Secret keys, digests and commitments for the commit-reveal scheme.
//!
//! digest = HMAC-SHA256(key, SHA3-256(value))
//!
//! The key is keyed in by its uppercase hex text and the inner hash is fed as
//! lowercase hex text, so anyone can re-check a revealed round with an
//! off-the-shelf HMAC calculator using exactly what was printed.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;

/// 256-bit secret key for a single commitment
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKey(#[serde(with = "upper_hex")] [u8; 32]);

impl SecretKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Uppercase hex rendering, which is also the HMAC key material
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    fn mac(&self, value: u32) -> HmacSha256 {
        let inner = hex::encode(Sha3_256::digest(value.to_string().as_bytes()));
        let mut mac = HmacSha256::new_from_slice(self.to_hex().as_bytes())
            .expect("HMAC can take a key of any size");
        mac.update(inner.as_bytes());
        mac
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({}..)", hex::encode_upper(&self.0[..4]))
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Published binding to a committed value
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitmentDigest(#[serde(with = "upper_hex")] [u8; 32]);

impl CommitmentDigest {
    /// Compute the digest of `value` under `key`
    pub fn compute(key: &SecretKey, value: u32) -> Self {
        Self(key.mac(value).finalize().into_bytes().into())
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for CommitmentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitmentDigest({})", hex::encode_upper(&self.0[..8]))
    }
}

impl fmt::Display for CommitmentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl FromStr for CommitmentDigest {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim(), &mut bytes)?;
        Ok(Self(bytes))
    }
}

/// Check a revealed `(key, value)` pair against a previously published digest.
///
/// The comparison runs in constant time.
pub fn verify_reveal(key: &SecretKey, value: u32, digest: &CommitmentDigest) -> bool {
    key.mac(value).verify_slice(digest.as_bytes()).is_ok()
}

/// A committed value together with its opening.
///
/// Only the digest may be shown before the reveal step.
#[derive(Clone, PartialEq, Eq)]
pub struct Commitment {
    key: SecretKey,
    value: u32,
    digest: CommitmentDigest,
}

impl Commitment {
    /// Commit to `value` under `key`
    pub fn new(value: u32, key: SecretKey) -> Self {
        let digest = CommitmentDigest::compute(&key, value);
        Self { key, value, digest }
    }

    /// The publishable digest
    pub fn digest(&self) -> &CommitmentDigest {
        &self.digest
    }

    /// Recompute the digest from the opening and compare
    pub fn verify(&self) -> bool {
        verify_reveal(&self.key, self.value, &self.digest)
    }

    /// Open the commitment
    pub fn reveal(self) -> Reveal {
        Reveal {
            key: self.key,
            value: self.value,
            digest: self.digest,
        }
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({:?})", self.digest)
    }
}

/// An opened commitment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub key: SecretKey,
    pub value: u32,
    pub digest: CommitmentDigest,
}

impl Reveal {
    /// Whether the opening matches the digest it was published with
    pub fn verify(&self) -> bool {
        verify_reveal(&self.key, self.value, &self.digest)
    }
}

mod upper_hex {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        hex::encode_upper(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let hex_str = String::deserialize(d)?;
        let mut arr = [0u8; 32];
        hex::decode_to_slice(&hex_str, &mut arr).map_err(serde::de::Error::custom)?;
        Ok(arr)
    }
}

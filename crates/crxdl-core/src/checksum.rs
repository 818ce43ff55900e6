//! SHA-256 digests of downloaded packages.
//!
//! Packages are small and already in memory after the GET, so the digest is
//! taken from the body rather than by reading the file back.

use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const HEX_LEN: usize = 64;

/// Lowercase hex SHA-256, either computed or supplied by the user to verify against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Hex(String);

impl Sha256Hex {
    pub fn of(data: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(data)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected {HEX_LEN} hex characters for a SHA-256 digest, got {0:?}")]
pub struct MalformedDigest(pub String);

impl FromStr for Sha256Hex {
    type Err = MalformedDigest;

    /// Accepts upper or lower case, surrounding whitespace and the
    /// `sha256sum` layout (`<hex>  <file>`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = s.split_whitespace().next().unwrap_or("");
        if candidate.len() != HEX_LEN || hex::decode(candidate).is_err() {
            return Err(MalformedDigest(s.to_string()));
        }
        Ok(Self(candidate.to_ascii_lowercase()))
    }
}

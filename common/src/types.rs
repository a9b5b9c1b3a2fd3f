// common/src/types.rs
//! On-chain identifiers: addresses, object ids, digests and object references.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::Fault;

pub const ADDRESS_LENGTH: usize = 32;
pub const DIGEST_LENGTH: usize = 32;

/// A 32-byte account address. Object ids share the same representation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SuiAddress(pub [u8; ADDRESS_LENGTH]);

pub type ObjectID = SuiAddress;

impl SuiAddress {
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for SuiAddress {
    type Err = Fault;

    /// Accepts `0x`-prefixed hex, short forms included (`0x2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if digits.is_empty() || digits.len() > ADDRESS_LENGTH * 2 {
            return Err(Fault::InvalidConfig(format!("invalid address '{}'", s)));
        }
        let padded = format!("{:0>64}", digits);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| Fault::InvalidConfig(format!("invalid address '{}': {}", s, e)))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiAddress({})", self.to_hex())
    }
}

/// 32-byte digest rendered as Base58.
///
/// BCS encodes digests as byte vectors (length prefix included), unlike
/// addresses which are fixed arrays.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; DIGEST_LENGTH]);

pub type ObjectDigest = Digest;
pub type TransactionDigest = Digest;

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl FromStr for Digest {
    type Err = Fault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| Fault::MalformedResponse(format!("invalid digest '{}': {}", s, e)))?;
        let arr: [u8; DIGEST_LENGTH] = bytes.try_into().map_err(|v: Vec<u8>| {
            Fault::MalformedResponse(format!("digest '{}' has {} bytes, expected 32", s, v.len()))
        })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self)
    }
}

/// `(id, version, digest)` as the chain identifies one version of an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ObjectRef {
    pub object_id: ObjectID,
    pub version: u64,
    pub digest: ObjectDigest,
}

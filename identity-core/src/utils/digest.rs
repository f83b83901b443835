// identity-core/src/utils/digest.rs
//
// 32-byte object and transaction digests. Text form is base58 (bitcoin alphabet).

use crate::crypto::hash::{blake2b256, DIGEST_LENGTH};
use crate::error::ParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Domain prefix hashed in front of BCS `TransactionData` to get its digest.
pub const TRANSACTION_DATA_PREFIX: &[u8] = b"TransactionData::";

fn decode_base58(text: &str) -> Result<[u8; DIGEST_LENGTH], ParseError> {
    let bytes = bs58::decode(text.trim())
        .into_vec()
        .map_err(|e| ParseError::Digest(format!("invalid base58: {}", e)))?;
    <[u8; DIGEST_LENGTH]>::try_from(bytes.as_slice()).map_err(|_| {
        ParseError::Digest(format!(
            "expected {} bytes, got {}",
            DIGEST_LENGTH,
            bytes.len()
        ))
    })
}

macro_rules! digest_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name([u8; DIGEST_LENGTH]);

        impl $name {
            pub const ZERO: $name = $name([0u8; DIGEST_LENGTH]);

            #[inline]
            pub const fn new(bytes: [u8; DIGEST_LENGTH]) -> Self {
                Self(bytes)
            }

            #[inline]
            pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
                &self.0
            }

            pub fn to_base58(&self) -> String {
                bs58::encode(self.0).into_string()
            }

            pub fn from_base58(text: &str) -> Result<Self, ParseError> {
                decode_base58(text).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_base58())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_base58())
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_base58(s)
            }
        }

        impl From<[u8; DIGEST_LENGTH]> for $name {
            fn from(bytes: [u8; DIGEST_LENGTH]) -> Self {
                Self(bytes)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.serialize_str(&self.to_base58())
                } else {
                    // BCS: length-prefixed byte vector
                    serializer.serialize_bytes(&self.0)
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                if deserializer.is_human_readable() {
                    let text = String::deserialize(deserializer)?;
                    Self::from_base58(&text).map_err(serde::de::Error::custom)
                } else {
                    let bytes = Vec::<u8>::deserialize(deserializer)?;
                    <[u8; DIGEST_LENGTH]>::try_from(bytes.as_slice())
                        .map(Self)
                        .map_err(|_| serde::de::Error::invalid_length(bytes.len(), &"32 bytes"))
                }
            }
        }
    };
}

digest_type!(
    /// Digest of an object version.
    ObjectDigest
);

digest_type!(
    /// Digest of a transaction: `blake2b-256("TransactionData::" ‖ BCS(tx))`.
    TransactionDigest
);

impl TransactionDigest {
    /// Digest of already BCS-serialized `TransactionData`.
    pub fn from_tx_bytes(tx_bytes: &[u8]) -> Self {
        Self(blake2b256(&[TRANSACTION_DATA_PREFIX, tx_bytes]))
    }
}

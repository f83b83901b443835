// identity-core/src/chains/sui/address.rs
//
// Sui Address Module
//
// # Flow:  flag (1B) ‖ Public Key (32B | 33B) → blake2b-256 → Address (32B)
//
// Text form: "0x" + 64 lowercase hex characters. Short forms such as "0x2"
// are accepted on input and left-padded with zeros.

use crate::crypto::hash::{blake2b256, DIGEST_LENGTH};
use crate::crypto::scheme::SignatureScheme;
use crate::error::{CryptoError, KeyError, KeyResult, ParseError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// Derive the `0x…` address string of a public key.
///
/// Rejects an empty key and a key whose length does not match `scheme`.
pub fn address_from_public_key(scheme: SignatureScheme, public_key: &[u8]) -> KeyResult<String> {
    Ok(SuiAddress::from_public_key(scheme, public_key)?.to_hex())
}

/// 32-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SuiAddress([u8; ADDRESS_LENGTH]);

impl SuiAddress {
    pub const ZERO: SuiAddress = SuiAddress([0u8; ADDRESS_LENGTH]);

    #[inline]
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// `blake2b-256(flag ‖ public_key)`
    pub fn from_public_key(scheme: SignatureScheme, public_key: &[u8]) -> KeyResult<Self> {
        if public_key.is_empty() || public_key.len() != scheme.public_key_length() {
            return Err(KeyError::crypto(
                scheme,
                CryptoError::InvalidLength {
                    what: "public key",
                    expected: scheme.public_key_length(),
                    actual: public_key.len(),
                },
            ));
        }

        Ok(Self::hash_public_key(scheme, public_key))
    }

    /// Hash without the length check, for keys the crate produced itself.
    pub(crate) fn hash_public_key(scheme: SignatureScheme, public_key: &[u8]) -> Self {
        let digest: [u8; DIGEST_LENGTH] = blake2b256(&[&[scheme.flag()], public_key]);
        Self(digest)
    }

    /// Parse `0x`-prefixed (or bare) hex of at most 64 digits.
    pub fn from_hex(text: &str) -> Result<Self, ParseError> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        if digits.is_empty() || digits.len() > ADDRESS_LENGTH * 2 {
            return Err(ParseError::Address(format!(
                "expected 1 to {} hex digits, got {}",
                ADDRESS_LENGTH * 2,
                digits.len()
            )));
        }

        let padded = format!("{:0>width$}", digits, width = ADDRESS_LENGTH * 2);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| ParseError::Address(format!("invalid hex '{}': {}", text, e)))?;
        Ok(Self(bytes))
    }

    /// Always 66 characters.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    #[inline]
    pub fn into_bytes(self) -> [u8; ADDRESS_LENGTH] {
        self.0
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

impl FromStr for SuiAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim())
    }
}

impl From<[u8; ADDRESS_LENGTH]> for SuiAddress {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for SuiAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for SuiAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            // BCS: fixed 32 bytes, no length prefix
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let text = String::deserialize(deserializer)?;
            Self::from_hex(&text).map_err(serde::de::Error::custom)
        } else {
            <[u8; ADDRESS_LENGTH]>::deserialize(deserializer).map(Self)
        }
    }
}

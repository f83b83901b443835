// identity-core/src/crypto/scheme.rs
//
// Signature schemes supported by the chain and their fixed parameters.

use crate::error::{KeyError, KeyResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel for a flag byte that maps to no scheme.
pub const UNKNOWN_FLAG: u8 = 0xff;

/// Signature scheme (curve) of a keypair.
///
/// | Scheme    | Flag | BIP-32 purpose | Public key |
/// |-----------|------|----------------|------------|
/// | Ed25519   | 0x00 | 44             | 32 bytes   |
/// | Secp256k1 | 0x01 | 54             | 33 bytes   |
/// | Secp256r1 | 0x02 | 74             | 33 bytes   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SignatureScheme {
    Ed25519,
    Secp256k1,
    Secp256r1,
}

impl SignatureScheme {
    pub const ALL: [SignatureScheme; 3] = [
        SignatureScheme::Ed25519,
        SignatureScheme::Secp256k1,
        SignatureScheme::Secp256r1,
    ];

    /// Address / envelope flag byte.
    #[inline]
    pub const fn flag(self) -> u8 {
        match self {
            SignatureScheme::Ed25519 => 0x00,
            SignatureScheme::Secp256k1 => 0x01,
            SignatureScheme::Secp256r1 => 0x02,
        }
    }

    /// First (hardened) segment of a derivation path for this scheme.
    #[inline]
    pub const fn purpose(self) -> u32 {
        match self {
            SignatureScheme::Ed25519 => 44,
            SignatureScheme::Secp256k1 => 54,
            SignatureScheme::Secp256r1 => 74,
        }
    }

    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            SignatureScheme::Ed25519 => "ed25519",
            SignatureScheme::Secp256k1 => "secp256k1",
            SignatureScheme::Secp256r1 => "secp256r1",
        }
    }

    /// Length of the public key encoding (raw Ed25519 or compressed SEC1).
    #[inline]
    pub const fn public_key_length(self) -> usize {
        match self {
            SignatureScheme::Ed25519 => 32,
            SignatureScheme::Secp256k1 | SignatureScheme::Secp256r1 => 33,
        }
    }

    /// Total length of a `flag ‖ sig ‖ pubkey` envelope.
    #[inline]
    pub const fn envelope_length(self) -> usize {
        1 + crate::chains::sui::envelope::SIGNATURE_LENGTH + self.public_key_length()
    }

    /// Map a flag byte to a scheme, returning [`UNKNOWN_FLAG`] semantics as an error.
    pub fn from_flag(flag: u8) -> KeyResult<Self> {
        match Self::resolve_flag(flag) {
            UNKNOWN_FLAG => Err(KeyError::UnsupportedScheme(flag)),
            known => Ok(Self::ALL[known as usize]),
        }
    }

    /// Normalise a flag byte: known flags map to themselves, everything else to the sentinel.
    #[inline]
    fn resolve_flag(flag: u8) -> u8 {
        match flag {
            0x00..=0x02 => flag,
            _ => UNKNOWN_FLAG,
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SignatureScheme {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.label().eq_ignore_ascii_case(s.trim()))
            .ok_or(KeyError::UnsupportedScheme(UNKNOWN_FLAG))
    }
}

impl TryFrom<String> for SignatureScheme {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SignatureScheme> for String {
    fn from(scheme: SignatureScheme) -> Self {
        scheme.label().to_string()
    }
}

impl TryFrom<u8> for SignatureScheme {
    type Error = KeyError;

    fn try_from(flag: u8) -> Result<Self, Self::Error> {
        Self::from_flag(flag)
    }
}

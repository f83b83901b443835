// identity-core/src/keypair/public_key.rs
//
// Scheme-tagged public key: what a verifier needs and what an address hashes.

use super::verify_envelope;
use crate::chains::sui::address::SuiAddress;
use crate::chains::sui::signer;
use crate::crypto::scheme::{SignatureScheme, UNKNOWN_FLAG};
use crate::error::{CryptoError, KeyError, KeyResult, ParseError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SuiPublicKey {
    scheme: SignatureScheme,
    bytes: Vec<u8>,
}

impl SuiPublicKey {
    /// Wrap raw public key bytes, checking the length for `scheme`.
    pub fn new(scheme: SignatureScheme, bytes: &[u8]) -> KeyResult<Self> {
        if bytes.len() != scheme.public_key_length() {
            return Err(KeyError::crypto(
                scheme,
                CryptoError::InvalidLength {
                    what: "public key",
                    expected: scheme.public_key_length(),
                    actual: bytes.len(),
                },
            ));
        }
        Ok(Self {
            scheme,
            bytes: bytes.to_vec(),
        })
    }

    pub(crate) fn from_parts(scheme: SignatureScheme, bytes: Vec<u8>) -> Self {
        Self { scheme, bytes }
    }

    /// Parse `flag ‖ public_key`.
    pub fn from_sui_bytes(bytes: &[u8]) -> KeyResult<Self> {
        let (&flag, key) = bytes
            .split_first()
            .ok_or(KeyError::UnsupportedScheme(UNKNOWN_FLAG))?;
        Self::new(SignatureScheme::from_flag(flag)?, key)
    }

    /// Parse base64 of `flag ‖ public_key`.
    pub fn from_base64(text: &str) -> KeyResult<Self> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| ParseError::Signature(format!("invalid base64 public key: {}", e)))?;
        Self::from_sui_bytes(&bytes)
    }

    #[inline]
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    #[inline]
    pub fn flag(&self) -> u8 {
        self.scheme.flag()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `flag ‖ public_key`
    pub fn to_sui_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.bytes.len());
        out.push(self.flag());
        out.extend_from_slice(&self.bytes);
        out
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_sui_bytes())
    }

    pub fn address(&self) -> KeyResult<SuiAddress> {
        SuiAddress::from_public_key(self.scheme, &self.bytes)
    }

    /// Check a serialized signature over a personal message.
    pub fn verify_personal_message(&self, message: &[u8], signature: &[u8]) -> KeyResult<()> {
        signer::verify_personal_message(self.scheme, message, signature, |digest, envelope| {
            verify_envelope(self.scheme, &self.bytes, digest, envelope)
        })
    }

    /// Check a serialized signature over BCS transaction bytes.
    pub fn verify_transaction(&self, tx_bytes: &[u8], signature: &[u8]) -> KeyResult<()> {
        signer::verify_transaction(self.scheme, tx_bytes, signature, |digest, envelope| {
            verify_envelope(self.scheme, &self.bytes, digest, envelope)
        })
    }
}

impl fmt::Debug for SuiPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiPublicKey({}, {})", self.scheme, hex::encode(&self.bytes))
    }
}

impl fmt::Display for SuiPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ED25519_PK: &str = "1e77545bd8f4b8ca78eb5b22af228e89124bcaee3be1d78bc2f0838f61136199";

    #[test]
    fn test_length_checked() {
        assert!(SuiPublicKey::new(SignatureScheme::Ed25519, &[0u8; 33]).is_err());
        assert!(SuiPublicKey::new(SignatureScheme::Secp256k1, &[0u8; 32]).is_err());
        assert!(SuiPublicKey::new(SignatureScheme::Secp256r1, &[2u8; 33]).is_ok());
    }

    #[test]
    fn test_sui_bytes_round_trip() {
        let pk = SuiPublicKey::new(SignatureScheme::Ed25519, &hex::decode(ED25519_PK).unwrap()).unwrap();
        let raw = pk.to_sui_bytes();
        assert_eq!(raw[0], 0x00);
        assert_eq!(raw.len(), 33);
        assert_eq!(SuiPublicKey::from_sui_bytes(&raw).unwrap(), pk);
        assert_eq!(SuiPublicKey::from_base64(&pk.to_base64()).unwrap(), pk);
        assert_eq!(
            pk.address().unwrap().to_string(),
            "0x55d07fa035a02cf143f2bea4aa34bbac516560c9386a077af3fd30f169fc2cc2"
        );
    }

    #[test]
    fn test_from_sui_bytes_rejects_unknown_flag() {
        assert_eq!(
            SuiPublicKey::from_sui_bytes(&[0x07; 33]),
            Err(KeyError::UnsupportedScheme(0x07))
        );
        assert!(SuiPublicKey::from_sui_bytes(&[]).is_err());
    }
}

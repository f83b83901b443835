// identity-core/src/chains/sui/envelope.rs
//
// Serialized signature: flag(1) ‖ sig(64) ‖ pubkey(32 | 33)
//
//   Ed25519    97 bytes   0x00 ‖ sig64 ‖ pk32
//   Secp256k1  98 bytes   0x01 ‖ r32 ‖ s32 ‖ pk33
//   Secp256r1  98 bytes   0x02 ‖ r32 ‖ s32 ‖ pk33

use crate::crypto::scheme::SignatureScheme;
use crate::error::{CryptoError, KeyError, KeyResult, ParseError};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Raw signature length for every supported scheme.
pub const SIGNATURE_LENGTH: usize = 64;

/// `flag ‖ signature ‖ public_key`
pub fn assemble(scheme: SignatureScheme, signature: &[u8; SIGNATURE_LENGTH], public_key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(scheme.envelope_length());
    out.push(scheme.flag());
    out.extend_from_slice(signature);
    out.extend_from_slice(public_key);
    out
}

/// A parsed, length-checked signature envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureEnvelope {
    scheme: SignatureScheme,
    signature: [u8; SIGNATURE_LENGTH],
    public_key: Vec<u8>,
}

impl SignatureEnvelope {
    /// Split raw envelope bytes, checking the flag and the per-scheme length.
    pub fn from_bytes(bytes: &[u8]) -> KeyResult<Self> {
        let flag = *bytes
            .first()
            .ok_or_else(|| ParseError::Signature("empty signature envelope".to_string()))?;
        let scheme = SignatureScheme::from_flag(flag)?;
        if bytes.len() != scheme.envelope_length() {
            return Err(KeyError::crypto(
                scheme,
                CryptoError::InvalidLength {
                    what: "signature envelope",
                    expected: scheme.envelope_length(),
                    actual: bytes.len(),
                },
            ));
        }

        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature.copy_from_slice(&bytes[1..1 + SIGNATURE_LENGTH]);
        Ok(Self {
            scheme,
            signature,
            public_key: bytes[1 + SIGNATURE_LENGTH..].to_vec(),
        })
    }

    /// Decode the standard-alphabet base64 text form.
    pub fn from_base64(text: &str) -> KeyResult<Self> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| ParseError::Signature(format!("invalid base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    #[inline]
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    #[inline]
    pub fn signature(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.signature
    }

    #[inline]
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        assemble(self.scheme, &self.signature, &self.public_key)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }
}

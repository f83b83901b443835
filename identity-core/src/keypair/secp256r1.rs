// identity-core/src/keypair/secp256r1.rs
//
// Secp256r1 (P-256) KeyPair
//
// - Derivation walks BIP-32 on the secp256k1 group (see key_deriver::bip32);
//   the final 32 bytes must then also be a valid P-256 scalar.
// - Signing uses the in-crate RFC 6979 signer over SHA-256(digest), low-S.

use super::rfc6979;
use crate::chains::sui::envelope::SIGNATURE_LENGTH;
use crate::crypto::hash::DIGEST_LENGTH;
use crate::crypto::key_deriver::{bip32, ExtendedKey, KeyDeriver};
use crate::crypto::paths::{DerivationPath, PathSegment};
use crate::crypto::scheme::SignatureScheme;
use crate::error::{CryptoError, KeyError, KeyResult};
use crate::utils::bytes::{ct_eq, to_array32};
use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{FieldBytes, SecretKey};
use rand::rngs::OsRng;
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

const SCHEME: SignatureScheme = SignatureScheme::Secp256r1;

/// Length of a compressed SEC1 public key.
pub const PUBLIC_KEY_LENGTH: usize = 33;

fn err(kind: CryptoError) -> KeyError {
    KeyError::crypto(SCHEME, kind)
}

#[derive(Clone)]
pub struct Secp256r1KeyPair {
    // SecretKey wipes its scalar on drop
    secret: SecretKey,
    public: [u8; PUBLIC_KEY_LENGTH],
}

// Secret never printed
impl fmt::Debug for Secp256r1KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256r1KeyPair")
            .field("public_key", &hex::encode(self.public_key_bytes()))
            .finish_non_exhaustive()
    }
}

impl Secp256r1KeyPair {
    pub fn generate() -> Self {
        Self::from_secret_key(SecretKey::random(&mut OsRng))
    }

    /// Import a 32-byte big-endian scalar `d` with `0 < d < n_p256`.
    pub fn from_secret(secret: &[u8]) -> KeyResult<Self> {
        let bytes = Zeroizing::new(to_array32("secret key", secret).map_err(err)?);
        let secret = SecretKey::from_bytes(FieldBytes::from_slice(&bytes[..]))
            .map_err(|_| err(CryptoError::ScalarOutOfRange))?;
        Ok(Self::from_secret_key(secret))
    }

    fn from_secret_key(secret: SecretKey) -> Self {
        let encoded = secret.public_key().to_encoded_point(true);
        let mut public = [0u8; PUBLIC_KEY_LENGTH];
        public.copy_from_slice(encoded.as_bytes());
        Self { secret, public }
    }

    /// Walk BIP-32 (secp256k1 group) from a BIP-39 seed and reinterpret the
    /// result on P-256. Fails when the final scalar is not below the P-256 order.
    pub fn derive(seed: &[u8], path: &DerivationPath) -> KeyResult<(Self, ExtendedKey)> {
        let node = KeyDeriver::derive(SCHEME, seed, path)?;
        let keypair = Self::from_secret(node.key())?;
        Ok((keypair, node))
    }

    /// One BIP-32 step below `parent`, still on the secp256k1 group.
    pub(crate) fn derive_child_node(
        parent: &ExtendedKey,
        segment: PathSegment,
    ) -> KeyResult<(Self, ExtendedKey)> {
        let node = bip32::derive_child::<k256::Secp256k1, _>(
            parent,
            segment,
            bip32::secp256k1_public_key,
        )
        .map_err(err)?;
        let keypair = Self::from_secret(node.key())?;
        Ok((keypair, node))
    }

    #[inline]
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.public
    }

    pub fn secret_bytes(&self) -> Zeroizing<[u8; 32]> {
        let mut repr = self.secret.to_bytes();
        let mut out = Zeroizing::new([0u8; 32]);
        out.copy_from_slice(&repr);
        repr.as_mut_slice().zeroize();
        out
    }

    /// RFC 6979 ECDSA over `SHA-256(digest)`, `s ≤ n/2`.
    pub fn sign_digest(&self, digest: &[u8; DIGEST_LENGTH]) -> KeyResult<[u8; SIGNATURE_LENGTH]> {
        let secret = self.secret_bytes();
        rfc6979::sign(&secret, digest).map_err(err)
    }
}

/// Verify a 98-byte `0x02 ‖ r ‖ s ‖ pk` envelope over `digest` against `public_key`.
pub fn verify(public_key: &[u8], digest: &[u8; DIGEST_LENGTH], envelope: &[u8]) -> KeyResult<()> {
    if public_key.len() != PUBLIC_KEY_LENGTH {
        return Err(err(CryptoError::InvalidLength {
            what: "public key",
            expected: PUBLIC_KEY_LENGTH,
            actual: public_key.len(),
        }));
    }
    if envelope.len() != SCHEME.envelope_length() {
        return Err(err(CryptoError::InvalidLength {
            what: "signature",
            expected: SCHEME.envelope_length(),
            actual: envelope.len(),
        }));
    }
    if envelope[0] != SCHEME.flag() {
        return Err(err(CryptoError::InvalidSignature(format!(
            "unexpected flag {:#04x}",
            envelope[0]
        ))));
    }
    if !ct_eq(&envelope[1 + SIGNATURE_LENGTH..], public_key) {
        return Err(err(CryptoError::InvalidSignature(
            "public key does not match signature".to_string(),
        )));
    }

    let verifying_key = VerifyingKey::from_sec1_bytes(public_key)
        .map_err(|e| err(CryptoError::InvalidKey(e.to_string())))?;
    let signature = Signature::from_slice(&envelope[1..1 + SIGNATURE_LENGTH])
        .map_err(|e| err(CryptoError::InvalidSignature(e.to_string())))?;

    verifying_key
        .verify(digest, &signature)
        .map_err(|_| err(CryptoError::VerificationFailed))
}

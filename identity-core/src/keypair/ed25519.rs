// identity-core/src/keypair/ed25519.rs
//
// Ed25519 KeyPair
//
// Private material is the 32-byte seed (the SLIP-0010 node key when derived);
// ed25519-dalek expands it to the 64-byte signing secret internally and wipes
// both on drop.

use crate::chains::sui::envelope::SIGNATURE_LENGTH;
use crate::crypto::hash::DIGEST_LENGTH;
use crate::crypto::key_deriver::{slip10, ExtendedKey, KeyDeriver};
use crate::crypto::paths::{DerivationPath, PathSegment};
use crate::crypto::scheme::SignatureScheme;
use crate::error::{CryptoError, KeyError, KeyResult};
use crate::utils::bytes::{ct_eq, to_array32};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;
use zeroize::Zeroizing;

const SCHEME: SignatureScheme = SignatureScheme::Ed25519;

/// Length of a raw Ed25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

fn err(kind: CryptoError) -> KeyError {
    KeyError::crypto(SCHEME, kind)
}

#[derive(Clone)]
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
}

// Secret never printed
impl fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("public_key", &hex::encode(self.public_key_bytes()))
            .finish_non_exhaustive()
    }
}

impl Ed25519KeyPair {
    /// Fresh key from `OsRng`.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Import a 32-byte seed. Any other length is rejected.
    pub fn from_secret(secret: &[u8]) -> KeyResult<Self> {
        let seed = Zeroizing::new(to_array32("secret key", secret).map_err(err)?);
        Ok(Self {
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    /// Walk SLIP-0010 from a BIP-39 seed. Every segment of `path` must be hardened.
    ///
    /// Returns the keypair and the final node so the caller can keep the chain code.
    pub fn derive(seed: &[u8], path: &DerivationPath) -> KeyResult<(Self, ExtendedKey)> {
        let node = KeyDeriver::derive(SCHEME, seed, path)?;
        let keypair = Self::from_node(&node)?;
        Ok((keypair, node))
    }

    /// One hardened SLIP-0010 step below `parent`.
    pub(crate) fn derive_child_node(
        parent: &ExtendedKey,
        segment: PathSegment,
    ) -> KeyResult<(Self, ExtendedKey)> {
        let node = slip10::derive_child(parent, segment).map_err(err)?;
        let keypair = Self::from_node(&node)?;
        Ok((keypair, node))
    }

    fn from_node(node: &ExtendedKey) -> KeyResult<Self> {
        Self::from_secret(node.key())
    }

    #[inline]
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// The 32-byte seed. The caller owns the returned buffer.
    #[inline]
    pub fn secret_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }

    /// Pure Ed25519 over the 32-byte intent digest.
    pub fn sign_digest(&self, digest: &[u8; DIGEST_LENGTH]) -> [u8; SIGNATURE_LENGTH] {
        self.signing_key.sign(digest).to_bytes()
    }
}

/// Verify a 97-byte `0x00 ‖ sig ‖ pk` envelope over `digest` against `public_key`.
pub fn verify(public_key: &[u8], digest: &[u8; DIGEST_LENGTH], envelope: &[u8]) -> KeyResult<()> {
    let public_key = to_array32("public key", public_key).map_err(err)?;
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
    if !ct_eq(&envelope[1 + SIGNATURE_LENGTH..], &public_key) {
        return Err(err(CryptoError::InvalidSignature(
            "public key does not match signature".to_string(),
        )));
    }

    let verifying_key = VerifyingKey::from_bytes(&public_key)
        .map_err(|e| err(CryptoError::InvalidKey(e.to_string())))?;
    let mut raw = [0u8; SIGNATURE_LENGTH];
    raw.copy_from_slice(&envelope[1..1 + SIGNATURE_LENGTH]);
    let signature = Signature::from_bytes(&raw);

    verifying_key
        .verify(digest, &signature)
        .map_err(|_| err(CryptoError::VerificationFailed))
}

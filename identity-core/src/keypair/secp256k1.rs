// identity-core/src/keypair/secp256k1.rs
//
// Secp256k1 KeyPair - ECDSA with RFC 6979 nonces, always low-S
//
// Sign and verify both run SHA-256 over the 32-byte intent digest before the
// curve operation, so the curve signs SHA-256(blake2b-256(intent ‖ msg)).

use crate::chains::sui::envelope::SIGNATURE_LENGTH;
use crate::crypto::hash::DIGEST_LENGTH;
use crate::crypto::key_deriver::{bip32, ExtendedKey, KeyDeriver};
use crate::crypto::paths::{DerivationPath, PathSegment};
use crate::crypto::scheme::SignatureScheme;
use crate::error::{CryptoError, KeyError, KeyResult};
use crate::utils::bytes::{ct_eq, to_array32};
use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::FieldBytes;
use rand::rngs::OsRng;
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

const SCHEME: SignatureScheme = SignatureScheme::Secp256k1;

/// Length of a compressed SEC1 public key.
pub const PUBLIC_KEY_LENGTH: usize = 33;

fn err(kind: CryptoError) -> KeyError {
    KeyError::crypto(SCHEME, kind)
}

#[derive(Clone)]
pub struct Secp256k1KeyPair {
    // SigningKey wipes its scalar on drop
    signing_key: SigningKey,
}

// Secret never printed
impl fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("public_key", &hex::encode(self.public_key_bytes()))
            .finish_non_exhaustive()
    }
}

impl Secp256k1KeyPair {
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// Import a 32-byte big-endian scalar `d` with `0 < d < n`.
    pub fn from_secret(secret: &[u8]) -> KeyResult<Self> {
        let bytes = Zeroizing::new(to_array32("secret key", secret).map_err(err)?);
        let signing_key = SigningKey::from_bytes(FieldBytes::from_slice(&bytes[..]))
            .map_err(|_| err(CryptoError::ScalarOutOfRange))?;
        Ok(Self { signing_key })
    }

    /// Walk BIP-32 from a BIP-39 seed; segments 3 and 4 of `path` must be non-hardened.
    pub fn derive(seed: &[u8], path: &DerivationPath) -> KeyResult<(Self, ExtendedKey)> {
        let node = KeyDeriver::derive(SCHEME, seed, path)?;
        let keypair = Self::from_secret(node.key())?;
        Ok((keypair, node))
    }

    /// One BIP-32 step below `parent`, hardened or not.
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

    /// Compressed SEC1 public key.
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        let encoded = self.signing_key.verifying_key().to_encoded_point(true);
        let mut out = [0u8; PUBLIC_KEY_LENGTH];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    #[inline]
    pub fn secret_bytes(&self) -> Zeroizing<[u8; 32]> {
        let mut repr = self.signing_key.to_bytes();
        let mut out = Zeroizing::new([0u8; 32]);
        out.copy_from_slice(&repr);
        repr.as_mut_slice().zeroize();
        out
    }

    /// `r ‖ s` over `SHA-256(digest)`, with `s ≤ n/2`.
    pub fn sign_digest(&self, digest: &[u8; DIGEST_LENGTH]) -> [u8; SIGNATURE_LENGTH] {
        let signature: Signature = self.signing_key.sign(digest);
        let signature = signature.normalize_s().unwrap_or(signature);
        let mut out = [0u8; SIGNATURE_LENGTH];
        out.copy_from_slice(&signature.to_bytes());
        out
    }
}

/// Verify a 98-byte `0x01 ‖ r ‖ s ‖ pk` envelope over `digest` against `public_key`.
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
    // rejects r or s equal to zero or ≥ n
    let signature = Signature::from_slice(&envelope[1..1 + SIGNATURE_LENGTH])
        .map_err(|e| err(CryptoError::InvalidSignature(e.to_string())))?;

    verifying_key
        .verify(digest, &signature)
        .map_err(|_| err(CryptoError::VerificationFailed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::sui::envelope::assemble;

    const SECRET: &str = "003d1186682d78ab21a86c5c740c0df762e433d0ef6c0b03bf7391ee0463a08f";
    const PUBLIC: &str = "02bd95b367a2d8781a088bdcb0054067a6ca6178437d14e5178df6a7c5a7e25b0b";
    const ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
    const HALF_ORDER: &str = "7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0";

    fn keypair() -> Secp256k1KeyPair {
        Secp256k1KeyPair::from_secret(&hex::decode(SECRET).unwrap()).unwrap()
    }

    #[test]
    fn test_from_secret_public_key() {
        assert_eq!(hex::encode(keypair().public_key_bytes()), PUBLIC);
        assert_eq!(hex::encode(&keypair().secret_bytes()[..]), SECRET);
    }

    #[test]
    fn test_from_secret_range() {
        assert_eq!(
            Secp256k1KeyPair::from_secret(&[0u8; 32]).unwrap_err(),
            err(CryptoError::ScalarOutOfRange)
        );
        let order = hex::decode(ORDER).unwrap();
        assert!(Secp256k1KeyPair::from_secret(&order).is_err());
        // short slices are not left-padded
        assert!(Secp256k1KeyPair::from_secret(&[1u8; 31]).is_err());
    }

    #[test]
    fn test_sign_is_deterministic_and_low_s() {
        let kp = keypair();
        let half: [u8; 32] = hex::decode(HALF_ORDER).unwrap().try_into().unwrap();
        for i in 0u8..16 {
            let digest = [i; 32];
            let sig = kp.sign_digest(&digest);
            assert_eq!(sig, kp.sign_digest(&digest));
            // fixed-width big-endian compare
            assert!(sig[32..] <= half[..]);
        }
    }

    #[test]
    fn test_sign_verify() {
        let kp = keypair();
        let digest = [0x42u8; 32];
        let pk = kp.public_key_bytes();
        let env = assemble(SCHEME, &kp.sign_digest(&digest), &pk);
        verify(&pk, &digest, &env).unwrap();

        let mut other = digest;
        other[31] ^= 1;
        assert!(verify(&pk, &other, &env).unwrap_err().is_verification_failure());
    }

    #[test]
    fn test_verify_rejects_overflowing_scalars() {
        let kp = keypair();
        let pk = kp.public_key_bytes();
        let mut sig = [0u8; 64];
        sig[..32].copy_from_slice(&hex::decode(ORDER).unwrap());
        sig[63] = 1;
        let env = assemble(SCHEME, &sig, &pk);
        let err = verify(&pk, &[0u8; 32], &env).unwrap_err();
        assert!(!err.is_verification_failure());
    }

    #[test]
    fn test_verify_rejects_wrong_flag_and_key() {
        let kp = keypair();
        let digest = [1u8; 32];
        let pk = kp.public_key_bytes();
        let env = assemble(SCHEME, &kp.sign_digest(&digest), &pk);

        let mut bad_flag = env.clone();
        bad_flag[0] = 0x02;
        assert!(verify(&pk, &digest, &bad_flag).is_err());

        let other = Secp256k1KeyPair::generate().public_key_bytes();
        assert!(verify(&other, &digest, &env).is_err());
        assert!(verify(&pk, &digest, &env[..97]).is_err());
    }

    #[test]
    fn test_derive_rejects_hardened_tail() {
        let seed = [9u8; 64];
        assert!(Secp256k1KeyPair::derive(&seed, &DerivationPath::parse("m/54'/784'/0'/0/0").unwrap()).is_ok());
        assert!(Secp256k1KeyPair::derive(&seed, &DerivationPath::parse("m/54'/784'/0'/0'/0").unwrap()).is_err());
    }

    #[test]
    fn test_debug_shows_public_key_only() {
        let debug = format!("{:?}", keypair());
        assert!(debug.starts_with("Secp256k1KeyPair"));
        assert!(debug.contains(PUBLIC));
        assert!(!debug.contains(SECRET));
        // unwrap_err needs Debug on the Ok side
        assert!(Secp256k1KeyPair::from_secret(&[1u8; 31]).unwrap_err().to_string().contains("length"));
    }
}

// identity-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - Multi-Curve Support
//
// ┌─────────────────────────────────────────────────┐
// │  Seed (64 bytes from BIP-39 Mnemonic)           │
// │                    │                            │
// │     ┌──────────────┴──────────────┐             │
// │     ▼                             ▼             │
// │  BIP-32 (secp256k1 group)   SLIP-0010 (ed25519) │
// │  ├─ Secp256k1  m/54'/784'/…  └─ m/44'/784'/…'   │
// │  └─ Secp256r1  m/74'/784'/…                     │
// └─────────────────────────────────────────────────┘

pub mod bip32;
pub mod slip10;

use crate::crypto::hash::HmacSha512;
use crate::crypto::paths::DerivationPath;
use crate::crypto::scheme::SignatureScheme;
use crate::error::{CryptoError, KeyError, KeyResult};
use crate::utils::bytes::{split32, take64};
use hmac::Mac;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Accepted BIP-32 seed sizes (128 to 512 bits).
pub const MIN_SEED_LENGTH: usize = 16;
pub const MAX_SEED_LENGTH: usize = 64;

// =============================================================================
// COMMON TYPES
// =============================================================================
/// One node of an HD tree: 32-byte private key material plus chain code.
///
/// Both halves are wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ExtendedKey {
    key: [u8; 32],
    chain_code: [u8; 32],
}

impl std::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKey").finish_non_exhaustive()
    }
}

impl ExtendedKey {
    pub fn new(key: [u8; 32], chain_code: [u8; 32]) -> Self {
        Self { key, chain_code }
    }

    #[inline]
    pub fn key(&self) -> &[u8; 32] {
        &self.key
    }

    #[inline]
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// `(key, chain) = split32(HMAC-SHA512(hmac_key, data...))`
    pub(crate) fn from_hmac(hmac_key: &[u8], data: &[&[u8]]) -> Result<Self, CryptoError> {
        let mut mac = HmacSha512::new_from_slice(hmac_key)
            .map_err(|e| CryptoError::Backend(format!("HMAC init failed: {}", e)))?;
        for part in data {
            mac.update(part);
        }
        let mut buf = take64(mac.finalize().into_bytes());
        let (key, chain_code) = split32(&buf);
        // Buffer chứa raw key material
        buf.zeroize();
        Ok(Self { key, chain_code })
    }
}

// =============================================================================
// UNIFIED DERIVER
// =============================================================================
/// Entry point that picks BIP-32 or SLIP-0010 from the signature scheme.
pub struct KeyDeriver;

impl KeyDeriver {
    /// Validate `path` for `scheme` and walk it from `seed`.
    ///
    /// The returned key is raw derivation output; callers still check that it
    /// is a valid scalar for their curve.
    pub fn derive(
        scheme: SignatureScheme,
        seed: &[u8],
        path: &DerivationPath,
    ) -> KeyResult<ExtendedKey> {
        Self::validate_seed(scheme, seed)?;
        path.validate_for_scheme(scheme)?;

        tracing::debug!(%scheme, %path, "deriving key");
        let node = match scheme {
            SignatureScheme::Ed25519 => slip10::derive_path(seed, path),
            // Secp256r1 walks the secp256k1 group too; see `bip32` module docs.
            SignatureScheme::Secp256k1 | SignatureScheme::Secp256r1 => {
                bip32::derive_path::<k256::Secp256k1, _>(seed, path, bip32::secp256k1_public_key)
            }
        };
        node.map_err(|kind| KeyError::crypto(scheme, kind))
    }

    #[inline]
    fn validate_seed(scheme: SignatureScheme, seed: &[u8]) -> KeyResult<()> {
        if !(MIN_SEED_LENGTH..=MAX_SEED_LENGTH).contains(&seed.len()) {
            return Err(KeyError::crypto(
                scheme,
                CryptoError::InvalidSeedLength {
                    min: MIN_SEED_LENGTH,
                    max: MAX_SEED_LENGTH,
                    actual: seed.len(),
                },
            ));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::DerivationPaths;

    const TEST_SEED: &str = "5f788334e01ee04b190853f047a2fccc0a0e0dc91889a81600428a63c815f1e51ae126f14dc6f179180ee015bd20c6ee0437be958a7c95d82283a801146a9a7b";

    fn path(text: &str) -> DerivationPath {
        DerivationPath::parse(text).unwrap()
    }

    #[test]
    fn test_unified_ed25519() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let node = KeyDeriver::derive(
            SignatureScheme::Ed25519,
            &seed,
            &path(DerivationPaths::ED25519_0),
        )
        .unwrap();
        assert_eq!(
            hex::encode(node.key()),
            "dd09307a43ba6dc186b5709e4ca51f4fc71911c143f7ceffcf8c60e6b03bc8fa"
        );
    }

    #[test]
    fn test_unified_secp256k1() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let node = KeyDeriver::derive(
            SignatureScheme::Secp256k1,
            &seed,
            &path(DerivationPaths::SECP256K1_0),
        )
        .unwrap();
        assert_eq!(
            hex::encode(node.key()),
            "003d1186682d78ab21a86c5c740c0df762e433d0ef6c0b03bf7391ee0463a08f"
        );
    }

    #[test]
    fn test_unified_secp256r1_walks_k1_group() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let node = KeyDeriver::derive(
            SignatureScheme::Secp256r1,
            &seed,
            &path(DerivationPaths::SECP256R1_0),
        )
        .unwrap();
        assert_eq!(
            hex::encode(node.key()),
            "436e1e695bd078e6304268ce7798aafd963c79d9330aacb4e0887468166745c3"
        );
    }

    #[test]
    fn test_invalid_seed() {
        let err = KeyDeriver::derive(
            SignatureScheme::Secp256k1,
            &[0u8; 8],
            &path(DerivationPaths::SECP256K1_0),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("secp256k1: invalid seed length"));
        assert!(err.to_string().contains("16..=64"), "{}", err);
    }

    #[test]
    fn test_path_checked_against_scheme() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let err = KeyDeriver::derive(
            SignatureScheme::Ed25519,
            &seed,
            &path(DerivationPaths::SECP256K1_0),
        )
        .unwrap_err();
        assert!(matches!(err, KeyError::Path(_)));
    }

    #[test]
    fn test_debug_is_redacted() {
        let node = ExtendedKey::new([0xaa; 32], [0xbb; 32]);
        let debug = format!("{:?}", node);
        assert!(!debug.contains("170"));
        assert!(!debug.to_lowercase().contains("aa"));
    }
}

// identity-core/src/keypair/mod.rs

//! Sui KeyPair
//!
//! One type for all three signature schemes. Every constructor ends in the
//! scheme-specific `from_secret`, so an out-of-range or wrongly sized secret
//! never produces a keypair.
//!
//! ```text
//! bech32 "suiprivkey1…" ─┐
//! hex / raw secret ──────┼─▶ SuiKeyPair ─▶ sign_personal_message / sign_transaction
//! mnemonic + path ───────┘        │
//!                                 └─▶ public_key() ─▶ address()
//! ```

pub mod ed25519;
pub mod public_key;
pub mod rfc6979;
pub mod secp256k1;
pub mod secp256r1;

pub use ed25519::Ed25519KeyPair;
pub use public_key::SuiPublicKey;
pub use secp256k1::Secp256k1KeyPair;
pub use secp256r1::Secp256r1KeyPair;

use crate::chains::sui::address::SuiAddress;
use crate::chains::sui::envelope::SIGNATURE_LENGTH;
use crate::chains::sui::signer::{self, Digest};
use crate::crypto::key_deriver::ExtendedKey;
use crate::crypto::mnemonic::SuiMnemonic;
use crate::crypto::paths::{DerivationPath, DerivationPaths, PathSegment};
use crate::crypto::scheme::SignatureScheme;
use crate::error::{CryptoError, KeyError, KeyResult};
use bech32::{u5, FromBase32, ToBase32, Variant};
use std::fmt;
use zeroize::Zeroizing;

/// Human-readable part of a bech32-encoded private key.
pub const SUI_PRIVATE_KEY_PREFIX: &str = "suiprivkey";

/// `flag ‖ secret32`
const BECH32_PAYLOAD_LENGTH: usize = 33;

/// Overwrite 5-bit groups that carried secret bytes.
fn wipe_base32(data: &mut [u5]) {
    if let Ok(zero) = u5::try_from_u8(0) {
        data.iter_mut().for_each(|group| *group = zero);
    }
    // keep the stores from being elided before the buffer is freed
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
}

/// Route an envelope to the verifier of `scheme`.
pub(crate) fn verify_envelope(
    scheme: SignatureScheme,
    public_key: &[u8],
    digest: &Digest,
    envelope: &[u8],
) -> KeyResult<()> {
    match scheme {
        SignatureScheme::Ed25519 => ed25519::verify(public_key, digest, envelope),
        SignatureScheme::Secp256k1 => secp256k1::verify(public_key, digest, envelope),
        SignatureScheme::Secp256r1 => secp256r1::verify(public_key, digest, envelope),
    }
}

#[derive(Clone)]
enum KeyPairKind {
    Ed25519(Ed25519KeyPair),
    Secp256k1(Secp256k1KeyPair),
    Secp256r1(Secp256r1KeyPair),
}

/// Where a derived keypair sits in its HD tree.
#[derive(Clone)]
struct Derivation {
    path: DerivationPath,
    chain_code: Zeroizing<[u8; 32]>,
}

impl Derivation {
    fn new(path: DerivationPath, node: &ExtendedKey) -> Self {
        Self {
            path,
            chain_code: Zeroizing::new(*node.chain_code()),
        }
    }
}

/// A Sui signing keypair of any supported scheme.
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: scheme keys and the retained chain code are wiped on drop
/// - **No Debug Leak**: Debug prints scheme, address and path only
/// - **Immutable**: every operation takes `&self`; share freely across threads
#[derive(Clone)]
pub struct SuiKeyPair {
    kind: KeyPairKind,
    derivation: Option<Derivation>,
}

impl fmt::Debug for SuiKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiKeyPair")
            .field("scheme", &self.scheme())
            .field("address", &self.address())
            .field(
                "path",
                &self.derivation_path().map(|path| path.to_string()),
            )
            .finish_non_exhaustive()
    }
}

impl SuiKeyPair {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Fresh random keypair from `OsRng`.
    pub fn generate(scheme: SignatureScheme) -> Self {
        let kind = match scheme {
            SignatureScheme::Ed25519 => KeyPairKind::Ed25519(Ed25519KeyPair::generate()),
            SignatureScheme::Secp256k1 => KeyPairKind::Secp256k1(Secp256k1KeyPair::generate()),
            SignatureScheme::Secp256r1 => KeyPairKind::Secp256r1(Secp256r1KeyPair::generate()),
        };
        tracing::debug!(%scheme, "generated keypair");
        Self {
            kind,
            derivation: None,
        }
    }

    /// Import a raw 32-byte secret for `scheme`.
    pub fn from_secret_key(scheme: SignatureScheme, secret: &[u8]) -> KeyResult<Self> {
        let kind = match scheme {
            SignatureScheme::Ed25519 => KeyPairKind::Ed25519(Ed25519KeyPair::from_secret(secret)?),
            SignatureScheme::Secp256k1 => {
                KeyPairKind::Secp256k1(Secp256k1KeyPair::from_secret(secret)?)
            }
            SignatureScheme::Secp256r1 => {
                KeyPairKind::Secp256r1(Secp256r1KeyPair::from_secret(secret)?)
            }
        };
        Ok(Self {
            kind,
            derivation: None,
        })
    }

    /// Import a hex secret, with or without `0x`.
    pub fn from_hex(scheme: SignatureScheme, text: &str) -> KeyResult<Self> {
        let text = text.trim();
        let digits = text.strip_prefix("0x").unwrap_or(text);
        let secret = Zeroizing::new(hex::decode(digits).map_err(|e| {
            KeyError::crypto(scheme, CryptoError::InvalidKey(format!("invalid hex: {}", e)))
        })?);
        Self::from_secret_key(scheme, &secret)
    }

    /// Decode a `suiprivkey1…` string: bech32 of `flag ‖ secret32`.
    pub fn from_bech32(text: &str) -> KeyResult<Self> {
        let (hrp, mut data, variant) =
            bech32::decode(text.trim()).map_err(|e| KeyError::Bech32(e.to_string()))?;
        let payload = Vec::<u8>::from_base32(&data).map(Zeroizing::new);
        wipe_base32(&mut data);

        if hrp != SUI_PRIVATE_KEY_PREFIX {
            return Err(KeyError::Bech32(format!(
                "expected prefix '{}', got '{}'",
                SUI_PRIVATE_KEY_PREFIX, hrp
            )));
        }
        if variant != Variant::Bech32 {
            return Err(KeyError::Bech32("expected bech32, got bech32m".to_string()));
        }

        let payload = payload.map_err(|e| KeyError::Bech32(e.to_string()))?;
        if payload.len() != BECH32_PAYLOAD_LENGTH {
            return Err(KeyError::Bech32(format!(
                "payload must be {} bytes, got {}",
                BECH32_PAYLOAD_LENGTH,
                payload.len()
            )));
        }

        let scheme = SignatureScheme::from_flag(payload[0])?;
        tracing::debug!(%scheme, "keypair restored from bech32");
        Self::from_secret_key(scheme, &payload[1..])
    }

    /// Walk `path` from a 16–64 byte BIP-39 seed.
    pub fn derive_from_seed(
        scheme: SignatureScheme,
        seed: &[u8],
        path: &DerivationPath,
    ) -> KeyResult<Self> {
        let (kind, node) = match scheme {
            SignatureScheme::Ed25519 => {
                let (keypair, node) = Ed25519KeyPair::derive(seed, path)?;
                (KeyPairKind::Ed25519(keypair), node)
            }
            SignatureScheme::Secp256k1 => {
                let (keypair, node) = Secp256k1KeyPair::derive(seed, path)?;
                (KeyPairKind::Secp256k1(keypair), node)
            }
            SignatureScheme::Secp256r1 => {
                let (keypair, node) = Secp256r1KeyPair::derive(seed, path)?;
                (KeyPairKind::Secp256r1(keypair), node)
            }
        };
        Ok(Self {
            kind,
            derivation: Some(Derivation::new(path.clone(), &node)),
        })
    }

    /// Validate `phrase`, expand it with `passphrase`, and derive along `path`.
    ///
    /// `None` selects the recommended path of `scheme`:
    /// - Ed25519 `m/44'/784'/0'/0'/0'`
    /// - Secp256k1 `m/54'/784'/0'/0/0`
    /// - Secp256r1 `m/74'/784'/0'/0/0`
    pub fn derive_from_mnemonic(
        scheme: SignatureScheme,
        phrase: &str,
        passphrase: &str,
        path: Option<&str>,
    ) -> KeyResult<Self> {
        let mnemonic = SuiMnemonic::from_phrase(phrase)?;
        let path = DerivationPath::parse(path.unwrap_or(DerivationPaths::recommended(scheme)))?;
        let seed = mnemonic.to_seed(passphrase)?;
        Self::derive_from_seed(scheme, &seed[..], &path)
    }

    /// Derive one more level below this keypair using its retained chain code.
    ///
    /// The extended path must still validate for the scheme, so Ed25519 takes
    /// hardened segments and the ECDSA schemes non-hardened ones.
    pub fn derive_child(&self, segment: PathSegment) -> KeyResult<Self> {
        let scheme = self.scheme();
        let derivation = self.derivation.as_ref().ok_or_else(|| {
            KeyError::crypto(
                scheme,
                CryptoError::DerivationFailed(
                    "no chain code: keypair was not produced by derivation".to_string(),
                ),
            )
        })?;
        let child_path = derivation.path.child(segment);
        child_path.validate_for_scheme(scheme)?;

        let parent = ExtendedKey::new(*self.export_secret(), *derivation.chain_code);
        let (kind, node) = match self.kind {
            KeyPairKind::Ed25519(_) => {
                let (keypair, node) = Ed25519KeyPair::derive_child_node(&parent, segment)?;
                (KeyPairKind::Ed25519(keypair), node)
            }
            KeyPairKind::Secp256k1(_) => {
                let (keypair, node) = Secp256k1KeyPair::derive_child_node(&parent, segment)?;
                (KeyPairKind::Secp256k1(keypair), node)
            }
            KeyPairKind::Secp256r1(_) => {
                let (keypair, node) = Secp256r1KeyPair::derive_child_node(&parent, segment)?;
                (KeyPairKind::Secp256r1(keypair), node)
            }
        };
        tracing::debug!(%scheme, path = %child_path, "derived child keypair");
        Ok(Self {
            kind,
            derivation: Some(Derivation::new(child_path, &node)),
        })
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    pub fn scheme(&self) -> SignatureScheme {
        match self.kind {
            KeyPairKind::Ed25519(_) => SignatureScheme::Ed25519,
            KeyPairKind::Secp256k1(_) => SignatureScheme::Secp256k1,
            KeyPairKind::Secp256r1(_) => SignatureScheme::Secp256r1,
        }
    }

    fn public_key_bytes(&self) -> Vec<u8> {
        match &self.kind {
            KeyPairKind::Ed25519(keypair) => keypair.public_key_bytes().to_vec(),
            KeyPairKind::Secp256k1(keypair) => keypair.public_key_bytes().to_vec(),
            KeyPairKind::Secp256r1(keypair) => keypair.public_key_bytes().to_vec(),
        }
    }

    pub fn public_key(&self) -> SuiPublicKey {
        SuiPublicKey::from_parts(self.scheme(), self.public_key_bytes())
    }

    pub fn address(&self) -> SuiAddress {
        SuiAddress::hash_public_key(self.scheme(), &self.public_key_bytes())
    }

    /// The 32-byte secret (Ed25519 seed or ECDSA scalar).
    ///
    /// # Warning
    /// The buffer is wiped when dropped; do not copy it out.
    pub fn export_secret(&self) -> Zeroizing<[u8; 32]> {
        match &self.kind {
            KeyPairKind::Ed25519(keypair) => keypair.secret_bytes(),
            KeyPairKind::Secp256k1(keypair) => keypair.secret_bytes(),
            KeyPairKind::Secp256r1(keypair) => keypair.secret_bytes(),
        }
    }

    /// `suiprivkey1…` form of [`export_secret`](Self::export_secret).
    pub fn to_bech32(&self) -> KeyResult<Zeroizing<String>> {
        let secret = self.export_secret();
        let mut payload = Zeroizing::new(Vec::with_capacity(BECH32_PAYLOAD_LENGTH));
        payload.push(self.scheme().flag());
        payload.extend_from_slice(&secret[..]);
        let mut data = payload.as_slice().to_base32();
        let encoded = bech32::encode(SUI_PRIVATE_KEY_PREFIX, &data, Variant::Bech32)
            .map(Zeroizing::new)
            .map_err(|e| KeyError::Bech32(e.to_string()));
        wipe_base32(&mut data);
        encoded
    }

    /// Path this keypair was derived along, `None` for imported or generated keys.
    pub fn derivation_path(&self) -> Option<&DerivationPath> {
        self.derivation.as_ref().map(|derivation| &derivation.path)
    }

    // =========================================================================
    // SIGNING
    // =========================================================================

    /// Raw 64-byte signature over a 32-byte intent digest.
    pub fn sign_digest(&self, digest: &Digest) -> KeyResult<[u8; SIGNATURE_LENGTH]> {
        match &self.kind {
            KeyPairKind::Ed25519(keypair) => Ok(keypair.sign_digest(digest)),
            KeyPairKind::Secp256k1(keypair) => Ok(keypair.sign_digest(digest)),
            KeyPairKind::Secp256r1(keypair) => keypair.sign_digest(digest),
        }
    }

    /// Serialized `flag ‖ sig ‖ pubkey` over a personal message.
    pub fn sign_personal_message(&self, message: &[u8]) -> KeyResult<Vec<u8>> {
        signer::sign_personal_message(
            self.scheme(),
            message,
            &self.public_key_bytes(),
            |digest| self.sign_digest(digest),
        )
    }

    /// Serialized `flag ‖ sig ‖ pubkey` over BCS `TransactionData` bytes.
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> KeyResult<Vec<u8>> {
        signer::sign_transaction(
            self.scheme(),
            tx_bytes,
            &self.public_key_bytes(),
            |digest| self.sign_digest(digest),
        )
    }

    pub fn verify_personal_message(&self, message: &[u8], signature: &[u8]) -> KeyResult<()> {
        self.public_key().verify_personal_message(message, signature)
    }

    pub fn verify_transaction(&self, tx_bytes: &[u8], signature: &[u8]) -> KeyResult<()> {
        self.public_key().verify_transaction(tx_bytes, signature)
    }
}

// =============================================================================
// TESTS
// =============================================================================

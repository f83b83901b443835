// identity-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! Building blocks shared by every keypair:
//!
//! - **Schemes**: flag / purpose / label of Ed25519, Secp256k1 and Secp256r1 via [`SignatureScheme`].
//! - **Mnemonic Generation**: BIP-39 phrases (12–24 words) and seed expansion via [`SuiMnemonic`].
//! - **Derivation Paths**: parsing and per-scheme validation via [`DerivationPath`] / [`DerivationPaths`].
//! - **Key Derivation**: SLIP-0010 (Ed25519) and BIP-32 (ECDSA) via [`KeyDeriver`].
//! - **Intent**: domain-separated digests of everything that gets signed.

pub mod hash;
pub mod intent;
pub mod key_deriver;
pub mod mnemonic;
pub mod paths;
pub mod scheme;

// Re-exports for cleaner API access
pub use intent::{
    hash_intent_bytes, hash_intent_message, Intent, IntentMessage, IntentScope, PersonalMessage,
};
pub use key_deriver::{ExtendedKey, KeyDeriver};
pub use mnemonic::{SuiMnemonic, WordCount};
pub use paths::{DerivationPath, DerivationPaths, PathSegment};
pub use scheme::SignatureScheme;

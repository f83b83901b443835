// identity-core/src/lib.rs

//! # sui-identity-core
//!
//! Key material, addresses and signatures for Sui accounts.
//!
//! - [`crypto`]: schemes, BIP-39 mnemonics, derivation paths, SLIP-0010 / BIP-32, intents
//! - [`keypair`]: [`SuiKeyPair`] over Ed25519, Secp256k1 and Secp256r1
//! - [`chains::sui`]: addresses, signature envelopes, personal-message / transaction signing
//! - [`utils`]: digests and Move type tags
//!
//! ```no_run
//! use sui_identity_core::{SignatureScheme, SuiKeyPair};
//!
//! let keypair = SuiKeyPair::from_bech32(
//!     "suiprivkey1qz6qzxye624vk8epr7c9j4flnxm5lze2e7y2pmxzm4qarny03lt8xavx8zj",
//! )?;
//! assert_eq!(keypair.scheme(), SignatureScheme::Ed25519);
//! let signature = keypair.sign_personal_message(b"hello")?;
//! keypair.public_key().verify_personal_message(b"hello", &signature)?;
//! # Ok::<(), sui_identity_core::KeyError>(())
//! ```

pub mod chains;
pub mod crypto;
pub mod error;
pub mod keypair;
pub mod utils;

pub use chains::sui::{address_from_public_key, SignatureEnvelope, SuiAddress};
pub use crypto::{
    hash_intent_bytes, hash_intent_message, DerivationPath, DerivationPaths, Intent,
    IntentMessage, IntentScope, PathSegment, PersonalMessage, SignatureScheme, SuiMnemonic,
    WordCount,
};
pub use error::{KeyError, KeyResult};
pub use keypair::{SuiKeyPair, SuiPublicKey, SUI_PRIVATE_KEY_PREFIX};
pub use utils::{parse_type_tag, ObjectDigest, StructTag, TransactionDigest, TypeTag};

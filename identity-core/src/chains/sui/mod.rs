// identity-core/src/chains/sui/mod.rs

//! Sui Chain Support
//!
//! # Key Features
//! - **Address Derivation**: `blake2b-256(flag ‖ pubkey)` addresses via [`SuiAddress`].
//! - **Signature Envelopes**: `flag ‖ sig ‖ pubkey` framing via [`SignatureEnvelope`].
//! - **Signing**: intent-prefixed personal message and transaction signing via [`signer`].

pub mod address;
pub mod envelope;
pub mod signer;

// Re-exports for cleaner API access
pub use address::{address_from_public_key, SuiAddress};
pub use envelope::{SignatureEnvelope, SIGNATURE_LENGTH};
pub use signer::{
    sign_personal_message, sign_transaction, verify_personal_message, verify_transaction,
};

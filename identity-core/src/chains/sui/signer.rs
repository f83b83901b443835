// identity-core/src/chains/sui/signer.rs
//
// Sui Signer Module - Offline signing of personal messages and transactions
//
// Both paths hash with an intent prefix, hand the 32-byte digest to a
// scheme-specific `sign_fn`, and frame the result as `flag ‖ sig ‖ pubkey`.
//
//   personal message: blake2b-256([3,0,0] ‖ BCS(PersonalMessage { message }))
//   transaction:      blake2b-256([0,0,0] ‖ tx_bytes)

use super::envelope::{assemble, SIGNATURE_LENGTH};
use crate::crypto::hash::DIGEST_LENGTH;
use crate::crypto::intent::{
    hash_intent_bytes, hash_intent_message, Intent, IntentMessage, IntentScope, PersonalMessage,
};
use crate::crypto::scheme::SignatureScheme;
use crate::error::{IntentError, KeyResult};

/// 32-byte intent digest handed to signers and verifiers.
pub type Digest = [u8; DIGEST_LENGTH];

/// Personal-message intent digest of `message`.
pub fn personal_message_digest(message: &[u8]) -> KeyResult<Digest> {
    if message.is_empty() {
        return Err(IntentError::EmptyMessage.into());
    }
    let intent_message = IntentMessage::new(
        Intent::personal_message(),
        PersonalMessage {
            message: message.to_vec(),
        },
    );
    Ok(hash_intent_message(&intent_message)?)
}

/// Transaction intent digest of already BCS-serialized `TransactionData`.
#[inline]
pub fn transaction_digest(tx_bytes: &[u8]) -> Digest {
    hash_intent_bytes(IntentScope::TransactionData, tx_bytes)
}

/// Sign a personal message and return the serialized envelope.
///
/// # Errors
/// - `intent: message must not be empty` for an empty `message`
/// - whatever `sign_fn` returns
pub fn sign_personal_message<F>(
    scheme: SignatureScheme,
    message: &[u8],
    public_key: &[u8],
    sign_fn: F,
) -> KeyResult<Vec<u8>>
where
    F: FnOnce(&Digest) -> KeyResult<[u8; SIGNATURE_LENGTH]>,
{
    let digest = personal_message_digest(message)?;
    let signature = sign_fn(&digest)?;
    tracing::trace!(%scheme, message_len = message.len(), "signed personal message");
    Ok(assemble(scheme, &signature, public_key))
}

/// Sign BCS transaction bytes and return the serialized envelope.
pub fn sign_transaction<F>(
    scheme: SignatureScheme,
    tx_bytes: &[u8],
    public_key: &[u8],
    sign_fn: F,
) -> KeyResult<Vec<u8>>
where
    F: FnOnce(&Digest) -> KeyResult<[u8; SIGNATURE_LENGTH]>,
{
    let digest = transaction_digest(tx_bytes);
    let signature = sign_fn(&digest)?;
    tracing::trace!(%scheme, tx_len = tx_bytes.len(), "signed transaction");
    Ok(assemble(scheme, &signature, public_key))
}

/// Recompute the personal-message digest and delegate to `verify_fn(digest, envelope)`.
pub fn verify_personal_message<F>(
    scheme: SignatureScheme,
    message: &[u8],
    signature: &[u8],
    verify_fn: F,
) -> KeyResult<()>
where
    F: FnOnce(&Digest, &[u8]) -> KeyResult<()>,
{
    let digest = personal_message_digest(message)?;
    tracing::trace!(%scheme, "verifying personal message");
    verify_fn(&digest, signature)
}

/// Recompute the transaction digest and delegate to `verify_fn(digest, envelope)`.
pub fn verify_transaction<F>(
    scheme: SignatureScheme,
    tx_bytes: &[u8],
    signature: &[u8],
    verify_fn: F,
) -> KeyResult<()>
where
    F: FnOnce(&Digest, &[u8]) -> KeyResult<()>,
{
    let digest = transaction_digest(tx_bytes);
    tracing::trace!(%scheme, "verifying transaction");
    verify_fn(&digest, signature)
}

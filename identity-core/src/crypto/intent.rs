// identity-core/src/crypto/intent.rs
//
// Intent Module - 3-byte domain separator prepended to everything that gets signed.
//
// intent message = [scope, version, app_id] ‖ BCS(value)
// digest         = blake2b-256(intent message)

use crate::crypto::hash::{blake2b256, DIGEST_LENGTH};
use crate::error::IntentError;
use serde::{Deserialize, Serialize};

/// What kind of data a signature commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IntentScope {
    TransactionData = 0,
    TransactionEffects = 1,
    CheckpointSummary = 2,
    PersonalMessage = 3,
    SenderSignedTransaction = 4,
    /// Defined for completeness; nothing in this crate signs with it.
    ProofOfPossession = 5,
}

impl TryFrom<u8> for IntentScope {
    type Error = IntentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => IntentScope::TransactionData,
            1 => IntentScope::TransactionEffects,
            2 => IntentScope::CheckpointSummary,
            3 => IntentScope::PersonalMessage,
            4 => IntentScope::SenderSignedTransaction,
            5 => IntentScope::ProofOfPossession,
            other => return Err(IntentError::UnknownScope(other)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum IntentVersion {
    #[default]
    V0 = 0,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum AppId {
    #[default]
    Sui = 0,
}

/// `(scope, version, app_id)`; only version 0 and app id 0 exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Intent {
    pub scope: IntentScope,
    pub version: IntentVersion,
    pub app_id: AppId,
}

impl Intent {
    pub const LENGTH: usize = 3;

    /// Default version and app id with the given scope.
    #[inline]
    pub const fn with_scope(scope: IntentScope) -> Self {
        Self {
            scope,
            version: IntentVersion::V0,
            app_id: AppId::Sui,
        }
    }

    #[inline]
    pub const fn personal_message() -> Self {
        Self::with_scope(IntentScope::PersonalMessage)
    }

    #[inline]
    pub const fn sui_transaction() -> Self {
        Self::with_scope(IntentScope::TransactionData)
    }

    #[inline]
    pub const fn bytes(&self) -> [u8; Self::LENGTH] {
        [self.scope as u8, self.version as u8, self.app_id as u8]
    }

    /// Parse and validate a raw 3-byte intent prefix.
    ///
    /// Rejects unknown scopes, non-zero versions and non-zero app ids.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IntentError> {
        let [scope, version, app_id]: [u8; Self::LENGTH] = bytes
            .try_into()
            .map_err(|_| IntentError::InvalidLength(bytes.len()))?;
        let scope = IntentScope::try_from(scope)?;
        if version != IntentVersion::V0 as u8 {
            return Err(IntentError::UnsupportedVersion(version));
        }
        if app_id != AppId::Sui as u8 {
            return Err(IntentError::UnsupportedAppId(app_id));
        }
        Ok(Self::with_scope(scope))
    }
}

/// Payload of a personal-message signature. BCS encodes it as a length-prefixed byte vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalMessage {
    pub message: Vec<u8>,
}

/// A value paired with its intent, ready to be hashed and signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentMessage<T> {
    pub intent: Intent,
    pub value: T,
}

impl<T: Serialize> IntentMessage<T> {
    pub fn new(intent: Intent, value: T) -> Self {
        Self { intent, value }
    }

    /// `intent.bytes() ‖ BCS(value)`
    pub fn to_bytes(&self) -> Result<Vec<u8>, IntentError> {
        let body =
            bcs::to_bytes(&self.value).map_err(|e| IntentError::Serialization(e.to_string()))?;
        let mut out = Vec::with_capacity(Intent::LENGTH + body.len());
        out.extend_from_slice(&self.intent.bytes());
        out.extend_from_slice(&body);
        Ok(out)
    }
}

/// blake2b-256 of the serialized intent message.
pub fn hash_intent_message<T: Serialize>(
    message: &IntentMessage<T>,
) -> Result<[u8; DIGEST_LENGTH], IntentError> {
    let bytes = message.to_bytes()?;
    Ok(blake2b256(&[&bytes]))
}

/// blake2b-256 of `[scope, 0, 0] ‖ payload` for payloads that are already BCS bytes.
pub fn hash_intent_bytes(scope: IntentScope, payload: &[u8]) -> [u8; DIGEST_LENGTH] {
    blake2b256(&[&Intent::with_scope(scope).bytes(), payload])
}

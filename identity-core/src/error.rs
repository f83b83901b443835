// identity-core/src/error.rs
//
// Error taxonomy. Every variant renders with the prefix of the subsystem that
// produced it ("ed25519: ...", "path: ...", "intent: ...").

use crate::crypto::scheme::SignatureScheme;
use thiserror::Error;

pub type KeyResult<T> = std::result::Result<T, KeyError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("{scheme}: {kind}")]
    Crypto {
        scheme: SignatureScheme,
        kind: CryptoError,
    },

    #[error("path: {0}")]
    Path(#[from] PathError),

    #[error("intent: {0}")]
    Intent(#[from] IntentError),

    #[error("mnemonic: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("bech32: {0}")]
    Bech32(String),

    #[error("unsupported signature scheme flag: {0:#04x}")]
    UnsupportedScheme(u8),

    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl KeyError {
    /// Shorthand for a scheme-scoped crypto error.
    #[inline]
    pub fn crypto(scheme: SignatureScheme, kind: CryptoError) -> Self {
        KeyError::Crypto { scheme, kind }
    }

    /// `true` only for a well-formed signature that failed to verify.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            KeyError::Crypto {
                kind: CryptoError::VerificationFailed,
                ..
            }
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid {what} length: expected {expected}, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid seed length: expected {min}..={max}, got {actual}")]
    InvalidSeedLength { min: usize, max: usize, actual: usize },

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("scalar out of range for curve order")]
    ScalarOutOfRange,

    #[error("key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("signature does not verify")]
    VerificationFailed,

    #[error("backend failure: {0}")]
    Backend(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("must start with m/")]
    MissingRoot,

    #[error("empty segment")]
    EmptySegment,

    #[error("invalid segment '{0}'")]
    InvalidSegment(String),

    #[error("too few segments: expected at least {expected}, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("segment {index}: {reason}")]
    WrongSegment { index: usize, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("unknown scope {0}")]
    UnknownScope(u8),

    #[error("unsupported version {0}")]
    UnsupportedVersion(u8),

    #[error("unsupported app id {0}")]
    UnsupportedAppId(u8),

    #[error("intent must be 3 bytes, got {0}")]
    InvalidLength(usize),

    #[error("message must not be empty")]
    EmptyMessage,

    #[error("serialization failed: {0}")]
    Serialization(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("word not found in the BIP-39 wordlist: {0}")]
    UnknownWord(String),

    #[error("checksum validation failed")]
    ChecksumFailed,

    #[error("BIP-39 internal error: {0}")]
    Bip39Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("address: {0}")]
    Address(String),

    #[error("digest: {0}")]
    Digest(String),

    #[error("type tag: {0}")]
    TypeTag(String),

    #[error("signature: {0}")]
    Signature(String),
}

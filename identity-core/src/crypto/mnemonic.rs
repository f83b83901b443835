// identity-core/src/crypto/mnemonic.rs
//
// Mnemonic Module - BIP-39 mnemonic generation and seed expansion
// Chuẩn: BIP-39 (Mnemonic), PBKDF2-HMAC-SHA512 (Seed Derivation)

use crate::error::{KeyResult, MnemonicError};
use bip39::Mnemonic;
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Length of a BIP-39 seed.
pub const SEED_LENGTH: usize = 64;

/// Supported mnemonic lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve = 12,
    /// 15 words (160-bit entropy)
    Fifteen = 15,
    /// 18 words (192-bit entropy)
    Eighteen = 18,
    /// 21 words (224-bit entropy)
    TwentyOne = 21,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    /// Bytes of entropy behind this many words
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::Fifteen => 20,
            WordCount::Eighteen => 24,
            WordCount::TwentyOne => 28,
            WordCount::TwentyFour => 32,
        }
    }

    pub fn from_words(count: usize) -> Result<Self, MnemonicError> {
        match count {
            12 => Ok(WordCount::Twelve),
            15 => Ok(WordCount::Fifteen),
            18 => Ok(WordCount::Eighteen),
            21 => Ok(WordCount::TwentyOne),
            24 => Ok(WordCount::TwentyFour),
            other => Err(MnemonicError::InvalidWordCount(other)),
        }
    }
}

/// BIP-39 mnemonic phrase
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: the phrase is overwritten when the struct is dropped
/// - **CSPRNG**: new phrases draw entropy from `OsRng`
/// - **No Debug Leak**: custom Debug impl never prints the phrase
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SuiMnemonic {
    phrase: String,
    word_count: usize,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị mnemonic phrase
impl std::fmt::Debug for SuiMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiMnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl SuiMnemonic {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Generate a new phrase with the requested number of words.
    pub fn generate(word_count: WordCount) -> KeyResult<Self> {
        let entropy_size = word_count.entropy_bytes();

        // Stack-allocated entropy buffer (max 32 bytes)
        let mut entropy = [0u8; 32];
        OsRng.fill_bytes(&mut entropy[..entropy_size]);

        let mnemonic = Mnemonic::from_entropy(&entropy[..entropy_size])
            .map_err(|e| MnemonicError::Bip39Error(e.to_string()));

        // Zeroize entropy ngay sau khi sử dụng
        entropy.zeroize();

        let mnemonic = mnemonic?;
        tracing::debug!(words = word_count as usize, "generated mnemonic");
        Ok(Self {
            phrase: mnemonic.to_string(),
            word_count: word_count as usize,
        })
    }

    /// Restore from an existing phrase
    ///
    /// # Validation
    /// - word count (12, 15, 18, 21, 24)
    /// - every word is in the English BIP-39 wordlist
    /// - checksum
    pub fn from_phrase(phrase: &str) -> KeyResult<Self> {
        // Normalize whitespace và count words
        let normalized = phrase.split_whitespace().collect::<Vec<_>>();
        let count = normalized.len();
        WordCount::from_words(count)?;

        let normalized_phrase = normalized.join(" ");
        Mnemonic::parse(&normalized_phrase).map_err(classify_bip39_error)?;

        Ok(Self {
            phrase: normalized_phrase,
            word_count: count,
        })
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// The phrase itself
    ///
    /// # Warning
    /// Never log or display this value.
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    // =========================================================================
    // SEED DERIVATION
    // =========================================================================

    /// 64-byte BIP-39 seed (PBKDF2-HMAC-SHA512, 2048 rounds).
    ///
    /// # Arguments
    /// * `passphrase` - BIP-39 passphrase, `""` when none
    pub fn to_seed(&self, passphrase: &str) -> KeyResult<Zeroizing<[u8; SEED_LENGTH]>> {
        let mnemonic = Mnemonic::parse(&self.phrase).map_err(classify_bip39_error)?;
        Ok(Zeroizing::new(mnemonic.to_seed(passphrase)))
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Full validation: word count, wordlist, checksum
    #[inline]
    pub fn validate(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }
}

/// Map a bip39 parse error onto the crate's mnemonic errors.
fn classify_bip39_error(err: bip39::Error) -> MnemonicError {
    match err {
        bip39::Error::BadWordCount(count) => MnemonicError::InvalidWordCount(count),
        bip39::Error::UnknownWord(index) => MnemonicError::UnknownWord(format!("word #{}", index)),
        bip39::Error::InvalidChecksum => MnemonicError::ChecksumFailed,
        other => MnemonicError::Bip39Error(other.to_string()),
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

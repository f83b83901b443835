// identity-core/src/crypto/paths.rs
//
// Derivation Paths Module - BIP-32 path parsing, Sui hardening rules,
// recommended paths per signature scheme.

use crate::crypto::scheme::SignatureScheme;
use crate::error::PathError;
use crate::utils::bytes::HARDENED_BIT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const SUI: u32 = 784;
}

/// Minimum depth of a path usable for a Sui account.
pub const MIN_DEPTH: usize = 5;

// =============================================================================
// PATH SEGMENT
// =============================================================================
/// One level of a derivation path.
///
/// `index` is always below 2^31; hardening is carried separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathSegment {
    index: u32,
    hardened: bool,
}

impl PathSegment {
    pub fn new(index: u32, hardened: bool) -> Result<Self, PathError> {
        if index & HARDENED_BIT != 0 {
            return Err(PathError::InvalidSegment(format!(
                "index {} exceeds 2^31 - 1",
                index
            )));
        }
        Ok(Self { index, hardened })
    }

    #[inline]
    pub fn hardened(index: u32) -> Result<Self, PathError> {
        Self::new(index, true)
    }

    #[inline]
    pub fn normal(index: u32) -> Result<Self, PathError> {
        Self::new(index, false)
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// Index as it goes on the wire: `index | 0x80000000` when hardened.
    #[inline]
    pub fn wire_index(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_BIT
        } else {
            self.index
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl FromStr for PathSegment {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::EmptySegment);
        }
        let (digits, hardened) = match s.strip_suffix('\'') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        // Chỉ chấp nhận số thập phân thuần (không dấu, không khoảng trắng)
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PathError::InvalidSegment(s.to_string()));
        }
        let index: u32 = digits
            .parse()
            .map_err(|_| PathError::InvalidSegment(s.to_string()))?;
        Self::new(index, hardened).map_err(|_| PathError::InvalidSegment(s.to_string()))
    }
}

// =============================================================================
// DERIVATION PATH
// =============================================================================
/// Ordered list of path segments, textual form `m/44'/784'/0'/0'/0'`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    segments: Vec<PathSegment>,
}

impl DerivationPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Parse `"m"` or `"m/<n>[']/..."`.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        if text == "m" {
            return Ok(Self::default());
        }
        let rest = text.strip_prefix("m/").ok_or(PathError::MissingRoot)?;
        let segments = rest
            .split('/')
            .map(PathSegment::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// `true` when every segment is hardened (vacuously true for `m`).
    pub fn is_fully_hardened(&self) -> bool {
        self.segments.iter().all(PathSegment::is_hardened)
    }

    /// New path with `segment` appended.
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Check the Sui layout `m/purpose'/784'/account'/change/address` for `scheme`.
    ///
    /// - segment 0: hardened, equal to `scheme.purpose()`
    /// - segment 1: hardened, equal to the Sui coin type
    /// - segment 2: hardened
    /// - segments 3, 4: hardened for Ed25519, non-hardened for the ECDSA schemes
    ///
    /// Segments beyond the fifth must follow the same hardening as 3 and 4.
    pub fn validate_for_scheme(&self, scheme: SignatureScheme) -> Result<(), PathError> {
        if self.segments.len() < MIN_DEPTH {
            return Err(PathError::TooShort {
                expected: MIN_DEPTH,
                actual: self.segments.len(),
            });
        }

        let purpose = self.segments[0];
        if !purpose.is_hardened() || purpose.index() != scheme.purpose() {
            return Err(PathError::WrongSegment {
                index: 0,
                reason: format!("purpose must be {}' for {}", scheme.purpose(), scheme),
            });
        }

        let coin = self.segments[1];
        if !coin.is_hardened() || coin.index() != coin_type::SUI {
            return Err(PathError::WrongSegment {
                index: 1,
                reason: format!("coin type must be {}'", coin_type::SUI),
            });
        }

        if !self.segments[2].is_hardened() {
            return Err(PathError::WrongSegment {
                index: 2,
                reason: "account must be hardened".to_string(),
            });
        }

        let tail_hardened = matches!(scheme, SignatureScheme::Ed25519);
        for (index, segment) in self.segments.iter().enumerate().skip(3) {
            if segment.is_hardened() != tail_hardened {
                let reason = if tail_hardened {
                    format!("{} requires hardened segments", scheme)
                } else {
                    format!("{} requires non-hardened change/address segments", scheme)
                };
                return Err(PathError::WrongSegment { index, reason });
            }
        }
        Ok(())
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DerivationPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// RECOMMENDED PATHS
// =============================================================================
/// Pre-built Sui derivation paths
///
/// # Conventions
/// - Ed25519 (SLIP-0010): `m/44'/784'/account'/change'/address'` (all hardened)
/// - Secp256k1 (BIP-32): `m/54'/784'/account'/change/address`
/// - Secp256r1 (BIP-32): `m/74'/784'/account'/change/address`
pub struct DerivationPaths;

impl DerivationPaths {
    pub const ED25519_0: &'static str = "m/44'/784'/0'/0'/0'";
    pub const SECP256K1_0: &'static str = "m/54'/784'/0'/0/0";
    pub const SECP256R1_0: &'static str = "m/74'/784'/0'/0/0";

    /// Default path used when the caller does not pass one.
    #[inline]
    pub const fn recommended(scheme: SignatureScheme) -> &'static str {
        match scheme {
            SignatureScheme::Ed25519 => Self::ED25519_0,
            SignatureScheme::Secp256k1 => Self::SECP256K1_0,
            SignatureScheme::Secp256r1 => Self::SECP256R1_0,
        }
    }

    /// Ed25519 path with custom account & address index (all hardened)
    #[inline]
    pub fn ed25519(account: u32, index: u32) -> String {
        format!("m/44'/{}'/{}'/0'/{}'", coin_type::SUI, account, index)
    }

    #[inline]
    pub fn secp256k1(account: u32, change: u32, index: u32) -> String {
        Self::bip44(SignatureScheme::Secp256k1.purpose(), account, change, index)
    }

    #[inline]
    pub fn secp256r1(account: u32, change: u32, index: u32) -> String {
        Self::bip44(SignatureScheme::Secp256r1.purpose(), account, change, index)
    }

    /// `m/purpose'/784'/account'/change/index` for the ECDSA schemes.
    #[inline]
    fn bip44(purpose: u32, account: u32, change: u32, index: u32) -> String {
        format!(
            "m/{}'/{}'/{}'/{}/{}",
            purpose,
            coin_type::SUI,
            account,
            change,
            index
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

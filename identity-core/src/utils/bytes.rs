// identity-core/src/utils/bytes.rs
//
// Fixed-width big-endian helpers shared by the derivers and the keypairs.

use crate::error::CryptoError;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Bit that marks a hardened BIP-32 / SLIP-0010 child index.
pub const HARDENED_BIT: u32 = 0x8000_0000;

/// Split a 64-byte HMAC-SHA512 output into `(IL, IR)`.
///
/// The caller's buffer is left untouched; wipe it yourself if it is secret.
#[inline]
pub fn split32(buf: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&buf[..32]);
    right.copy_from_slice(&buf[32..]);
    (left, right)
}

/// `ser32` from BIP-32.
#[inline]
pub fn ser32(index: u32) -> [u8; 4] {
    index.to_be_bytes()
}

/// Copy a slice into a fixed 32-byte array, rejecting any other length.
pub fn to_array32(what: &'static str, bytes: &[u8]) -> Result<[u8; 32], CryptoError> {
    <[u8; 32]>::try_from(bytes).map_err(|_| CryptoError::InvalidLength {
        what,
        expected: 32,
        actual: bytes.len(),
    })
}

/// Constant-time equality for equal-length buffers; unequal lengths are simply unequal.
#[inline]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}

/// Copy a finalized HMAC-SHA512 output into a stack buffer and wipe the source.
pub fn take64(mut digest: impl AsMut<[u8]>) -> [u8; 64] {
    let src = digest.as_mut();
    let mut buf = [0u8; 64];
    buf.copy_from_slice(src);
    src.zeroize();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split32() {
        let mut buf = [0u8; 64];
        buf[0] = 1;
        buf[63] = 2;
        let (l, r) = split32(&buf);
        assert_eq!(l[0], 1);
        assert_eq!(r[31], 2);
    }

    #[test]
    fn test_ser32_is_big_endian() {
        assert_eq!(ser32(784 | HARDENED_BIT), [0x80, 0x00, 0x03, 0x10]);
    }

    #[test]
    fn test_to_array32() {
        assert!(to_array32("seed", &[0u8; 32]).is_ok());
        let err = to_array32("seed", &[0u8; 31]).unwrap_err();
        assert_eq!(
            err,
            CryptoError::InvalidLength {
                what: "seed",
                expected: 32,
                actual: 31
            }
        );
    }

    #[test]
    fn test_ct_eq() {
        assert!(ct_eq(b"abc", b"abc"));
        assert!(!ct_eq(b"abc", b"abd"));
        assert!(!ct_eq(b"abc", b"ab"));
    }

    #[test]
    fn test_take64_wipes_source() {
        let mut src = [7u8; 64];
        let buf = take64(&mut src[..]);
        assert_eq!(buf, [7u8; 64]);
        assert_eq!(src, [0u8; 64]);
    }
}

// identity-core/src/crypto/hash.rs
//
// Hash primitives used across the crate.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use hmac::Hmac;
use sha2::{Sha256, Sha512};

/// Blake2b with a 32-byte output, the chain's standard digest.
pub type Blake2b256 = Blake2b<U32>;

pub type HmacSha512 = Hmac<Sha512>;
pub type HmacSha256 = Hmac<Sha256>;

/// Length of every digest produced by [`blake2b256`].
pub const DIGEST_LENGTH: usize = 32;

/// blake2b-256 over the concatenation of `parts`.
pub fn blake2b256(parts: &[&[u8]]) -> [u8; DIGEST_LENGTH] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake2b256_empty() {
        assert_eq!(
            hex::encode(blake2b256(&[])),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn test_blake2b256_parts_concatenate() {
        assert_eq!(blake2b256(&[b"ab", b"c"]), blake2b256(&[b"abc"]));
    }

    #[test]
    fn test_sha256_abc() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}

// identity-core/src/crypto/key_deriver/slip10.rs
//
// Ed25519 Key Derivation — SLIP-0010 Standard
//
// Algorithm: HMAC-SHA512, hardened child derivation only
// Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md
//
// QUAN TRỌNG: SLIP-0010 cho ed25519 CHỈ hỗ trợ hardened child derivation.
// VD: m/44'/784'/0'/0'/0' (OK)    m/44'/784'/0'/0'/0 (INVALID)

use super::ExtendedKey;
use crate::crypto::paths::{DerivationPath, PathSegment};
use crate::error::CryptoError;
use crate::utils::bytes::ser32;

/// SLIP-0010 master key seed constant
pub const MASTER_SECRET: &[u8] = b"ed25519 seed";

/// I = HMAC-SHA512(Key = "ed25519 seed", Data = seed)
pub fn master(seed: &[u8]) -> Result<ExtendedKey, CryptoError> {
    ExtendedKey::from_hmac(MASTER_SECRET, &[seed])
}

/// Data = 0x00 || parent_key || ser32(index | 0x80000000)
/// I = HMAC-SHA512(Key = parent_chain_code, Data = Data)
pub fn derive_child(parent: &ExtendedKey, segment: PathSegment) -> Result<ExtendedKey, CryptoError> {
    if !segment.is_hardened() {
        return Err(CryptoError::DerivationFailed(format!(
            "SLIP-0010 requires hardened segments, got {}",
            segment
        )));
    }
    ExtendedKey::from_hmac(
        parent.chain_code(),
        &[&[0x00], parent.key(), &ser32(segment.wire_index())],
    )
}

/// Walk every segment of `path` starting at the master node.
pub fn derive_path(seed: &[u8], path: &DerivationPath) -> Result<ExtendedKey, CryptoError> {
    let mut node = master(seed)?;
    for segment in path.segments() {
        // Node cũ được zeroize khi bị ghi đè (ZeroizeOnDrop)
        node = derive_child(&node, *segment)?;
    }
    Ok(node)
}

// =============================================================================
// TESTS
// =============================================================================

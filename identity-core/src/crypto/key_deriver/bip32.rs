// identity-core/src/crypto/key_deriver/bip32.rs
//
// ECDSA Key Derivation — BIP-32
//
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
//
// Secp256r1 accounts are derived on the secp256k1 group as well: the walk below
// runs with the k1 order and k1 public keys, and only the final scalar is
// reinterpreted on P-256. Other Sui tooling derives r1 keys this way, so
// changing it would change every r1 address.

use super::ExtendedKey;
use crate::crypto::paths::{DerivationPath, PathSegment};
use crate::error::CryptoError;
use crate::utils::bytes::ser32;
use k256::elliptic_curve::ff::{Field, PrimeField};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::{CurveArithmetic, FieldBytes};
use zeroize::Zeroize;

/// BIP-32 master key seed constant
pub const MASTER_SECRET: &[u8] = b"Bitcoin seed";

/// Length of a compressed SEC1 public key.
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;

/// I = HMAC-SHA512(Key = "Bitcoin seed", Data = seed)
pub fn master<C: CurveArithmetic>(seed: &[u8]) -> Result<ExtendedKey, CryptoError> {
    let node = ExtendedKey::from_hmac(MASTER_SECRET, &[seed])?;
    match scalar_from_bytes::<C>(node.key()) {
        Some(scalar) if !bool::from(scalar.is_zero()) => Ok(node),
        _ => Err(CryptoError::DerivationFailed(
            "master key is not a valid scalar".to_string(),
        )),
    }
}

/// Derive one child.
///
/// - hardened: `data = 0x00 ‖ parent_key ‖ ser32(index | 0x80000000)`
/// - normal:   `data = pubkey_of(parent_key) ‖ ser32(index)`
///
/// `child = (IL + parent_key) mod n`, where `n` is the order of `C`. Fails when
/// `IL ≥ n` or `child == 0`; the caller decides whether to move to another index.
pub fn derive_child<C, F>(
    parent: &ExtendedKey,
    segment: PathSegment,
    pubkey_of: F,
) -> Result<ExtendedKey, CryptoError>
where
    C: CurveArithmetic,
    F: Fn(&[u8; 32]) -> Result<[u8; COMPRESSED_PUBLIC_KEY_LENGTH], CryptoError>,
{
    let index = ser32(segment.wire_index());
    let digest = if segment.is_hardened() {
        ExtendedKey::from_hmac(parent.chain_code(), &[&[0x00], parent.key(), &index])?
    } else {
        let public_key = pubkey_of(parent.key())?;
        ExtendedKey::from_hmac(parent.chain_code(), &[&public_key, &index])?
    };

    // digest.key() = IL, digest.chain_code() = IR
    let child = tweak_add::<C>(digest.key(), parent.key())?;
    Ok(ExtendedKey::new(child, *digest.chain_code()))
}

/// Walk every segment of `path`, using `pubkey_of` for non-hardened steps.
pub fn derive_path<C, F>(
    seed: &[u8],
    path: &DerivationPath,
    pubkey_of: F,
) -> Result<ExtendedKey, CryptoError>
where
    C: CurveArithmetic,
    F: Fn(&[u8; 32]) -> Result<[u8; COMPRESSED_PUBLIC_KEY_LENGTH], CryptoError>,
{
    let mut node = master::<C>(seed)?;
    for segment in path.segments() {
        node = derive_child::<C, _>(&node, *segment, &pubkey_of)?;
    }
    Ok(node)
}

/// Compressed secp256k1 public key of a 32-byte scalar.
pub fn secp256k1_public_key(
    secret: &[u8; 32],
) -> Result<[u8; COMPRESSED_PUBLIC_KEY_LENGTH], CryptoError> {
    let secret_key =
        k256::SecretKey::from_slice(secret).map_err(|_| CryptoError::ScalarOutOfRange)?;
    let encoded = secret_key.public_key().to_encoded_point(true);
    let mut out = [0u8; COMPRESSED_PUBLIC_KEY_LENGTH];
    out.copy_from_slice(encoded.as_bytes());
    Ok(out)
}

/// `(il + parent) mod n`, left-padded to 32 bytes.
fn tweak_add<C: CurveArithmetic>(il: &[u8; 32], parent: &[u8; 32]) -> Result<[u8; 32], CryptoError> {
    let mut tweak = scalar_from_bytes::<C>(il).ok_or(CryptoError::ScalarOutOfRange)?;
    let mut parent = scalar_from_bytes::<C>(parent).ok_or(CryptoError::ScalarOutOfRange)?;
    let mut child = tweak + parent;
    tweak.zeroize();
    parent.zeroize();
    if bool::from(child.is_zero()) {
        return Err(CryptoError::DerivationFailed(
            "derived child key is zero".to_string(),
        ));
    }

    let mut repr = child.to_repr();
    child.zeroize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&repr);
    repr.as_mut_slice().zeroize();
    Ok(out)
}

/// Big-endian bytes to a scalar of `C`, `None` when `bytes ≥ n`.
fn scalar_from_bytes<C: CurveArithmetic>(bytes: &[u8; 32]) -> Option<C::Scalar> {
    let mut repr = FieldBytes::<C>::default();
    if repr.len() != bytes.len() {
        return None;
    }
    repr.copy_from_slice(bytes);
    Option::from(C::Scalar::from_repr(repr))
}

// =============================================================================
// TESTS
// =============================================================================

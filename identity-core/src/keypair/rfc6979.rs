// identity-core/src/keypair/rfc6979.rs
//
// Deterministic ECDSA over P-256 with SHA-256 (RFC 6979 §3.2)
// Reference: https://www.rfc-editor.org/rfc/rfc6979
//
// qlen = hlen = 256, so bits2int is a plain big-endian read and every
// HMAC output is exactly one candidate nonce.

use crate::crypto::hash::{sha256, HmacSha256};
use crate::error::CryptoError;
use hmac::Mac;
use p256::elliptic_curve::bigint::U256;
use p256::elliptic_curve::ff::{Field, PrimeField};
use p256::elliptic_curve::ops::Reduce;
use p256::elliptic_curve::point::AffineCoordinates;
use p256::elliptic_curve::scalar::IsHigh;
use p256::{FieldBytes, ProjectivePoint, Scalar};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// HMAC-DRBG state `(K, V)`; wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
struct HmacDrbg {
    k: [u8; 32],
    v: [u8; 32],
}

impl HmacDrbg {
    /// Steps b–g: seed with `int2octets(x) ‖ bits2octets(h1)`.
    fn new(secret: &[u8; 32], h1: &[u8; 32]) -> Result<Self, CryptoError> {
        let mut drbg = Self {
            k: [0x00; 32],
            v: [0x01; 32],
        };
        for round in [0x00u8, 0x01] {
            drbg.k = drbg.mac(&[&drbg.v, &[round], secret, h1])?;
            drbg.v = drbg.mac(&[&drbg.v])?;
        }
        Ok(drbg)
    }

    fn mac(&self, parts: &[&[u8]]) -> Result<[u8; 32], CryptoError> {
        let mut mac = HmacSha256::new_from_slice(&self.k)
            .map_err(|e| CryptoError::Backend(format!("HMAC init failed: {}", e)))?;
        for part in parts {
            mac.update(part);
        }
        let mut tag = mac.finalize().into_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(&tag);
        tag.as_mut_slice().zeroize();
        Ok(out)
    }

    /// Step h.2: `V = HMAC_K(V)`, `T = V`.
    fn next_candidate(&mut self) -> Result<[u8; 32], CryptoError> {
        self.v = self.mac(&[&self.v])?;
        Ok(self.v)
    }

    /// Step h.3 after a rejected candidate.
    fn reseed(&mut self) -> Result<(), CryptoError> {
        self.k = self.mac(&[&self.v, &[0x00]])?;
        self.v = self.mac(&[&self.v])?;
        Ok(())
    }
}

/// Big-endian bytes reduced modulo n.
#[inline]
fn reduce(bytes: &[u8; 32]) -> Scalar {
    <Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(bytes))
}

/// Nonce candidates in `[1, n)`, in the order RFC 6979 produces them.
struct NonceStream {
    drbg: HmacDrbg,
    started: bool,
}

impl NonceStream {
    fn new(secret: &[u8; 32], h1: &[u8; 32]) -> Result<Self, CryptoError> {
        // bits2octets(h1) = int2octets(bits2int(h1) mod n)
        let mut h1_reduced = reduce(h1).to_repr();
        let mut h1_octets = [0u8; 32];
        h1_octets.copy_from_slice(&h1_reduced);
        h1_reduced.as_mut_slice().zeroize();

        let drbg = HmacDrbg::new(secret, &h1_octets)?;
        Ok(Self {
            drbg,
            started: false,
        })
    }

    fn next(&mut self) -> Result<Scalar, CryptoError> {
        loop {
            if self.started {
                self.drbg.reseed()?;
            }
            self.started = true;

            let mut candidate = self.drbg.next_candidate()?;
            let k: Option<Scalar> = Scalar::from_repr(FieldBytes::clone_from_slice(&candidate)).into();
            candidate.zeroize();
            match k {
                Some(k) if !bool::from(k.is_zero()) => return Ok(k),
                _ => tracing::trace!("rfc6979 candidate out of range, retrying"),
            }
        }
    }
}

/// First nonce RFC 6979 yields for `secret` and `SHA-256(message)`.
#[cfg(test)]
pub(crate) fn generate_k(secret: &[u8; 32], message: &[u8]) -> Result<Scalar, CryptoError> {
    let h1 = sha256(message);
    NonceStream::new(secret, &h1)?.next()
}

/// ECDSA-P256 over `SHA-256(message)` with RFC 6979 nonces. Returns `r ‖ s` with `s ≤ n/2`.
///
/// `secret` must already be a valid non-zero scalar.
pub fn sign(secret: &[u8; 32], message: &[u8]) -> Result<[u8; 64], CryptoError> {
    let mut d: Scalar = Option::from(Scalar::from_repr(FieldBytes::clone_from_slice(secret)))
        .ok_or(CryptoError::ScalarOutOfRange)?;
    if bool::from(d.is_zero()) {
        return Err(CryptoError::ScalarOutOfRange);
    }

    let h1 = sha256(message);
    let e = reduce(&h1);
    let mut nonces = NonceStream::new(secret, &h1)?;

    let result = loop {
        let mut k = nonces.next()?;

        let big_r = (ProjectivePoint::GENERATOR * k).to_affine();
        let mut x = [0u8; 32];
        x.copy_from_slice(&big_r.x());
        let r = reduce(&x);
        if bool::from(r.is_zero()) {
            k.zeroize();
            continue;
        }

        let k_inv: Option<Scalar> = k.invert().into();
        k.zeroize();
        let Some(mut k_inv) = k_inv else {
            continue;
        };
        let mut s = k_inv * (e + r * d);
        k_inv.zeroize();
        if bool::from(s.is_zero()) {
            continue;
        }

        // low-S: s > n/2 ⇒ s := n − s
        if bool::from(s.is_high()) {
            s = -s;
        }

        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&r.to_repr());
        out[32..].copy_from_slice(&s.to_repr());
        s.zeroize();
        break out;
    };
    d.zeroize();
    Ok(result)
}

//! Streebog-512 digesting and reduction to a group exponent.
//!
//! The hash itself is an external collaborator (GOST R 34.11-2012 via the
//! `streebog` crate); this module only interprets its 512-bit output as a
//! big-endian unsigned integer and folds it into the group.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use streebog::{Digest, Streebog512};

/// Size of the Streebog-512 digest in bytes.
pub const DIGEST_SIZE: usize = 64;

/// Hashes the full content of a message with Streebog-512.
pub fn digest(message: &[u8]) -> [u8; DIGEST_SIZE] {
    Streebog512::digest(message).into()
}

/// Reduces a digest to a nonzero exponent modulo `q`.
///
/// `e = digest mod q`, with `e = 1` substituted when the reduction is zero,
/// so the exponent handed to signing and verification is always invertible
/// modulo the prime `q`.
pub fn reduce(digest: &[u8], q: &BigInt) -> BigInt {
    let value: BigInt = BigUint::from_bytes_be(digest).into();
    let e = value.mod_floor(q);
    if e.is_zero() {
        BigInt::one()
    } else {
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_value(hex: &str) -> BigInt {
        BigInt::parse_bytes(hex.as_bytes(), 16).unwrap()
    }

    #[test]
    fn test_digest_reference_vector() {
        // GOST R 34.11-2012 reference vector M1 (RFC 6986, section 10.1.1).
        let message = b"012345678901234567890123456789012345678901234567890123456789012";
        let expected = hex_value(
            "1b54d01a4af5b9d5cc3d86d68d285462b19abc2475222f35c085122be4ba1ffa\
             00ad30f8767b3a82384c6574f024c311e2a481332b08ef7f41797891c1646f48",
        );
        let got: BigInt = BigUint::from_bytes_be(&digest(message)).into();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_digest_is_deterministic_and_sensitive() {
        assert_eq!(digest(b"message"), digest(b"message"));
        assert_ne!(digest(b"message"), digest(b"messagf"));
        assert_ne!(digest(b""), digest(b"\x00"));
    }

    #[test]
    fn test_reduce() {
        let q = BigInt::from(7);
        assert_eq!(reduce(&[0x09], &q), BigInt::from(2));
        assert_eq!(reduce(&[0x06], &q), BigInt::from(6));
    }

    #[test]
    fn test_reduce_zero_maps_to_one() {
        let q = BigInt::from(7);
        assert_eq!(reduce(&[0x00], &q), BigInt::one());
        assert_eq!(reduce(&[0x0e], &q), BigInt::one());
    }
}

//! Validated domain parameters `(p, a, b, P, q)`.

use crate::{
    curve::{Curve, Point},
    field, Error,
};
use num_bigint::BigInt;

/// The immutable parameter set defining the signing group: a prime-field
/// Weierstrass curve, a base point `P`, and the prime order `q` of `P`.
///
/// Constructed once and shared by reference across every operation; nothing
/// here is mutable after validation, so a `Domain` is safe to share across
/// threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    curve: Curve,
    base: Point,
    q: BigInt,
}

impl Domain {
    /// Validates and assembles a parameter set.
    ///
    /// Checks, in order: `p` and `q` probable primes, curve nonsingular,
    /// base point on the curve, and `q * P = Infinity` for a finite `P`
    /// (which pins the order of `P` to exactly `q`, `q` being prime).
    pub fn new(
        p: BigInt,
        a: BigInt,
        b: BigInt,
        px: BigInt,
        py: BigInt,
        q: BigInt,
    ) -> Result<Self, Error> {
        if !field::is_probable_prime(&p) {
            return Err(Error::NotPrime("p"));
        }
        if !field::is_probable_prime(&q) {
            return Err(Error::NotPrime("q"));
        }
        let curve = Curve::new(p, a, b);
        if !curve.is_nonsingular() {
            return Err(Error::SingularCurve);
        }
        let base = curve.affine(px, py);
        if base.is_infinity() || !curve.contains(&base) {
            return Err(Error::BaseOffCurve);
        }
        if !curve.mul(&q, &base).is_infinity() {
            return Err(Error::WrongOrder);
        }
        Ok(Self { curve, base, q })
    }

    /// The underlying curve.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// The base point `P`.
    pub fn base(&self) -> &Point {
        &self.base
    }

    /// The prime order `q` of the base point.
    pub fn q(&self) -> &BigInt {
        &self.q
    }

    /// Multiplies the base point by a scalar reduced modulo `q`.
    pub fn mul_base(&self, k: &BigInt) -> Point {
        self.curve.mul(&field::reduce(k, &self.q), &self.base)
    }
}

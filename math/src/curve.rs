//! Affine points on a short Weierstrass curve `y^2 = x^3 + a*x + b (mod p)`.

use crate::field;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;
use std::fmt;

/// A point on the curve, either the group identity or an affine pair.
///
/// Coordinates of an `Affine` point are always canonical residues in
/// `[0, p-1]`; every constructor and group operation reduces them, so
/// derived equality is coordinate-wise modular equality and `Infinity`
/// is equal only to itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    /// The point at infinity, the identity of the group law.
    Infinity,
    /// A finite point with affine coordinates.
    Affine { x: BigInt, y: BigInt },
}

impl Point {
    /// Returns whether this is the point at infinity.
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Returns the affine x-coordinate, if any.
    pub fn x(&self) -> Option<&BigInt> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Infinity => write!(f, "infinity"),
            Point::Affine { x, y } => write!(f, "({x}, {y})"),
        }
    }
}

/// A short Weierstrass curve over the prime field `GF(p)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    p: BigInt,
    a: BigInt,
    b: BigInt,
}

impl Curve {
    /// Creates a curve from its field prime and coefficients.
    ///
    /// The coefficients may be given in any residue class (the standard
    /// parameter set uses `a = -1`); they are stored as given so the
    /// original signed values remain observable, and reduced on use.
    pub fn new(p: BigInt, a: BigInt, b: BigInt) -> Self {
        Self { p, a, b }
    }

    /// The field prime.
    pub fn p(&self) -> &BigInt {
        &self.p
    }

    /// The coefficient of the linear term.
    pub fn a(&self) -> &BigInt {
        &self.a
    }

    /// The constant coefficient.
    pub fn b(&self) -> &BigInt {
        &self.b
    }

    /// Returns whether the curve is nonsingular, i.e. `4a^3 + 27b^2 != 0
    /// mod p`.
    pub fn is_nonsingular(&self) -> bool {
        let d = BigInt::from(4) * &self.a * &self.a * &self.a
            + BigInt::from(27) * &self.b * &self.b;
        !d.mod_floor(&self.p).is_zero()
    }

    /// Creates a finite point, reducing the coordinates to canonical form.
    pub fn affine(&self, x: BigInt, y: BigInt) -> Point {
        Point::Affine {
            x: x.mod_floor(&self.p),
            y: y.mod_floor(&self.p),
        }
    }

    /// Returns whether `point` satisfies the curve equation. The point at
    /// infinity is on every curve.
    pub fn contains(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                let lhs = (y * y).mod_floor(&self.p);
                let rhs = (x * x * x + &self.a * x + &self.b).mod_floor(&self.p);
                lhs == rhs
            }
        }
    }

    /// Adds two points with the chord-tangent group law.
    ///
    /// Either operand may be the identity; inverse points sum to
    /// `Infinity`; equal points fall through to [`Curve::double`].
    pub fn add(&self, lhs: &Point, rhs: &Point) -> Point {
        let (x1, y1) = match lhs {
            Point::Infinity => return rhs.clone(),
            Point::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match rhs {
            Point::Infinity => return lhs.clone(),
            Point::Affine { x, y } => (x, y),
        };

        if x1 == x2 {
            if (y1 + y2).mod_floor(&self.p).is_zero() {
                return Point::Infinity;
            }
            return self.double(lhs);
        }

        // The two inverses below cannot fail: the denominators are nonzero
        // residues of the prime p.
        let lambda = match field::inverse(&(x2 - x1), &self.p) {
            Ok(inv) => ((y2 - y1) * inv).mod_floor(&self.p),
            Err(_) => unreachable!("x2 - x1 is nonzero mod a prime"),
        };
        self.chord(&lambda, x1, x2, y1)
    }

    /// Doubles a point with the tangent rule `lambda = (3x^2 + a) / (2y)`.
    pub fn double(&self, point: &Point) -> Point {
        let (x, y) = match point {
            Point::Infinity => return Point::Infinity,
            Point::Affine { x, y } => (x, y),
        };
        if y.is_zero() {
            // Tangent is vertical: the point is its own inverse.
            return Point::Infinity;
        }
        let lambda = match field::inverse(&(BigInt::from(2) * y), &self.p) {
            Ok(inv) => ((BigInt::from(3) * x * x + &self.a) * inv).mod_floor(&self.p),
            Err(_) => unreachable!("2y is nonzero mod a prime"),
        };
        self.chord(&lambda, x, x, y)
    }

    /// Scalar multiplication by double-and-add over the bits of `k`.
    ///
    /// `k` must be nonnegative (callers reduce scalars modulo the group
    /// order first); `mul(0, P)` is the identity.
    pub fn mul(&self, k: &BigInt, point: &Point) -> Point {
        debug_assert!(k.sign() != num_bigint::Sign::Minus);
        let k = k.magnitude();
        let mut acc = Point::Infinity;
        let mut addend = point.clone();
        for i in 0..k.bits() {
            if k.bit(i) {
                acc = self.add(&acc, &addend);
            }
            addend = self.double(&addend);
        }
        acc
    }

    /// Completes addition or doubling given the slope of the chord or
    /// tangent: `x3 = lambda^2 - x1 - x2`, `y3 = lambda(x1 - x3) - y1`.
    fn chord(&self, lambda: &BigInt, x1: &BigInt, x2: &BigInt, y1: &BigInt) -> Point {
        let x3 = (lambda * lambda - x1 - x2).mod_floor(&self.p);
        let y3 = (lambda * (x1 - &x3) - y1).mod_floor(&self.p);
        Point::Affine { x: x3, y: y3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // y^2 = x^3 + x + 1 over GF(23); (0, 1) generates the full group of
    // order 28, and 4*(0,1) = (13, 16) generates the subgroup of order 7.
    fn toy_curve() -> Curve {
        Curve::new(BigInt::from(23), BigInt::from(1), BigInt::from(1))
    }

    #[test]
    fn test_identity_laws() {
        let curve = toy_curve();
        let p = curve.affine(BigInt::from(0), BigInt::from(1));
        assert_eq!(curve.add(&p, &Point::Infinity), p);
        assert_eq!(curve.add(&Point::Infinity, &p), p);
        assert_eq!(
            curve.add(&Point::Infinity, &Point::Infinity),
            Point::Infinity
        );
        assert_eq!(curve.mul(&BigInt::from(0), &p), Point::Infinity);
        assert_eq!(curve.mul(&BigInt::from(1), &p), p);
    }

    #[test]
    fn test_inverse_points_cancel() {
        let curve = toy_curve();
        let p = curve.affine(BigInt::from(0), BigInt::from(1));
        let minus_p = curve.affine(BigInt::from(0), BigInt::from(-1));
        assert_eq!(curve.add(&p, &minus_p), Point::Infinity);
    }

    #[test]
    fn test_small_multiples() {
        let curve = toy_curve();
        let g = curve.affine(BigInt::from(13), BigInt::from(16));
        let expected = [
            (13, 16),
            (5, 19),
            (17, 20),
            (17, 3),
            (5, 4),
            (13, 7),
        ];
        for (i, (x, y)) in expected.iter().enumerate() {
            let got = curve.mul(&BigInt::from(i as u32 + 1), &g);
            assert_eq!(got, curve.affine(BigInt::from(*x), BigInt::from(*y)));
            assert!(curve.contains(&got));
        }
        assert_eq!(curve.mul(&BigInt::from(7), &g), Point::Infinity);
    }

    #[test]
    fn test_add_matches_repeated_addition() {
        let curve = toy_curve();
        let g = curve.affine(BigInt::from(0), BigInt::from(1));
        let mut acc = Point::Infinity;
        for k in 1..=28u32 {
            acc = curve.add(&acc, &g);
            assert_eq!(acc, curve.mul(&BigInt::from(k), &g));
        }
        assert_eq!(acc, Point::Infinity);
    }

    #[test]
    fn test_contains() {
        let curve = toy_curve();
        assert!(curve.contains(&curve.affine(BigInt::from(0), BigInt::from(1))));
        assert!(!curve.contains(&curve.affine(BigInt::from(0), BigInt::from(2))));
        assert!(curve.contains(&Point::Infinity));
    }

    #[test]
    fn test_singular_curve_detected() {
        // 4a^3 + 27b^2 = 23 = 0 mod 23.
        let singular = Curve::new(BigInt::from(23), BigInt::from(-1), BigInt::from(1));
        assert!(!singular.is_nonsingular());
        assert!(toy_curve().is_nonsingular());
    }
}

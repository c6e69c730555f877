//! Modular arithmetic over arbitrary-precision integers.

use crate::Error;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Returns the canonical representative of `x mod m` in `[0, m-1]`.
///
/// The modulus must be positive. Unlike the `%` operator, the result is
/// never negative.
pub fn reduce(x: &BigInt, m: &BigInt) -> BigInt {
    x.mod_floor(m)
}

/// Computes the modular inverse of `x` modulo `m` with the extended
/// Euclidean algorithm.
///
/// Returns [`Error::NoInverse`] when `gcd(x, m) != 1`. For a prime modulus
/// this only happens when `x` is a multiple of `m`.
pub fn inverse(x: &BigInt, m: &BigInt) -> Result<BigInt, Error> {
    let x = x.mod_floor(m);
    if x.is_zero() {
        return Err(Error::NoInverse);
    }

    // Invariant: r0 = t0*x (mod m) and r1 = t1*x (mod m).
    let (mut r0, mut r1) = (m.clone(), x);
    let (mut t0, mut t1) = (BigInt::zero(), BigInt::one());
    while !r1.is_zero() {
        let q = &r0 / &r1;
        let r2 = &r0 - &q * &r1;
        let t2 = &t0 - &q * &t1;
        r0 = r1;
        r1 = r2;
        t0 = t1;
        t1 = t2;
    }
    if !r0.is_one() {
        return Err(Error::NoInverse);
    }
    Ok(t0.mod_floor(m))
}

/// Bases for the Miller-Rabin test. Deterministic for every integer below
/// 3.3 * 10^24; a negligible (< 2^-48) false-positive rate beyond that,
/// which is sufficient for validating operator-supplied domain parameters.
const MILLER_RABIN_BASES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Miller-Rabin primality test over the fixed base set.
pub fn is_probable_prime(n: &BigInt) -> bool {
    let two = BigInt::from(2);
    if n < &two {
        return false;
    }
    for base in MILLER_RABIN_BASES {
        let base = BigInt::from(base);
        if n == &base {
            return true;
        }
        if (n % &base).is_zero() {
            return false;
        }
    }

    // n - 1 = d * 2^r with d odd.
    let n_minus_one = n - BigInt::one();
    let mut d = n_minus_one.clone();
    let mut r = 0u64;
    while d.is_even() {
        d /= &two;
        r += 1;
    }

    'witness: for base in MILLER_RABIN_BASES {
        let mut x = BigInt::from(base).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 0..r.saturating_sub(1) {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

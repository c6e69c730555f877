//! Key generation, signing, and verification.

use crate::Error;
use gostec_math::{curve::Point, domain::Domain, field};
use num_bigint::{BigInt, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, Rng};
use std::fmt;

/// Upper bound on rejection-sampling attempts while signing. Each retry
/// fails with probability about `1/q`, so hitting this bound means the
/// randomness source or domain parameters are defective.
const MAX_ATTEMPTS: u32 = 256;

/// A signature pair `(r, s)`, each in `[1, q-1]` by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The reduced x-coordinate of the nonce point.
    pub r: BigInt,
    /// The proof scalar `(r*d + k*e) mod q`.
    pub s: BigInt,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(r = {}, s = {})", self.r, self.s)
    }
}

/// A private scalar and its public point `Q = d*P`.
pub struct KeyPair {
    d: BigInt,
    public: Point,
}

impl KeyPair {
    /// Draws a private scalar uniformly from `[1, q-1]` and derives the
    /// public point.
    pub fn generate<R: Rng + CryptoRng>(domain: &Domain, rng: &mut R) -> Self {
        let d = rng.gen_bigint_range(&BigInt::one(), domain.q());
        let public = domain.mul_base(&d);
        Self { d, public }
    }

    /// The private scalar. Never leaves the process; only the public point
    /// is exported in a bundle.
    pub fn private(&self) -> &BigInt {
        &self.d
    }

    /// The public point `Q`.
    pub fn public(&self) -> &Point {
        &self.public
    }

    /// Consumes the pair, discarding the private scalar.
    pub fn into_public(self) -> Point {
        self.public
    }
}

/// Signs a reduced digest `e` with the private scalar `d`.
///
/// Nonces are rejection-sampled: a draw is discarded when it would produce
/// `r = 0` or `s = 0`. The loop is bounded by [`MAX_ATTEMPTS`]; exhaustion
/// returns [`Error::RetriesExhausted`] rather than spinning forever.
pub fn sign<R: Rng + CryptoRng>(
    domain: &Domain,
    d: &BigInt,
    e: &BigInt,
    rng: &mut R,
) -> Result<Signature, Error> {
    for _ in 0..MAX_ATTEMPTS {
        let k = rng.gen_bigint_range(&BigInt::one(), domain.q());
        if let Some(signature) = sign_with_nonce(domain, d, e, &k) {
            return Ok(signature);
        }
    }
    Err(Error::RetriesExhausted)
}

/// One signing attempt with a fixed nonce. `None` means the nonce must be
/// resampled.
fn sign_with_nonce(domain: &Domain, d: &BigInt, e: &BigInt, k: &BigInt) -> Option<Signature> {
    let c = domain.mul_base(k);
    let r = field::reduce(c.x()?, domain.q());
    if r.is_zero() {
        return None;
    }
    let s = field::reduce(&(&r * d + k * e), domain.q());
    if s.is_zero() {
        return None;
    }
    Some(Signature { r, s })
}

/// Verifies a signature over the reduced digest `e` with public point `Q`.
///
/// Out-of-range components (`r` or `s` outside `[1, q-1]`) are a normal
/// rejection, not an error: the function returns `false` without further
/// computation. Otherwise accepts iff `(s*e^-1)*P + (-r*e^-1)*Q` is a
/// finite point whose x-coordinate reduces to `r`.
pub fn verify(domain: &Domain, public: &Point, e: &BigInt, signature: &Signature) -> bool {
    let q = domain.q();
    let in_range = |v: &BigInt| v > &BigInt::zero() && v < q;
    if !in_range(&signature.r) || !in_range(&signature.s) {
        return false;
    }

    // `e` is nonzero mod the prime `q` by the hash-reduction contract, so
    // the inverse exists; an unsatisfiable `e` conservatively rejects.
    let Ok(v) = field::inverse(e, q) else {
        return false;
    };
    let z1 = field::reduce(&(&signature.s * &v), q);
    let z2 = field::reduce(&(-(&signature.r) * &v), q);

    let curve = domain.curve();
    let c = curve.add(&curve.mul(&z1, domain.base()), &curve.mul(&z2, public));
    match c.x() {
        None => false,
        Some(x) => field::reduce(x, q) == signature.r,
    }
}

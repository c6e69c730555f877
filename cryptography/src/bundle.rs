//! The interchange bundle: algorithm identifier, public key, domain
//! parameters, and signature in one fixed nested DER structure.
//!
//! Layout (depth first):
//!
//! ```text
//! SEQUENCE {
//!   SET {
//!     SEQUENCE {
//!       OCTET STRING 80 06 07 00      -- algorithm tag
//!       UTF8String  "gostSignKey"     -- algorithm label
//!       SEQUENCE { INTEGER Qx, INTEGER Qy }
//!       SEQUENCE {
//!         SEQUENCE { INTEGER p }
//!         SEQUENCE { INTEGER a mod q, INTEGER b }
//!         SEQUENCE { INTEGER Px, INTEGER Py }
//!         INTEGER q
//!       }
//!       SEQUENCE { INTEGER r, INTEGER s }
//!     }
//!   }
//!   SEQUENCE { }                      -- empty trailer
//! }
//! ```
//!
//! Decoding validates this exact shape and extracts named fields directly;
//! a structural mismatch anywhere fails the decode instead of silently
//! shifting values between fields.

use crate::{Error, Signature};
use bytes::{Buf, Bytes, BytesMut};
use gostec_codec::{der, tag};
use gostec_math::{curve::Point, domain::Domain, field};
use num_bigint::BigInt;
use num_traits::Zero;
use std::fmt;

/// Constant algorithm identifier tag.
const ALGORITHM_TAG: [u8; 4] = [0x80, 0x06, 0x07, 0x00];

/// Constant algorithm identifier label.
const ALGORITHM_LABEL: &str = "gostSignKey";

/// Everything a verifier needs, as persisted to the signature file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bundle {
    domain: Domain,
    public: Point,
    signature: Signature,
}

impl Bundle {
    /// Assembles a bundle. The public point is expected to come from
    /// [`crate::KeyPair::generate`] over the same domain.
    pub fn new(domain: Domain, public: Point, signature: Signature) -> Self {
        Self {
            domain,
            public,
            signature,
        }
    }

    /// The embedded domain parameters.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The embedded public key point.
    pub fn public(&self) -> &Point {
        &self.public
    }

    /// The embedded signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Verifies the embedded signature against a message, using the
    /// embedded domain parameters and public key.
    pub fn verify(&self, message: &[u8]) -> bool {
        let e = crate::hash::reduce(&crate::hash::digest(message), self.domain.q());
        crate::scheme::verify(&self.domain, &self.public, &e, &self.signature)
    }

    /// Encodes the bundle into its fixed nested structure.
    ///
    /// The curve coefficient `a` travels as the nonnegative residue
    /// `a mod q`, which is only unambiguous for `a` in `(-q, 0]`; any
    /// other coefficient fails with [`Error::CoefficientRange`].
    pub fn encode(&self) -> Result<Bytes, Error> {
        let curve = self.domain.curve();
        let q = self.domain.q();
        if curve.a() > &BigInt::zero() || curve.a() <= &(-q) {
            return Err(Error::CoefficientRange);
        }

        let (qx, qy) = coordinates(&self.public)?;
        let (px, py) = coordinates(self.domain.base())?;

        let mut algorithm = BytesMut::new();
        der::write_octet_string(&ALGORITHM_TAG, &mut algorithm);
        der::write_utf8_string(ALGORITHM_LABEL, &mut algorithm);

        let mut key = BytesMut::new();
        der::write_integer(qx, &mut key);
        der::write_integer(qy, &mut key);
        der::write_tlv(tag::SEQUENCE, &key, &mut algorithm);

        let mut parameters = BytesMut::new();
        let mut prime = BytesMut::new();
        der::write_integer(curve.p(), &mut prime);
        der::write_tlv(tag::SEQUENCE, &prime, &mut parameters);
        let mut coefficients = BytesMut::new();
        der::write_integer(&field::reduce(curve.a(), q), &mut coefficients);
        der::write_integer(curve.b(), &mut coefficients);
        der::write_tlv(tag::SEQUENCE, &coefficients, &mut parameters);
        let mut base = BytesMut::new();
        der::write_integer(px, &mut base);
        der::write_integer(py, &mut base);
        der::write_tlv(tag::SEQUENCE, &base, &mut parameters);
        der::write_integer(q, &mut parameters);
        der::write_tlv(tag::SEQUENCE, &parameters, &mut algorithm);

        let mut signature = BytesMut::new();
        der::write_integer(&self.signature.r, &mut signature);
        der::write_integer(&self.signature.s, &mut signature);
        der::write_tlv(tag::SEQUENCE, &signature, &mut algorithm);

        let mut set = BytesMut::new();
        der::write_tlv(tag::SEQUENCE, &algorithm, &mut set);
        let mut outer = BytesMut::new();
        der::write_tlv(tag::SET, &set, &mut outer);
        der::write_tlv(tag::SEQUENCE, &[], &mut outer); // empty trailer

        let mut bytes = BytesMut::new();
        der::write_tlv(tag::SEQUENCE, &outer, &mut bytes);
        Ok(bytes.freeze())
    }

    /// Decodes and validates a bundle.
    ///
    /// Fails on any structural mismatch, on leftover bytes at any nesting
    /// level, on domain parameters that do not validate, and on a public
    /// key off the curve. The coefficient residue is mapped back to the
    /// signed value: `0` stays `0`, anything else becomes `residue - q`.
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let mut buf = Bytes::copy_from_slice(bytes);
        let mut outer = der::read_container(tag::SEQUENCE, &mut buf)?;
        if buf.has_remaining() {
            return Err(gostec_codec::Error::ExtraData(buf.remaining()).into());
        }

        let mut set = der::read_container(tag::SET, &mut outer)?;
        let mut algorithm = der::read_container(tag::SEQUENCE, &mut set)?;
        drained(set)?;

        let identifier = der::read_octet_string(&mut algorithm)?;
        if identifier.as_ref() != ALGORITHM_TAG {
            return Err(gostec_codec::Error::UnexpectedValue("algorithm tag").into());
        }
        let label = der::read_utf8_string(&mut algorithm)?;
        if label != ALGORITHM_LABEL {
            return Err(gostec_codec::Error::UnexpectedValue("algorithm label").into());
        }

        let mut key = der::read_container(tag::SEQUENCE, &mut algorithm)?;
        let qx = der::read_integer(&mut key)?;
        let qy = der::read_integer(&mut key)?;
        drained(key)?;

        let mut parameters = der::read_container(tag::SEQUENCE, &mut algorithm)?;
        let mut prime = der::read_container(tag::SEQUENCE, &mut parameters)?;
        let p = der::read_integer(&mut prime)?;
        drained(prime)?;
        let mut coefficients = der::read_container(tag::SEQUENCE, &mut parameters)?;
        let a_residue = der::read_integer(&mut coefficients)?;
        let b = der::read_integer(&mut coefficients)?;
        drained(coefficients)?;
        let mut base = der::read_container(tag::SEQUENCE, &mut parameters)?;
        let px = der::read_integer(&mut base)?;
        let py = der::read_integer(&mut base)?;
        drained(base)?;
        let q = der::read_integer(&mut parameters)?;
        drained(parameters)?;

        let mut signature = der::read_container(tag::SEQUENCE, &mut algorithm)?;
        let r = der::read_integer(&mut signature)?;
        let s = der::read_integer(&mut signature)?;
        drained(signature)?;
        drained(algorithm)?;

        let trailer = der::read_container(tag::SEQUENCE, &mut outer)?;
        drained(trailer)?;
        drained(outer)?;

        // Recover the signed coefficient from its residue.
        let a = if a_residue.is_zero() {
            a_residue
        } else {
            a_residue - &q
        };

        let domain = Domain::new(p, a, b, px, py, q)?;
        let public = domain.curve().affine(qx, qy);
        if public.is_infinity() || !domain.curve().contains(&public) {
            return Err(Error::InvalidPublicKey);
        }
        Ok(Self {
            domain,
            public,
            signature: Signature { r, s },
        })
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let curve = self.domain.curve();
        writeln!(f, "Q  = {}", self.public)?;
        writeln!(f, "p  = {}", curve.p())?;
        writeln!(f, "a  = {}", curve.a())?;
        writeln!(f, "b  = {}", curve.b())?;
        writeln!(f, "P  = {}", self.domain.base())?;
        writeln!(f, "q  = {}", self.domain.q())?;
        write!(f, "sig = {}", self.signature)
    }
}

/// Returns the coordinates of a finite point; the identity has none and
/// cannot be transported.
fn coordinates(point: &Point) -> Result<(&BigInt, &BigInt), Error> {
    match point {
        Point::Infinity => Err(Error::InvalidPublicKey),
        Point::Affine { x, y } => Ok((x, y)),
    }
}

/// Ensures a container was fully consumed.
fn drained(buf: Bytes) -> Result<(), Error> {
    if buf.has_remaining() {
        return Err(gostec_codec::Error::ExtraData(buf.remaining()).into());
    }
    Ok(())
}

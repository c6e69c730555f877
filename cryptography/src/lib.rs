//! GOST-style elliptic-curve signatures: generate keys, sign file contents,
//! and deterministically verify signature bundles.
//!
//! The scheme follows GOST R 34.10 over a prime-field Weierstrass curve:
//! a private scalar `d` signs the Streebog-512 digest of a message, and the
//! resulting `(r, s)` pair travels in a self-describing DER bundle together
//! with the public key and the full domain parameter set, so verification
//! needs nothing but the message bytes and the bundle.
//!
//! # Example
//!
//! ```
//! use gostec_cryptography::{params, sign_message, verify_message};
//! use rand::rngs::OsRng;
//!
//! let domain = params::standard();
//! let message = b"hello, world!";
//! let bundle = sign_message(&domain, message, &mut OsRng).unwrap();
//! assert!(verify_message(message, &bundle).unwrap());
//! assert!(!verify_message(b"tampered", &bundle).unwrap());
//! ```

pub mod bundle;
mod error;
pub mod hash;
pub mod params;
pub mod scheme;

pub use bundle::Bundle;
pub use error::Error;
pub use scheme::{KeyPair, Signature};

use bytes::Bytes;
use gostec_math::domain::Domain;
use rand::{CryptoRng, Rng};

/// Signs `message` with a freshly generated key pair over `domain` and
/// returns the encoded signature bundle.
///
/// The private scalar lives only for the duration of the call; the bundle
/// carries the public key, the domain parameters, and the signature.
pub fn sign_message<R: Rng + CryptoRng>(
    domain: &Domain,
    message: &[u8],
    rng: &mut R,
) -> Result<Bytes, Error> {
    let keypair = KeyPair::generate(domain, rng);
    let e = hash::reduce(&hash::digest(message), domain.q());
    let signature = scheme::sign(domain, keypair.private(), &e, rng)?;
    Bundle::new(domain.clone(), keypair.into_public(), signature).encode()
}

/// Verifies an encoded signature bundle against `message`.
///
/// Returns `Ok(false)` for a well-formed bundle whose signature does not
/// check out (including out-of-range `r`/`s`), and an error when the bundle
/// cannot be decoded or its embedded parameters are invalid.
pub fn verify_message(message: &[u8], bundle: &[u8]) -> Result<bool, Error> {
    Ok(Bundle::decode(bundle)?.verify(message))
}

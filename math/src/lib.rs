//! Arbitrary-precision prime-field and elliptic-curve arithmetic.
//!
//! Everything operates on [`num_bigint::BigInt`]: no fixed-width overflow is
//! possible, and all residues are kept canonical in `[0, m-1]`. Operations
//! return new values rather than mutating in place, and no module-level
//! state exists: curve and group parameters travel as an explicit
//! [`domain::Domain`] value passed by reference.

pub mod curve;
pub mod domain;
mod error;
pub mod field;

pub use error::Error;

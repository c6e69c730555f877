//! Serialize signature bundles as DER tag-length-value structures.
//!
//! # Overview
//!
//! A small binary serialization library designed to efficiently and safely:
//! - Write nested tag-length-value structures into a binary buffer
//! - Walk untrusted binary input back into those structures
//!
//! The encoding is the definite-length subset of ASN.1 BER (i.e. DER):
//! every field carries a universal tag and a length before its value, and
//! integers use minimal-length two's-complement big-endian form. Only the
//! handful of universal types a signature bundle needs is implemented;
//! this is not a general ASN.1 compiler.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use gostec_codec::{der, tag};
//! use num_bigint::BigInt;
//!
//! // SEQUENCE { INTEGER 7 }
//! let mut inner = BytesMut::new();
//! der::write_integer(&BigInt::from(7), &mut inner);
//! let mut buf = BytesMut::new();
//! der::write_tlv(tag::SEQUENCE, &inner, &mut buf);
//!
//! let mut read = buf.freeze();
//! let mut content = der::read_container(tag::SEQUENCE, &mut read).unwrap();
//! assert_eq!(der::read_integer(&mut content).unwrap(), BigInt::from(7));
//! ```

pub mod der;
mod error;

pub use error::Error;

/// Universal ASN.1 tags used by the bundle format.
pub mod tag {
    /// Primitive INTEGER.
    pub const INTEGER: u8 = 0x02;
    /// Primitive OCTET STRING.
    pub const OCTET_STRING: u8 = 0x04;
    /// Primitive UTF8String.
    pub const UTF8_STRING: u8 = 0x0c;
    /// Constructed SEQUENCE.
    pub const SEQUENCE: u8 = 0x30;
    /// Constructed SET.
    pub const SET: u8 = 0x31;
}

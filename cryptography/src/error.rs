//! Error types for signing, verification, and bundle transport.

use thiserror::Error;

/// Error type for signature operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The bounded rejection-sampling loop ran out of attempts. This
    /// indicates a defective randomness source or domain parameters, not a
    /// transient condition; callers must treat it as fatal.
    #[error("retry limit exhausted while sampling")]
    RetriesExhausted,
    /// The bundle bytes do not parse as the expected nested structure.
    #[error("malformed signature bundle: {0}")]
    MalformedBundle(#[from] gostec_codec::Error),
    /// The domain parameters embedded in a bundle fail validation.
    #[error("invalid domain parameters: {0}")]
    InvalidDomain(#[from] gostec_math::Error),
    /// The public key embedded in a bundle is not a curve point.
    #[error("public key is not on the curve")]
    InvalidPublicKey,
    /// The curve coefficient lies outside `(-q, 0]`, the only range the
    /// residue transport encoding can represent unambiguously.
    #[error("curve coefficient out of encodable range")]
    CoefficientRange,
}

//! Error types for arithmetic and parameter validation.

use thiserror::Error;

/// Error type for field operations and domain-parameter validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no modular inverse exists")]
    NoInverse,
    #[error("modulus {0} is not prime")]
    NotPrime(&'static str), // parameter name
    #[error("curve is singular (4a^3 + 27b^2 = 0 mod p)")]
    SingularCurve,
    #[error("base point is not on the curve")]
    BaseOffCurve,
    #[error("base point does not have order q")]
    WrongOrder,
}

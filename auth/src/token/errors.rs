use thiserror::Error;

/// Error type for token codec operations.
///
/// The three verification failures are distinguishable internally for
/// logging and tests; the HTTP layer maps all of them to a generic 401.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}

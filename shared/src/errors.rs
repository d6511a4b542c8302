//! Error types shared between the API and its clients

use thiserror::Error;

/// Authentication error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid or expired authenticator code")]
    InvalidCode,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Malformed OTP secret")]
    MalformedSecret,

    #[error("System clock is before the Unix epoch")]
    ClockUnavailable,
}

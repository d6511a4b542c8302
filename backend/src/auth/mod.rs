//! Authentication module
//!
//! TOTP verification for the authenticate flow and JWT access token issuance.

mod jwt;
mod otp;

pub use jwt::{Claims, JwtService};
pub use otp::OtpService;

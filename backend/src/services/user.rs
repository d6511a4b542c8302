//! User service: registration and OTP authentication

use crate::auth::{JwtService, OtpService};
use crate::error::ApiError;
use crate::repositories::{NewUser, RepositoryError, UserRepository};
use exercisedb_shared::{AccessToken, AuthError, RegisteredUser, UserRole};
use tracing::{info, warn};

/// User service for registration and authentication
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// Generates a fresh OTP secret and returns it alongside the record. This
    /// is the only response that ever carries the secret.
    pub async fn create_user(
        repo: &dyn UserRepository,
        otp: &OtpService,
        email: &str,
    ) -> Result<RegisteredUser, ApiError> {
        let email = normalize_email(email);

        let user = repo
            .insert(NewUser {
                email,
                role: UserRole::default(),
                otp_secret: otp.generate_secret(),
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Duplicate(_) => {
                    ApiError::Conflict("Email already registered".to_string())
                }
                other => other.into(),
            })?;

        info!(user_id = %user.id, "User registered");
        Ok(RegisteredUser::from(user))
    }

    /// Verify an authenticator code and issue an access token
    pub async fn authenticate(
        repo: &dyn UserRepository,
        otp: &OtpService,
        jwt: &JwtService,
        email: &str,
        code: &str,
    ) -> Result<AccessToken, ApiError> {
        let email = normalize_email(email);

        let user = repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        otp.verify(&user.otp_secret, code).map_err(|e| {
            if e == AuthError::InvalidCode {
                warn!(user_id = %user.id, "Rejected authenticator code");
            }
            ApiError::from(e)
        })?;

        let access_token = jwt.generate_access_token(user.id, user.role)?;

        info!(user_id = %user.id, "User authenticated");
        Ok(AccessToken { access_token })
    }
}

/// Emails are stored and looked up lowercased
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

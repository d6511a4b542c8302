//! API request and response types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{Exercise, User, UserRole};
use crate::validation::{validate_entries, validate_not_blank, validate_otp_code};

/// Default page size for exercise listings
pub const DEFAULT_PAGE_LIMIT: u64 = 10;
/// Largest page size a client may request
pub const MAX_PAGE_LIMIT: u64 = 100;

// ============================================================================
// Envelopes
// ============================================================================

/// Success envelope wrapping every successful response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Internal Server Error")]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

// ============================================================================
// Exercise Types
// ============================================================================

/// Create exercise request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExerciseRequest {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "KCBKjma")]
    pub exercise_id: String,
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Band Jack Knife Sit-up")]
    pub name: String,
    #[validate(url)]
    #[schema(example = "https://ucarecdn.com/05fcc879-04d4-4222-8896-e3772a8a3060/KCBKjma.gif")]
    pub gif_url: String,
    #[validate(custom(function = "validate_entries"))]
    #[schema(example = json!(["abs"]))]
    pub target_muscles: Vec<String>,
    #[validate(custom(function = "validate_entries"))]
    #[schema(example = json!(["waist", "back"]))]
    pub body_parts: Vec<String>,
    #[validate(custom(function = "validate_entries"))]
    #[schema(example = json!(["band"]))]
    pub equipments: Vec<String>,
    #[validate(custom(function = "validate_entries"))]
    #[schema(example = json!(["abs", "lats"]))]
    pub secondary_muscles: Vec<String>,
    #[validate(custom(function = "validate_entries"))]
    #[schema(example = json!(["Step 1: Start with...", "Step 2: Move into..."]))]
    pub instructions: Vec<String>,
}

/// Exercise listing query
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExerciseListQuery {
    /// Number of exercises to skip
    #[validate(range(min = 0, message = "offset must be a non-negative number"))]
    #[param(minimum = 0, default = 0, example = 10)]
    pub offset: Option<i64>,
    /// Maximum number of exercises to return
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, default = 10, example = 10)]
    pub limit: Option<i64>,
}

impl ExerciseListQuery {
    /// Offset with the default applied. Call after validation.
    pub fn offset(&self) -> u64 {
        self.offset.map(|v| v.max(0) as u64).unwrap_or(0)
    }

    /// Limit with the default applied. Call after validation.
    pub fn limit(&self) -> u64 {
        self.limit
            .map(|v| (v.max(1) as u64).min(MAX_PAGE_LIMIT))
            .unwrap_or(DEFAULT_PAGE_LIMIT)
    }
}

/// One page of exercises
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePage {
    /// `floor(offset / limit) + 1`
    #[schema(example = 2)]
    pub current_page: u64,
    #[schema(example = 3)]
    pub total_pages: u64,
    #[schema(example = 25)]
    pub total_exercises: u64,
    pub exercises: Vec<Exercise>,
}

/// Page of exercises with navigation links
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePageResponse {
    #[schema(example = "http://localhost:8080/exercises?offset=0&limit=10")]
    pub previous_page: Option<String>,
    #[schema(example = "http://localhost:8080/exercises?offset=20&limit=10")]
    pub next_page: Option<String>,
    #[serde(flatten)]
    pub page: ExercisePage,
}

// ============================================================================
// User Types
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    #[schema(example = "johndoe@example.com")]
    pub email: String,
}

/// Authentication request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AuthenticateRequest {
    #[validate(email(message = "must be a valid email address"))]
    #[schema(example = "johndoe@example.com")]
    pub email: String,
    /// Code generated by an authenticator app
    #[validate(custom(function = "validate_otp_code"))]
    #[schema(example = "123456")]
    pub code: String,
}

/// Newly registered user, including the one-time OTP secret
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    #[schema(example = "0c3a9f0e-1f1b-4a43-9a55-0d3c1e6f1a2b")]
    pub id: String,
    #[schema(example = "johndoe@example.com")]
    pub email: String,
    pub role: UserRole,
    pub is_activated: bool,
    /// Base32 secret for enrolling an authenticator app
    #[schema(example = "JBSWY3DPEHPK3PXPJBSWY3DPEHPK3PXP")]
    pub otp_secret: String,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            role: user.role,
            is_activated: user.is_activated,
            otp_secret: user.otp_secret,
        }
    }
}

/// Access token issued after a successful authentication
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
}

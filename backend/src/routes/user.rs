//! User routes
//!
//! - `POST /register` - create an account and return its OTP secret once
//! - `POST /authenticate` - exchange an authenticator code for an access token

use crate::error::ApiResult;
use crate::routes::extract::ValidatedJson;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use exercisedb_shared::{
    AccessToken, ApiResponse, AuthenticateRequest, ErrorResponse, RegisterRequest, RegisteredUser,
};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/authenticate", post(authenticate))
}

/// Register a user account
#[utoipa::path(
    post,
    path = "/register",
    operation_id = "registerUser",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered; the OTP secret is only returned here", body = ApiResponse<RegisteredUser>),
        (status = 400, description = "Invalid input data", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "Users"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<RegisteredUser>>)> {
    let user = UserService::create_user(state.users(), state.otp(), &req.email).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// Authenticate with email and authenticator code
#[utoipa::path(
    post,
    path = "/authenticate",
    operation_id = "authenticateUser",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "User authenticated", body = ApiResponse<AccessToken>),
        (status = 400, description = "Invalid input data", body = ErrorResponse),
        (status = 401, description = "Invalid or expired authenticator code", body = ErrorResponse),
        (status = 404, description = "No user with this email", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "Users"
)]
pub async fn authenticate(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AuthenticateRequest>,
) -> ApiResult<Json<ApiResponse<AccessToken>>> {
    let token = UserService::authenticate(
        state.users(),
        state.otp(),
        state.jwt(),
        &req.email,
        &req.code,
    )
    .await?;

    Ok(Json(ApiResponse::ok(token)))
}

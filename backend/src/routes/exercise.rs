//! Exercise routes
//!
//! - `POST /exercises` - add an exercise to the catalog
//! - `GET /exercises` - paginated listing with previous/next links

use crate::error::ApiResult;
use crate::routes::extract::{ValidatedJson, ValidatedQuery};
use crate::services::ExerciseService;
use crate::state::AppState;
use axum::{
    extract::{OriginalUri, State},
    http::{header::HOST, HeaderMap, StatusCode, Uri},
    routing::post,
    Json, Router,
};
use exercisedb_shared::{
    ApiResponse, CreateExerciseRequest, ErrorResponse, Exercise, ExerciseListQuery,
    ExercisePageResponse,
};

/// Create exercise routes
pub fn exercise_routes() -> Router<AppState> {
    Router::new().route("/exercises", post(create_exercise).get(list_exercises))
}

/// Add a new exercise to the database
#[utoipa::path(
    post,
    path = "/exercises",
    operation_id = "createExercise",
    request_body = CreateExerciseRequest,
    responses(
        (status = 201, description = "Exercise successfully added to the database", body = ApiResponse<Vec<Exercise>>),
        (status = 400, description = "The input data for the exercise is invalid or incomplete", body = ErrorResponse),
        (status = 409, description = "An exercise with the same name already exists", body = ErrorResponse),
        (status = 500, description = "An unexpected error occurred on the server", body = ErrorResponse),
    ),
    tag = "Exercises"
)]
pub async fn create_exercise(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateExerciseRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Vec<Exercise>>>)> {
    let exercise = ExerciseService::create_exercise(state.exercises(), req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(vec![exercise]))))
}

/// Retrieve a page of exercises
#[utoipa::path(
    get,
    path = "/exercises",
    operation_id = "getExercises",
    params(ExerciseListQuery),
    responses(
        (status = 200, description = "Page of exercises with navigation links", body = ApiResponse<ExercisePageResponse>),
        (status = 400, description = "Invalid offset or limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "Exercises"
)]
pub async fn list_exercises(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    ValidatedQuery(query): ValidatedQuery<ExerciseListQuery>,
) -> ApiResult<Json<ApiResponse<ExercisePageResponse>>> {
    let (offset, limit) = (query.offset(), query.limit());
    let page = ExerciseService::list_exercises(state.exercises(), offset, limit).await?;

    let base_url = request_base_url(&headers, &uri);
    let (previous_page, next_page) = page_links(&base_url, offset, limit);

    Ok(Json(ApiResponse::ok(ExercisePageResponse {
        previous_page,
        next_page,
        page,
    })))
}

/// Origin and path of the incoming request, without the query string
fn request_base_url(headers: &HeaderMap, uri: &Uri) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|proto| *proto == "http" || *proto == "https")
        .unwrap_or("http");
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or("localhost");

    format!("{}://{}{}", scheme, host, uri.path())
}

/// Previous/next links for a page
///
/// Offset 0 yields no links, even when more items exist. Otherwise previous
/// is `offset - limit` (floored at 0) and next is `offset + limit`.
fn page_links(base_url: &str, offset: u64, limit: u64) -> (Option<String>, Option<String>) {
    if offset == 0 {
        return (None, None);
    }

    let previous = offset.saturating_sub(limit);
    let next = offset + limit;
    (
        Some(format!("{}?offset={}&limit={}", base_url, previous, limit)),
        Some(format!("{}?offset={}&limit={}", base_url, next, limit)),
    )
}

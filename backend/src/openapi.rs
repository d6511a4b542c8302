//! OpenAPI document assembled from the route annotations

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ExerciseDB API",
        description = "Exercise catalog with paginated listing and OTP-based user authentication."
    ),
    paths(
        crate::routes::exercise::create_exercise,
        crate::routes::exercise::list_exercises,
        crate::routes::user::register,
        crate::routes::user::authenticate,
        crate::routes::health::health_check,
        crate::routes::health::readiness_check,
        crate::routes::health::liveness_check,
    ),
    components(schemas(
        exercisedb_shared::Exercise,
        exercisedb_shared::UserRole,
        exercisedb_shared::CreateExerciseRequest,
        exercisedb_shared::ExercisePage,
        exercisedb_shared::ExercisePageResponse,
        exercisedb_shared::RegisterRequest,
        exercisedb_shared::RegisteredUser,
        exercisedb_shared::AuthenticateRequest,
        exercisedb_shared::AccessToken,
        exercisedb_shared::ErrorResponse,
        crate::routes::health::HealthResponse,
    )),
    tags(
        (name = "Exercises", description = "Exercise catalog"),
        (name = "Users", description = "Registration and authentication"),
        (name = "System", description = "Health and readiness probes"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/exercises",
            "/register",
            "/authenticate",
            "/health",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_operation_ids() {
        let json = ApiDoc::openapi().to_json().unwrap();
        for id in ["createExercise", "getExercises", "registerUser", "authenticateUser"] {
            assert!(json.contains(id), "missing operation {}", id);
        }
    }

    #[test]
    fn test_title() {
        assert_eq!(ApiDoc::openapi().info.title, "ExerciseDB API");
    }
}

//! Router-level tests for registration and authentication

#[cfg(test)]
mod tests {
    use crate::auth::OtpService;
    use crate::config::AppConfig;
    use crate::routes::create_router;
    use crate::state::AppState;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::in_memory(AppConfig::default()))
    }

    async fn post(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn register(app: &Router, email: &str) -> Value {
        let (status, body) = post(app, "/register", &json!({ "email": email })).await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"].clone()
    }

    fn current_code(secret: &str) -> String {
        OtpService::new(&AppConfig::default().otp)
            .generate_current(secret)
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_returns_secret_once() {
        let app = app();
        let user = register(&app, "johndoe@example.com").await;

        assert_eq!(user["email"], "johndoe@example.com");
        assert_eq!(user["role"], "member");
        assert_eq!(user["isActivated"], false);
        assert!(!user["otpSecret"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let app = app();
        register(&app, "johndoe@example.com").await;

        let (status, body) = post(&app, "/register", &json!({ "email": "JohnDoe@example.com" })).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
    }

    #[rstest]
    #[case(json!({ "email": "not-an-email" }))]
    #[case(json!({ "email": "" }))]
    #[case(json!({}))]
    #[tokio::test]
    async fn test_register_rejects_bad_input(#[case] body: Value) {
        let (status, _) = post(&app(), "/register", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_authenticate_with_current_code() {
        let app = app();
        let user = register(&app, "johndoe@example.com").await;
        let code = current_code(user["otpSecret"].as_str().unwrap());

        let (status, body) = post(
            &app,
            "/authenticate",
            &json!({ "email": "johndoe@example.com", "code": code }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let token = body["data"]["accessToken"].as_str().unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[tokio::test]
    async fn test_authenticate_wrong_code_is_unauthorized() {
        let app = app();
        let user = register(&app, "johndoe@example.com").await;
        let code = current_code(user["otpSecret"].as_str().unwrap());
        let wrong = format!("{:06}", (code.parse::<u32>().unwrap() + 500_000) % 1_000_000);

        let (status, body) = post(
            &app,
            "/authenticate",
            &json!({ "email": "johndoe@example.com", "code": wrong }),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email_is_not_found() {
        let (status, _) = post(
            &app(),
            "/authenticate",
            &json!({ "email": "ghost@example.com", "code": "123456" }),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Codes that are not 6-8 digits never reach the user lookup
        #[test]
        fn prop_malformed_code_is_bad_request(code in "[0-9]{0,5}|[0-9]{9,12}|[a-z]{6}") {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let (status, _) = post(
                    &app(),
                    "/authenticate",
                    &json!({ "email": "ghost@example.com", "code": code }),
                )
                .await;
                prop_assert_eq!(status, StatusCode::BAD_REQUEST);
                Ok(())
            })?;
        }
    }
}

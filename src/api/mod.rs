// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_auth, CredentialPair, Identity},
    state::AppState,
};

pub mod health;
pub mod tokens;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/users/me", get(users::get_current_user))
        .route_layer(from_fn_with_state(state.tokens.clone(), require_auth))
        .route("/token/refresh", post(tokens::refresh_tokens));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .nest("/v1", v1_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        users::get_current_user,
        tokens::refresh_tokens
    ),
    components(
        schemas(
            Identity,
            CredentialPair,
            tokens::RefreshRequest,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Users", description = "Authenticated identity"),
        (name = "Tokens", description = "Credential pair rotation")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthConfig, TokenManager, UserLookup};
    use axum::{
        body::{to_bytes, Body},
        http::{
            header::{AUTHORIZATION, CONTENT_TYPE},
            Request, StatusCode,
        },
        response::Response,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(TokenManager::new(AuthConfig::hmac("s3cret").with_refresh(true)).unwrap())
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn refresh_request(refresh_token: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/token/refresh")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({ "refresh_token": refresh_token }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(test_state());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn health_reports_signing_setup() {
        let response = router(test_state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["checks"]["signing_method"], "HS256");
        assert_eq!(body["checks"]["issuance"], "enabled");
    }

    #[tokio::test]
    async fn me_requires_token() {
        let response = router(test_state())
            .oneshot(Request::builder().uri("/v1/users/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn me_returns_identity() {
        let state = test_state();
        let identity = Identity::new("u1").with_email("u1@x.com").with_roles(["admin"]);
        let pair = state.tokens.issue_pair(&identity).unwrap();

        let response = router(state)
            .oneshot(
                Request::builder()
                    .uri("/v1/users/me")
                    .header(AUTHORIZATION, format!("Bearer {}", pair.access_token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["user_id"], "u1");
        assert_eq!(body["email"], "u1@x.com");
        assert_eq!(body["roles"], serde_json::json!(["admin"]));
    }

    #[tokio::test]
    async fn refresh_returns_new_pair() {
        let state = test_state();
        let pair = state.tokens.issue_pair(&Identity::new("u1")).unwrap();
        let tokens = state.tokens.clone();

        let response = router(state)
            .oneshot(refresh_request(&pair.refresh_token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let access_token = body["access_token"].as_str().unwrap();
        assert!(body["refresh_token"].is_string());
        assert!(chrono::DateTime::parse_from_rfc3339(body["expires_at"].as_str().unwrap()).is_ok());
        assert_eq!(tokens.identify(access_token).unwrap().user_id(), "u1");
    }

    #[tokio::test]
    async fn refresh_rejects_access_token() {
        let state = test_state();
        let pair = state.tokens.issue_pair(&Identity::new("u1")).unwrap();

        let response = router(state)
            .oneshot(refresh_request(&pair.access_token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"], "Token is not a refresh token");
    }

    struct Profiles;

    impl UserLookup for Profiles {
        fn fetch_user(&self, user_id: &str) -> Option<Identity> {
            (user_id == "u1").then(|| Identity::new("u1").with_roles(["admin"]))
        }
    }

    #[tokio::test]
    async fn refresh_uses_configured_user_lookup() {
        let state = test_state().with_user_lookup(Arc::new(Profiles));
        let pair = state.tokens.issue_pair(&Identity::new("u1")).unwrap();
        let tokens = state.tokens.clone();

        let response = router(state)
            .oneshot(refresh_request(&pair.refresh_token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let identity = tokens.identify(body["access_token"].as_str().unwrap()).unwrap();
        assert!(identity.has_role("admin"));
    }
}

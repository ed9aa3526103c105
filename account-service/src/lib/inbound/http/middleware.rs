use std::sync::Arc;

use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::account::models::UserId;

/// Extension type carrying the verified identity into downstream handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// How the route gate treats a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteClass {
    /// API route reachable without a token
    PublicApi,
    /// API route requiring a verified bearer token
    ProtectedApi,
    /// Browser-facing area; missing token redirects to the login page
    Dashboard,
    /// Anything else passes through untouched
    Open,
}

const PUBLIC_API_PREFIXES: &[&str] = &["/api/auth/login", "/api/auth/register", "/api/contact"];

const DASHBOARD_PREFIX: &str = "/dashboard";
const LOGIN_PAGE: &str = "/login";

fn classify(path: &str) -> RouteClass {
    if path.starts_with("/api/") {
        if PUBLIC_API_PREFIXES.iter().any(|p| path.starts_with(p)) {
            RouteClass::PublicApi
        } else {
            RouteClass::ProtectedApi
        }
    } else if path.starts_with(DASHBOARD_PREFIX) {
        RouteClass::Dashboard
    } else {
        RouteClass::Open
    }
}

/// Route gate: classifies every inbound request and either forwards it
/// unchanged or short-circuits with a decision response.
///
/// Successful verification inserts [`AuthenticatedUser`] into the request
/// extensions; the gate never mutates the token or claims and performs no
/// role checks.
pub async fn route_gate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    match classify(req.uri().path()) {
        RouteClass::PublicApi | RouteClass::Open => Ok(next.run(req).await),

        RouteClass::ProtectedApi => {
            let Some(token) = extract_token(&req) else {
                return Err(unauthorized("Authentication required"));
            };

            let claims = authenticator.validate_token(&token).map_err(|e| {
                tracing::warn!(error = %e, "Token verification failed");
                unauthorized("Invalid token")
            })?;

            let user_id = UserId::from_string(&claims.sub).map_err(|e| {
                tracing::warn!(error = %e, "Token subject is not a user id");
                unauthorized("Invalid token")
            })?;

            req.extensions_mut().insert(AuthenticatedUser { user_id });

            Ok(next.run(req).await)
        }

        RouteClass::Dashboard => {
            if extract_token(&req).is_none() {
                return Err(Redirect::temporary(LOGIN_PAGE).into_response());
            }
            Ok(next.run(req).await)
        }
    }
}

/// Bearer token from the `Authorization` header, falling back to the
/// `token` cookie set by the web client.
fn extract_token(req: &Request) -> Option<String> {
    if let Some(value) = req.headers().get(http::header::AUTHORIZATION) {
        if let Some(token) = value.to_str().ok().and_then(|s| s.strip_prefix("Bearer ")) {
            return Some(token.trim().to_string());
        }
    }

    let cookies = req.headers().get(http::header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix("token=").map(str::to_string))
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": message })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use auth::Claims;
    use axum::body::to_bytes;
    use axum::body::Body;
    use axum::middleware;
    use axum::routing::get;
    use axum::routing::post;
    use axum::Extension;
    use axum::Router;
    use chrono::Duration;
    use tower::ServiceExt;

    use super::*;

    const SECRET: &[u8] = b"test-secret-key-for-token-signing-32b!";

    async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
        user.user_id.to_string()
    }

    fn gated_router() -> Router {
        let authenticator = Arc::new(Authenticator::new(SECRET));

        Router::new()
            .route("/api/contact", post(|| async { "submitted" }))
            .route("/api/auth/me", get(whoami))
            .route("/dashboard/home", get(|| async { "dashboard" }))
            .route("/pricing", get(|| async { "pricing" }))
            .layer(middleware::from_fn_with_state(authenticator, route_gate))
    }

    fn token_for(user_id: UserId, ttl: Duration) -> String {
        Authenticator::new(SECRET)
            .issue_token(&Claims::for_subject(user_id, ttl))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("/api/auth/login"), RouteClass::PublicApi);
        assert_eq!(classify("/api/auth/register"), RouteClass::PublicApi);
        assert_eq!(classify("/api/contact"), RouteClass::PublicApi);
        assert_eq!(classify("/api/auth/me"), RouteClass::ProtectedApi);
        assert_eq!(classify("/api/anything/else"), RouteClass::ProtectedApi);
        assert_eq!(classify("/dashboard"), RouteClass::Dashboard);
        assert_eq!(classify("/dashboard/settings"), RouteClass::Dashboard);
        assert_eq!(classify("/pricing"), RouteClass::Open);
        assert_eq!(classify("/"), RouteClass::Open);
    }

    #[tokio::test]
    async fn test_public_api_path_without_token_is_forwarded() {
        let response = gated_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/contact")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_api_path_without_token_is_rejected() {
        let response = gated_router()
            .oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["message"],
            "Authentication required"
        );
    }

    #[tokio::test]
    async fn test_protected_api_path_with_garbage_token_is_rejected() {
        let response = gated_router()
            .oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .header("Authorization", "Bearer not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_protected_api_path_with_expired_token_is_rejected() {
        let token = token_for(UserId::new(), Duration::hours(-1));

        let response = gated_router()
            .oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_valid_token_forwards_with_claims_downstream() {
        let user_id = UserId::new();
        let token = token_for(user_id, Duration::days(7));

        let response = gated_router()
            .oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // The handler saw the identity the gate extracted
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes, user_id.to_string().as_bytes());
    }

    #[tokio::test]
    async fn test_token_cookie_is_accepted() {
        let user_id = UserId::new();
        let token = token_for(user_id, Duration::days(7));

        let response = gated_router()
            .oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .header("Cookie", format!("theme=dark; token={}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_without_token_redirects_to_login() {
        let response = gated_router()
            .oneshot(
                Request::builder()
                    .uri("/dashboard/home")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()["location"], LOGIN_PAGE);
    }

    #[tokio::test]
    async fn test_dashboard_with_token_is_forwarded() {
        let token = token_for(UserId::new(), Duration::days(7));

        let response = gated_router()
            .oneshot(
                Request::builder()
                    .uri("/dashboard/home")
                    .header("Cookie", format!("token={}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_open_path_passes_through() {
        let response = gated_router()
            .oneshot(
                Request::builder()
                    .uri("/pricing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}

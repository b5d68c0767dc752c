use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use super::jwt::{JwtKeys, Principal};
use crate::error::ApiError;

/// Request guard for protected routes. Extraction fails before the handler
/// body runs, so no handler ever observes an unauthenticated request.
pub struct AuthUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let keys = JwtKeys::from_ref(state);
        let principal = keys.verify(token)?;
        Ok(AuthUser(principal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;
    use axum::http::Request;
    use time::Duration;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/projects");
        if let Some(v) = value {
            builder = builder.header(axum::http::header::AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let state = test_state("dev-secret", 24);
        let mut parts = parts_with_auth(None);
        match AuthUser::from_request_parts(&mut parts, &state).await {
            Err(ApiError::Unauthorized) => {}
            other => panic!("expected Unauthorized, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthorized() {
        let state = test_state("dev-secret", 24);
        let mut parts = parts_with_auth(Some("Basic YWxpY2U6cHcx"));
        match AuthUser::from_request_parts(&mut parts, &state).await {
            Err(ApiError::Unauthorized) => {}
            other => panic!("expected Unauthorized, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn malformed_bearer_token_is_forbidden() {
        let state = test_state("dev-secret", 24);
        let mut parts = parts_with_auth(Some("Bearer not-a-token"));
        match AuthUser::from_request_parts(&mut parts, &state).await {
            Err(ApiError::InvalidToken) => {}
            other => panic!("expected InvalidToken, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn expired_token_is_forbidden() {
        let state = test_state("dev-secret", 24);
        let expired = JwtKeys::new("dev-secret", Duration::hours(-2));
        let token = expired
            .sign(&Principal {
                id: 1,
                username: "alice".into(),
            })
            .unwrap();
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        match AuthUser::from_request_parts(&mut parts, &state).await {
            Err(ApiError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn valid_token_attaches_principal() {
        let state = test_state("dev-secret", 24);
        let keys = JwtKeys::from_ref(&state);
        let token = keys
            .sign(&Principal {
                id: 42,
                username: "alice".into(),
            })
            .unwrap();
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let AuthUser(principal) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .expect("extraction should succeed");
        assert_eq!(principal.id, 42);
        assert_eq!(principal.username, "alice");
    }
}

//! Custom Axum extractor for the trusted identity context.
//!
//! An external identity provider authenticates the caller and injects
//! the `X-User-Id` and `X-User-Role` headers at the edge; the core
//! trusts them verbatim and performs no authentication of its own.

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use crate::domain::{Identity, Role, UserId};

/// Header carrying the identity-provider subject.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the actor role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Errors that can occur while reading the identity headers.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The `X-User-Id` header is missing or empty.
    #[error("missing X-User-Id header")]
    MissingUserId,
    /// The `X-User-Role` header is missing.
    #[error("missing X-User-Role header")]
    MissingRole,
    /// The `X-User-Role` header holds an unknown role string.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MissingUserId | Self::MissingRole => StatusCode::UNAUTHORIZED,
            Self::UnknownRole(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = IdentityError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty())
            .ok_or(IdentityError::MissingUserId)?;

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(IdentityError::MissingRole)?;
        let role: Role = role
            .parse()
            .map_err(|_| IdentityError::UnknownRole(role.to_string()))?;

        Ok(Identity::new(UserId::from(user_id), role))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    async fn extract(headers: &[(&str, &str)]) -> Result<Identity, IdentityError> {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let Ok(request) = builder.body(()) else {
            panic!("request build failed");
        };
        let (mut parts, ()) = request.into_parts();
        Identity::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn extracts_volunteer_identity() {
        let result = extract(&[("x-user-id", "u1"), ("x-user-role", "volunteer")]).await;
        let Ok(identity) = result else {
            panic!("extraction failed");
        };
        assert_eq!(identity.user_id, UserId::from("u1"));
        assert_eq!(identity.role, Role::Volunteer);
    }

    #[tokio::test]
    async fn missing_user_id_is_unauthorized() {
        let result = extract(&[("x-user-role", "volunteer")]).await;
        assert!(matches!(result, Err(IdentityError::MissingUserId)));
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let result = extract(&[("x-user-id", "u1"), ("x-user-role", "superuser")]).await;
        assert!(matches!(result, Err(IdentityError::UnknownRole(_))));
    }
}

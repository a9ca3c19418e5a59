//! Gateway identity middleware.
//!
//! Authentication happens at the API gateway, which forwards the caller's
//! identity in trusted headers. This middleware:
//! 1. Reads `X-User-Id` and `X-User-Role` from every request
//! 2. Injects a [`GatewayIdentity`] into the request extensions
//! 3. Rejects non-admin callers on admin-only routes with HTTP 403

use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
const ADMIN_ROLE: &str = "admin";

/// Caller identity as forwarded by the gateway.
///
/// Route handlers extract this with `Extension<GatewayIdentity>`.
#[derive(Debug, Clone, Default)]
pub struct GatewayIdentity {
    pub user_id: Option<String>,
    pub role: Option<String>,
}

impl GatewayIdentity {
    fn from_request(request: &Request) -> Self {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            user_id: header(USER_ID_HEADER),
            role: header(USER_ROLE_HEADER),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }

    /// The forwarded user id, or `Unauthenticated` if the gateway sent none.
    pub fn require_user_id(&self) -> Result<&str, AppError> {
        self.user_id.as_deref().ok_or(AppError::Unauthenticated)
    }
}

/// Attach the forwarded identity to the request.
pub async fn gateway_identity(mut request: Request, next: Next) -> Response {
    let identity = GatewayIdentity::from_request(&request);
    request.extensions_mut().insert(identity);
    next.run(request).await
}

/// Let the request through only when the forwarded role is `admin`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    if !GatewayIdentity::from_request(&request).is_admin() {
        return Err(AppError::Forbidden);
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(headers: &[(&str, &str)]) -> Request {
        let mut builder = axum::http::Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn reads_forwarded_headers() {
        let identity =
            GatewayIdentity::from_request(&request(&[("X-User-Id", "u1"), ("X-User-Role", "admin")]));

        assert_eq!(identity.user_id.as_deref(), Some("u1"));
        assert!(identity.is_admin());
        assert_eq!(identity.require_user_id().unwrap(), "u1");
    }

    #[test]
    fn blank_headers_count_as_missing() {
        let identity = GatewayIdentity::from_request(&request(&[("X-User-Id", "  ")]));

        assert!(identity.user_id.is_none());
        assert!(!identity.is_admin());
        assert!(matches!(
            identity.require_user_id(),
            Err(AppError::Unauthenticated)
        ));
    }
}

use axum::extract::FromRequestParts;
use axum::http::header::{HeaderName, InvalidHeaderName};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::convert::Infallible;

use crate::domain::value_objects::principal::Principal;

use super::AppState;

/// Maps an incoming request to the verified identity of its sender.
pub trait PrincipalResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Option<Principal>;
}

/// Trusts a header set by an authenticating reverse proxy in front of the service.
pub struct TrustedHeaderResolver {
    header: HeaderName,
}

impl TrustedHeaderResolver {
    /// # Errors
    ///
    /// Returns `InvalidHeaderName` if `header` is not a valid HTTP header name.
    pub fn new(header: &str) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            header: HeaderName::from_bytes(header.as_bytes())?,
        })
    }
}

impl PrincipalResolver for TrustedHeaderResolver {
    fn resolve(&self, headers: &HeaderMap) -> Option<Principal> {
        headers
            .get(&self.header)
            .and_then(|v| v.to_str().ok())
            .and_then(Principal::new)
    }
}

/// The caller's principal, or `None` when the request is unauthenticated.
///
/// Never rejects: handlers decide whether a missing principal is an error.
pub struct MaybePrincipal(pub Option<Principal>);

impl FromRequestParts<AppState> for MaybePrincipal {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.resolver.resolve(&parts.headers)))
    }
}

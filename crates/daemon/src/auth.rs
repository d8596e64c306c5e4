//! Shared-secret credential gate for the `/api` routes.

use std::fmt;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::header::AUTHORIZATION;
use http::{HeaderMap, StatusCode};

pub const PRINCIPAL_NAME: &str = "ApiUser";
pub const AUTHENTICATION_SCHEME: &str = "ApiKeyAuthentication";

/// Identity attached to every request that passed the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub name: &'static str,
    pub scheme: &'static str,
}

impl Principal {
    fn api_user() -> Self {
        Self {
            name: PRINCIPAL_NAME,
            scheme: AUTHENTICATION_SCHEME,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Missing Authorization Key header")]
    Missing,
    #[error("Invalid API key")]
    Invalid,
}

impl IntoResponse for CredentialError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

#[derive(Clone)]
pub struct CredentialGate {
    secret: Arc<str>,
}

impl fmt::Debug for CredentialGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialGate")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl CredentialGate {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Check the `Authorization` header against the configured secret.
    /// An absent or empty header is a missing credential; otherwise the value
    /// must equal the secret exactly.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, CredentialError> {
        let presented = headers
            .get(AUTHORIZATION)
            .filter(|value| !value.is_empty())
            .ok_or(CredentialError::Missing)?;

        if presented.as_bytes() != self.secret.as_bytes() {
            return Err(CredentialError::Invalid);
        }

        Ok(Principal::api_user())
    }
}

/// Middleware that rejects requests without a valid credential and stores
/// the [`Principal`] in the request extensions otherwise.
pub async fn require_credential(
    State(gate): State<CredentialGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, CredentialError> {
    let principal = gate.authenticate(request.headers()).map_err(|e| {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            reason = %e,
            "rejected request"
        );
        e
    })?;

    tracing::debug!(principal = principal.name, "request authenticated");
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

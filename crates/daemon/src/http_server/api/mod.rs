use axum::{middleware, Router};
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub mod client;
pub mod v0;

use crate::auth::require_credential;
use crate::ServiceState;

pub fn router(state: ServiceState, allowed_origins: &[String]) -> Router<ServiceState> {
    let cors_layer = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(vec![ACCEPT, CONTENT_TYPE, ORIGIN, AUTHORIZATION])
        .allow_origin(allow_origin(allowed_origins))
        .allow_credentials(false);

    Router::new()
        .nest("/v0", v0::router(state.clone()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_credential,
        ))
        .with_state(state)
        .layer(cors_layer)
}

/// An empty list allows any origin.
fn allow_origin(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.is_empty() {
        return Any.into();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}

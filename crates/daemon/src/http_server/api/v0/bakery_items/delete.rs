use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::auth::Principal;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::error_body;
use crate::service::ServiceError;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct DeleteBakeryItemRequest {
    /// Bakery item id
    pub id: i64,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, DeleteBakeryItemError> {
    if !state.bakery_items().delete(id).await? {
        return Err(DeleteBakeryItemError::NotFound(id));
    }

    tracing::info!(principal = principal.name, id, "bakery item deleted");
    Ok(http::StatusCode::NO_CONTENT)
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteBakeryItemError {
    #[error("Bakery item with id {0} not found.")]
    NotFound(i64),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntoResponse for DeleteBakeryItemError {
    fn into_response(self) -> Response {
        match self {
            DeleteBakeryItemError::NotFound(_) => {
                error_body(http::StatusCode::NOT_FOUND, self.to_string())
            }
            DeleteBakeryItemError::Service(e) => e.into_response(),
        }
    }
}

impl ApiRequest for DeleteBakeryItemRequest {
    type Response = ();

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join(&format!("/api/v0/bakery-items/{}", self.id))?;
        Ok(client.delete(full_url))
    }
}

use axum::extract::{Json, Path, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::database::BakeryItem;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::error_body;
use crate::service::ServiceError;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct GetBakeryItemRequest {
    /// Bakery item id
    pub id: i64,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GetBakeryItemError> {
    let item = state
        .bakery_items()
        .get(id)
        .await?
        .ok_or(GetBakeryItemError::NotFound(id))?;

    Ok((http::StatusCode::OK, Json(item)))
}

#[derive(Debug, thiserror::Error)]
pub enum GetBakeryItemError {
    #[error("Bakery item with id {0} not found.")]
    NotFound(i64),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntoResponse for GetBakeryItemError {
    fn into_response(self) -> Response {
        match self {
            GetBakeryItemError::NotFound(_) => {
                error_body(http::StatusCode::NOT_FOUND, self.to_string())
            }
            GetBakeryItemError::Service(e) => e.into_response(),
        }
    }
}

impl ApiRequest for GetBakeryItemRequest {
    type Response = BakeryItem;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join(&format!("/api/v0/bakery-items/{}", self.id))?;
        Ok(client.get(full_url))
    }
}

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::database::BakeryItem;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::{body, error_body};
use crate::service::ServiceError;
use crate::ServiceState;

/// Full replacement of a bakery item. `version` must be the version last
/// read, or the server answers 409.
#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBakeryItemRequest {
    /// Bakery item id
    pub id: i64,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    #[arg(long)]
    pub quantity_available: i32,

    /// Version stamp the change is based on
    #[arg(long)]
    pub version: i64,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(id): Path<i64>,
    item: Result<Json<BakeryItem>, JsonRejection>,
) -> Result<impl IntoResponse, UpdateBakeryItemError> {
    if !state.bakery_items().update(id, body(item)).await? {
        return Err(UpdateBakeryItemError::NotFound(id));
    }

    Ok(http::StatusCode::NO_CONTENT)
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateBakeryItemError {
    #[error("Bakery item with id {0} not found.")]
    NotFound(i64),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntoResponse for UpdateBakeryItemError {
    fn into_response(self) -> Response {
        match self {
            UpdateBakeryItemError::NotFound(_) => {
                error_body(http::StatusCode::NOT_FOUND, self.to_string())
            }
            UpdateBakeryItemError::Service(e) => e.into_response(),
        }
    }
}

impl ApiRequest for UpdateBakeryItemRequest {
    type Response = ();

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join(&format!("/api/v0/bakery-items/{}", self.id))?;
        Ok(client.put(full_url).json(&self))
    }
}

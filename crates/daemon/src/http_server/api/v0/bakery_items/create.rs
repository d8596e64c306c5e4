use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::IntoResponse;
use axum::Extension;
use reqwest::{Client, RequestBuilder, Url};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::Principal;
use crate::database::BakeryItem;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::body;
use crate::service::ServiceError;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
#[serde(rename_all = "camelCase")]
pub struct CreateBakeryItemRequest {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unit price, e.g. 1.50
    #[arg(long)]
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Units on the shelf
    #[arg(long, default_value_t = 0)]
    pub quantity_available: i32,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Extension(principal): Extension<Principal>,
    item: Result<Json<BakeryItem>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.bakery_items().create(body(item)).await?;

    tracing::info!(
        principal = principal.name,
        id = created.id,
        "bakery item created"
    );

    Ok((http::StatusCode::CREATED, Json(created)))
}

impl ApiRequest for CreateBakeryItemRequest {
    type Response = BakeryItem;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/bakery-items")?;
        Ok(client.post(full_url).json(&self))
    }
}

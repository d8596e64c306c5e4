use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::IntoResponse;
use axum::Extension;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::parse_order_date;
use crate::auth::Principal;
use crate::database::Order;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::body;
use crate::service::ServiceError;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Id of the ordered bakery item
    #[arg(long)]
    pub bakery_item_id: i64,

    #[arg(long)]
    pub quantity: i32,

    #[arg(long)]
    pub customer_name: String,

    /// RFC 3339 timestamp; the server uses the current time when omitted
    #[arg(long, value_parser = parse_order_date)]
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_date: Option<OffsetDateTime>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Extension(principal): Extension<Principal>,
    order: Result<Json<Order>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.orders().create(body(order)).await?;

    tracing::info!(
        principal = principal.name,
        id = created.id,
        bakery_item_id = created.bakery_item_id,
        "order created"
    );

    Ok((http::StatusCode::CREATED, Json(created)))
}

impl ApiRequest for CreateOrderRequest {
    type Response = Order;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/orders")?;
        Ok(client.post(full_url).json(&self))
    }
}

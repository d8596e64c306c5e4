use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::parse_order_date;
use crate::database::Order;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::v0::body;
use crate::service::ServiceError;
use crate::ServiceState;

/// Full replacement of an order, based on the version last read.
#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    /// Order id
    pub id: i64,

    #[arg(long)]
    pub bakery_item_id: i64,

    #[arg(long)]
    pub quantity: i32,

    #[arg(long)]
    pub customer_name: String,

    #[arg(long, value_parser = parse_order_date)]
    #[serde(with = "time::serde::rfc3339")]
    pub order_date: OffsetDateTime,

    /// Version stamp the change is based on
    #[arg(long)]
    pub version: i64,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(id): Path<i64>,
    order: Result<Json<Order>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    state.orders().update(id, body(order)).await?;
    Ok(http::StatusCode::NO_CONTENT)
}

impl ApiRequest for UpdateOrderRequest {
    type Response = ();

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join(&format!("/api/v0/orders/{}", self.id))?;
        Ok(client.put(full_url).json(&self))
    }
}

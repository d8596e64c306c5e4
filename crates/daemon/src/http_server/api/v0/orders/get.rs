use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::database::Order;
use crate::http_server::api::client::ApiRequest;
use crate::service::ServiceError;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct GetOrderRequest {
    /// Order id
    pub id: i64,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.orders().get(id).await?;
    Ok((http::StatusCode::OK, Json(order)))
}

impl ApiRequest for GetOrderRequest {
    type Response = Order;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join(&format!("/api/v0/orders/{}", self.id))?;
        Ok(client.get(full_url))
    }
}

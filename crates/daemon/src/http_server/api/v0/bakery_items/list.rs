use axum::extract::{Json, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::database::BakeryItem;
use crate::http_server::api::client::ApiRequest;
use crate::service::ServiceError;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct ListBakeryItemsRequest {}

pub async fn handler(
    State(state): State<ServiceState>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.bakery_items().get_all().await?;
    Ok((http::StatusCode::OK, Json(items)))
}

impl ApiRequest for ListBakeryItemsRequest {
    type Response = Vec<BakeryItem>;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/bakery-items")?;
        Ok(client.get(full_url))
    }
}

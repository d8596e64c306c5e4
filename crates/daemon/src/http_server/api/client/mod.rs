#[allow(clippy::module_inception)]
mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

/// A request the [`ApiClient`] knows how to send. Each endpoint module
/// implements this next to its handler.
pub trait ApiRequest {
    type Response: DeserializeOwned;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError>;
}

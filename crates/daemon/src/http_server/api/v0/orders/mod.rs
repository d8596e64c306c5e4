use axum::routing::get;
use axum::Router;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::ServiceState;

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use create::CreateOrderRequest;
pub use delete::DeleteOrderRequest;
pub use get::GetOrderRequest;
pub use list::ListOrdersRequest;
pub use update::UpdateOrderRequest;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route(
            "/:id",
            get(get::handler).put(update::handler).delete(delete::handler),
        )
        .with_state(state)
}

/// clap value parser for `--order-date`.
fn parse_order_date(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(value, &Rfc3339)
}

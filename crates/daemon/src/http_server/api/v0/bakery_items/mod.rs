use axum::routing::get;
use axum::Router;

use crate::ServiceState;

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use create::CreateBakeryItemRequest;
pub use delete::DeleteBakeryItemRequest;
pub use get::GetBakeryItemRequest;
pub use list::ListBakeryItemsRequest;
pub use update::UpdateBakeryItemRequest;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route(
            "/:id",
            get(get::handler).put(update::handler).delete(delete::handler),
        )
        .with_state(state)
}

use clap::{Args, Subcommand};

use bakery_daemon::database::BakeryItem;
use bakery_daemon::http_server::api::client::ApiError;
use bakery_daemon::http_server::api::v0::bakery_items::{
    CreateBakeryItemRequest, DeleteBakeryItemRequest, GetBakeryItemRequest,
    ListBakeryItemsRequest, UpdateBakeryItemRequest,
};

use crate::cli::op::{Op, OpContext};

crate::command_enum! {
    (List, ListBakeryItemsRequest),
    (Get, GetBakeryItemRequest),
    (Create, CreateBakeryItemRequest),
    (Update, UpdateBakeryItemRequest),
    (Delete, DeleteBakeryItemRequest),
}

pub type ItemCommand = Command;

/// Manage bakery items
#[derive(Args, Debug, Clone)]
pub struct Item {
    #[command(subcommand)]
    pub command: ItemCommand,
}

#[async_trait::async_trait]
impl Op for Item {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

fn describe(item: &BakeryItem) -> String {
    format!(
        "{} (id: {} | price: {} | available: {} | version: {})",
        item.name, item.id, item.price, item.quantity_available, item.version
    )
}

#[async_trait::async_trait]
impl Op for ListBakeryItemsRequest {
    type Error = ItemError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let items = ctx.client.call(self.clone()).await?;

        if items.is_empty() {
            return Ok("No bakery items found".to_string());
        }
        Ok(items.iter().map(describe).collect::<Vec<_>>().join("\n"))
    }
}

#[async_trait::async_trait]
impl Op for GetBakeryItemRequest {
    type Error = ItemError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let item = ctx.client.call(self.clone()).await?;
        Ok(describe(&item))
    }
}

#[async_trait::async_trait]
impl Op for CreateBakeryItemRequest {
    type Error = ItemError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let item = ctx.client.call(self.clone()).await?;
        Ok(format!("Created {}", describe(&item)))
    }
}

#[async_trait::async_trait]
impl Op for UpdateBakeryItemRequest {
    type Error = ItemError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        ctx.client.call(self.clone()).await?;
        Ok(format!(
            "Updated bakery item {} (now version {})",
            self.id,
            self.version + 1
        ))
    }
}

#[async_trait::async_trait]
impl Op for DeleteBakeryItemRequest {
    type Error = ItemError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        ctx.client.call(self.clone()).await?;
        Ok(format!("Deleted bakery item {}", self.id))
    }
}

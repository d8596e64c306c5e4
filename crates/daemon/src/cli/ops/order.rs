use clap::{Args, Subcommand};
use time::format_description::well_known::Rfc3339;

use bakery_daemon::http_server::api::client::ApiError;
use bakery_daemon::http_server::api::v0::orders::{
    CreateOrderRequest, DeleteOrderRequest, GetOrderRequest, ListOrdersRequest, UpdateOrderRequest,
};

use crate::cli::op::{Op, OpContext};

crate::command_enum! {
    (List, ListOrdersRequest),
    (Get, GetOrderRequest),
    (Create, CreateOrderRequest),
    (Update, UpdateOrderRequest),
    (Delete, DeleteOrderRequest),
}

pub type OrderCommand = Command;

/// Manage orders
#[derive(Args, Debug, Clone)]
pub struct Order {
    #[command(subcommand)]
    pub command: OrderCommand,
}

#[async_trait::async_trait]
impl Op for Order {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

fn describe(order: &bakery_daemon::database::Order) -> String {
    let date = order
        .order_date
        .format(&Rfc3339)
        .unwrap_or_else(|_| order.order_date.to_string());
    format!(
        "order {} for {} x item {} by {} on {} (version: {})",
        order.id, order.quantity, order.bakery_item_id, order.customer_name, date, order.version
    )
}

#[async_trait::async_trait]
impl Op for ListOrdersRequest {
    type Error = OrderError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let orders = ctx.client.call(self.clone()).await?;

        if orders.is_empty() {
            return Ok("No orders found".to_string());
        }
        Ok(orders.iter().map(describe).collect::<Vec<_>>().join("\n"))
    }
}

#[async_trait::async_trait]
impl Op for GetOrderRequest {
    type Error = OrderError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let order = ctx.client.call(self.clone()).await?;
        Ok(describe(&order))
    }
}

#[async_trait::async_trait]
impl Op for CreateOrderRequest {
    type Error = OrderError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let order = ctx.client.call(self.clone()).await?;
        Ok(format!("Created {}", describe(&order)))
    }
}

#[async_trait::async_trait]
impl Op for UpdateOrderRequest {
    type Error = OrderError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        ctx.client.call(self.clone()).await?;
        Ok(format!(
            "Updated order {} (now version {})",
            self.id,
            self.version + 1
        ))
    }
}

#[async_trait::async_trait]
impl Op for DeleteOrderRequest {
    type Error = OrderError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        ctx.client.call(self.clone()).await?;
        Ok(format!("Deleted order {}", self.id))
    }
}

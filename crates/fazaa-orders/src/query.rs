/*
[INPUT]:  Status filter, page number and page size
[OUTPUT]: OrderQuery trait and its HTTP-backed implementation
[POS]:    Collaborator seam - order fetching behind the controller
[UPDATE]: When the order list endpoint or fetch signature changes
*/

use async_trait::async_trait;
use fazaa_orders_adapter::{OrdersClient, OrdersPage, Result};

/// Source of order pages for the list controller.
#[async_trait]
pub trait OrderQuery: Send + Sync {
    async fn fetch_orders(&self, status: Option<&str>, page: u32, limit: u32)
    -> Result<OrdersPage>;
}

#[async_trait]
impl OrderQuery for OrdersClient {
    async fn fetch_orders(
        &self,
        status: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<OrdersPage> {
        self.query_orders(status, page, limit).await
    }
}

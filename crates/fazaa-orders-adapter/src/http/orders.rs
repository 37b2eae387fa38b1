/*
[INPUT]:  Status filter, pagination parameters and bearer authentication
[OUTPUT]: Order pages and single order details
[POS]:    HTTP layer - driver order endpoints (require bearer auth)
[UPDATE]: When adding new order endpoints or changing query parameters
*/

use crate::http::{OrdersClient, Result};
use crate::types::{ApiEnvelope, Order, OrdersPage, OrdersPayload};
use reqwest::Method;

const ORDERS_ENDPOINT: &str = "api/driver/orders";

impl OrdersClient {
    /// Query one page of the driver's orders
    ///
    /// GET /api/driver/orders?status={status}&page={page}&limit={limit}
    pub async fn query_orders(
        &self,
        status: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<OrdersPage> {
        let mut params = Vec::with_capacity(3);
        if let Some(status) = status {
            params.push(("status", status.to_string()));
        }
        params.push(("page", page.to_string()));
        params.push(("limit", limit.to_string()));

        let builder = self.request(Method::GET, ORDERS_ENDPOINT)?.query(&params);
        let envelope: ApiEnvelope<OrdersPayload> = self.send_json(builder).await?;
        let page = OrdersPage::from_payload(envelope.into_data()?, page);

        tracing::debug!(
            status = status.unwrap_or("all"),
            orders = page.orders.len(),
            total_pages = page.total_pages,
            "fetched order page"
        );
        Ok(page)
    }

    /// Fetch a single order with its details
    ///
    /// GET /api/driver/orders/{id}
    pub async fn get_order(&self, id: i64) -> Result<Order> {
        let endpoint = format!("{ORDERS_ENDPOINT}/{id}");
        let builder = self.request(Method::GET, &endpoint)?;
        let envelope: ApiEnvelope<Order> = self.send_json(builder).await?;
        envelope.into_data()
    }
}

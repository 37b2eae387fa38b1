/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for fazaa-orders-adapter tests

use fazaa_orders_adapter::{ClientConfig, Credentials, OrdersClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Mock bearer token for testing
pub fn mock_access_token() -> String {
    "test-driver-access-token".to_string()
}

/// Client pointed at the mock server with a bearer token set
pub fn authed_client(server: &MockServer) -> OrdersClient {
    let mut client =
        OrdersClient::with_config(ClientConfig::default(), &server.uri()).expect("client init");
    client.set_credentials(Credentials::bearer(mock_access_token()));
    client
}

/// JSON body for one order list page
pub fn orders_page_body(first_id: i64, count: usize, total_pages: u32) -> serde_json::Value {
    let orders = (0..count)
        .map(|offset| {
            let id = first_id + offset as i64;
            serde_json::json!({
                "id": id,
                "title": format!("Order {id}"),
                "order_no": format!("N-{id}"),
                "order_status": "new",
            })
        })
        .collect::<Vec<_>>();

    serde_json::json!({
        "status": true,
        "message": "ok",
        "data": {
            "orders": orders,
            "pagination": { "total_pages": total_pages, "per_page": count },
        },
    })
}

//! Controller driven against a mocked driver API

use std::sync::Arc;

use fazaa_orders::{AppConfig, ErrorKind, FilterSelection, OrderListController};
use fazaa_orders_adapter::OrderStatus;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_body(first_id: i64, count: usize, status: &str, total_pages: u32) -> serde_json::Value {
    let orders: Vec<_> = (0..count)
        .map(|offset| {
            let id = first_id + offset as i64;
            serde_json::json!({
                "id": id,
                "title": format!("Order {id}"),
                "order_no": id,
                "order_status": status,
                "address": { "address": "King Fahd Rd", "details": "Gate 3" },
            })
        })
        .collect();
    serde_json::json!({
        "status": true,
        "data": { "orders": orders, "pagination": { "current_page": 1, "total_pages": total_pages } },
    })
}

fn controller_for(server: &MockServer) -> OrderListController {
    let mut config = AppConfig::default();
    config.api.base_url = server.uri();
    config.api.token = Some("driver-token".to_string());
    config.list.page_size = 5;
    let client = config.api.build_client().expect("client");
    OrderListController::new(Arc::new(client), config.list.page_size)
}

#[tokio::test]
async fn test_pages_through_all_orders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/driver/orders"))
        .and(query_param_is_missing("status"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "5"))
        .and(header("authorization", "Bearer driver-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, 5, "new", 2)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/driver/orders"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(6, 3, "accepted", 2)))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    controller.load(FilterSelection::All, 1, 5).unwrap().unwrap().await.unwrap();
    controller.load_more(FilterSelection::All, 5).unwrap().unwrap().await.unwrap();

    let state = controller.snapshot();
    assert_eq!(state.items().len(), 8);
    assert_eq!(state.current_page(), 2);
    assert!(!state.can_load_more());
    assert_eq!(state.items()[7].order_no.as_deref(), Some("13"));
    assert_eq!(state.items()[7].status, OrderStatus::Accepted);
}

#[tokio::test]
async fn test_status_filter_sent_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/driver/orders"))
        .and(query_param("status", "way"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(40, 2, "way", 1)))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    let filter = FilterSelection::Status(OrderStatus::EnRoute);
    controller.refresh(filter, 5).unwrap().unwrap().await.unwrap();

    let state = controller.snapshot();
    assert_eq!(state.items().len(), 2);
    assert!(state.items().iter().all(|o| o.status == OrderStatus::EnRoute));
}

#[tokio::test]
async fn test_server_error_recorded_as_server_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/driver/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "status": false,
            "message": "Internal error",
        })))
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    controller.load(FilterSelection::All, 1, 5).unwrap().unwrap().await.unwrap();

    let state = controller.snapshot();
    assert_eq!(state.last_error(), Some(ErrorKind::Server));
    assert!(state.items().is_empty());
}

#[tokio::test]
async fn test_malformed_body_recorded_as_decode_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/driver/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>", "text/html"))
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    controller.load(FilterSelection::All, 1, 5).unwrap().unwrap().await.unwrap();

    assert_eq!(controller.snapshot().last_error(), Some(ErrorKind::Decode));
}

#[tokio::test]
async fn test_expired_token_fails_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/driver/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, 1, "new", 1)))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = AppConfig::default();
    config.api.base_url = server.uri();
    config.api.token = Some("driver-token".to_string());
    config.api.token_expires_at = Some(chrono::Utc::now() - chrono::Duration::minutes(1));
    let client = config.api.build_client().expect("client");
    let controller = OrderListController::new(Arc::new(client), 5);

    controller.load(FilterSelection::All, 1, 5).unwrap().unwrap().await.unwrap();

    let state = controller.snapshot();
    assert_eq!(state.last_error(), Some(ErrorKind::Server));
    assert!(state.items().is_empty());
}

//! Shared helpers for controller integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use fazaa_orders::OrderQuery;
use fazaa_orders_adapter::{Order, OrderStatus, OrdersError, OrdersPage, Result};
use tokio::sync::{mpsc, oneshot};

/// A fetch the controller issued, held open until the test answers it.
pub struct PendingFetch {
    pub status: Option<String>,
    pub page: u32,
    pub limit: u32,
    reply: oneshot::Sender<Result<OrdersPage>>,
}

impl PendingFetch {
    pub fn respond(self, result: Result<OrdersPage>) {
        let _ = self.reply.send(result);
    }

    pub fn succeed(self, orders: Vec<Order>, total_pages: u32) {
        self.respond(Ok(OrdersPage {
            orders,
            total_pages,
        }));
    }

    pub fn fail(self) {
        self.respond(Err(OrdersError::Timeout { duration: 30 }));
    }
}

/// Order query whose responses are released by the test, one fetch at a time.
pub struct ScriptedQuery {
    issued: mpsc::UnboundedSender<PendingFetch>,
}

impl ScriptedQuery {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<PendingFetch>) {
        let (issued, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { issued }), rx)
    }
}

#[async_trait]
impl OrderQuery for ScriptedQuery {
    async fn fetch_orders(&self, status: Option<&str>, page: u32, limit: u32) -> Result<OrdersPage> {
        let (reply, response) = oneshot::channel();
        self.issued
            .send(PendingFetch {
                status: status.map(str::to_string),
                page,
                limit,
                reply,
            })
            .map_err(|_| OrdersError::Config("test receiver dropped".to_string()))?;
        response
            .await
            .map_err(|_| OrdersError::Config("test dropped the reply".to_string()))?
    }
}

pub fn orders(first_id: i64, count: usize, status: OrderStatus) -> Vec<Order> {
    (0..count)
        .map(|offset| {
            let id = first_id + offset as i64;
            Order {
                id: Some(id),
                title: Some(format!("Order {id}")),
                order_no: Some(format!("N-{id}")),
                status,
                dt_date: Some("2025-09-25".to_string()),
                dt_time: Some("10:30".to_string()),
                address: None,
            }
        })
        .collect()
}

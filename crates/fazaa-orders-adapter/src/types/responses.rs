/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::models::Order;
use crate::http::{OrdersError, Result};

/// Common `{ status, message, data }` wrapper used by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, turning `status: false` or a missing payload into errors
    pub fn into_data(self) -> Result<T> {
        if !self.status {
            return Err(OrdersError::Api {
                code: 200,
                message: self
                    .message
                    .unwrap_or_else(|| "request rejected".to_string()),
            });
        }
        self.data
            .ok_or_else(|| OrdersError::InvalidResponse("missing data payload".to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default, alias = "last_page")]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
}

impl Pagination {
    /// Page count, derived from `total / per_page` when not given directly
    pub fn resolved_total_pages(&self) -> Option<u32> {
        if let Some(total_pages) = self.total_pages {
            return Some(total_pages);
        }
        match (self.total, self.per_page) {
            (Some(total), Some(per_page)) if per_page > 0 => Some(total.div_ceil(per_page)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersPayload {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// One fetched page of orders plus the page count reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersPage {
    pub orders: Vec<Order>,
    pub total_pages: u32,
}

impl OrdersPage {
    /// Build a page from the raw payload for the requested page number.
    ///
    /// Without pagination metadata the requested page is treated as the last one.
    pub fn from_payload(payload: OrdersPayload, requested_page: u32) -> Self {
        let total_pages = payload
            .pagination
            .as_ref()
            .and_then(Pagination::resolved_total_pages)
            .unwrap_or(requested_page);
        Self {
            orders: payload.orders,
            total_pages,
        }
    }
}

/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a driver order.
///
/// The wire values double as the `status` query parameter of the order list
/// endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "new")]
    New,
    #[serde(rename = "accepted")]
    Accepted,
    #[serde(rename = "started")]
    Started,
    #[serde(rename = "way", alias = "en_route")]
    EnRoute,
    #[serde(rename = "progress", alias = "in_progress")]
    InProgress,
    #[serde(rename = "updated")]
    Updated,
    #[serde(rename = "prefinished", alias = "pre_finished")]
    PreFinished,
    #[serde(rename = "finished")]
    Finished,
    #[serde(rename = "canceled", alias = "cancelled")]
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 9] = [
        OrderStatus::New,
        OrderStatus::Accepted,
        OrderStatus::Started,
        OrderStatus::EnRoute,
        OrderStatus::InProgress,
        OrderStatus::Updated,
        OrderStatus::PreFinished,
        OrderStatus::Finished,
        OrderStatus::Canceled,
    ];

    /// Wire value as sent in query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Started => "started",
            OrderStatus::EnRoute => "way",
            OrderStatus::InProgress => "progress",
            OrderStatus::Updated => "updated",
            OrderStatus::PreFinished => "prefinished",
            OrderStatus::Finished => "finished",
            OrderStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::OrderStatus;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// One driver order as returned by the list and detail endpoints.
///
/// Orders created offline may not carry a server id yet, so list identity
/// falls back to structural equality (see the `PartialEq` impl).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_string_or_number"
    )]
    pub order_no: Option<String>,
    #[serde(rename = "order_status", alias = "status")]
    pub status: OrderStatus,
    #[serde(default)]
    pub dt_date: Option<String>,
    #[serde(default)]
    pub dt_time: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

impl Order {
    fn same_fields(&self, other: &Self) -> bool {
        self.title == other.title
            && self.order_no == other.order_no
            && self.status == other.status
            && self.dt_date == other.dt_date
            && self.dt_time == other.dt_time
            && self.address == other.address
    }

    /// Street address line, if present and non-empty
    pub fn address_line(&self) -> Option<&str> {
        self.address
            .as_ref()
            .and_then(|address| address.address.as_deref())
            .filter(|line| !line.is_empty())
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(left), Some(right)) => left == right,
            (None, None) => self.same_fields(other),
            _ => false,
        }
    }
}

impl Eq for Order {}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(raw)) => Ok(Some(raw)),
            Some(Value::Number(number)) => Ok(Some(number.to_string())),
            Some(_) => Err(serde::de::Error::custom("invalid order number")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(id: Option<i64>, title: &str) -> Order {
        Order {
            id,
            title: Some(title.to_string()),
            order_no: None,
            status: OrderStatus::New,
            dt_date: None,
            dt_time: None,
            address: None,
        }
    }

    #[test]
    fn order_deserializes_with_minimal_fields() {
        let value = json!({ "order_status": "way" });

        let order: Order = serde_json::from_value(value).expect("order should deserialize");

        assert_eq!(order.id, None);
        assert_eq!(order.status, OrderStatus::EnRoute);
        assert!(order.address_line().is_none());
    }

    #[test]
    fn order_deserializes_numeric_order_no() {
        let value = json!({
            "id": 7,
            "title": "Water delivery",
            "order_no": 10045,
            "order_status": "accepted",
            "dt_date": "2025-09-25",
            "dt_time": "14:30",
            "address": { "address": "King Fahd Rd", "details": null }
        });

        let order: Order = serde_json::from_value(value).expect("order should deserialize");

        assert_eq!(order.order_no.as_deref(), Some("10045"));
        assert_eq!(order.address_line(), Some("King Fahd Rd"));
    }

    #[test]
    fn equality_uses_id_when_present() {
        assert_eq!(order(Some(1), "a"), order(Some(1), "b"));
        assert_ne!(order(Some(1), "a"), order(Some(2), "a"));
    }

    #[test]
    fn equality_is_structural_without_id() {
        assert_eq!(order(None, "a"), order(None, "a"));
        assert_ne!(order(None, "a"), order(None, "b"));
        assert_ne!(order(None, "a"), order(Some(1), "a"));
    }
}

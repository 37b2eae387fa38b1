/*
[INPUT]:  Adapter errors and controller precondition violations
[OUTPUT]: ErrorKind taxonomy for presentation and ControllerError for callers
[POS]:    Controller layer - error mapping
[UPDATE]: When the adapter error set or user-facing error categories change
*/

use std::sync::Arc;

use fazaa_orders_adapter::OrdersError;
use thiserror::Error;

use super::state::FilterSelection;

/// User-facing error category recorded in the list state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport or connectivity failure
    Network,
    /// Non-2xx status or an error payload
    Server,
    /// Malformed response body
    Decode,
    Unknown,
}

impl ErrorKind {
    /// Default mapping from adapter errors.
    pub fn classify(err: &OrdersError) -> Self {
        match err {
            OrdersError::Http(inner) => {
                if inner.is_decode() || inner.is_body() {
                    ErrorKind::Decode
                } else if inner.is_status() {
                    ErrorKind::Server
                } else if inner.is_timeout() || inner.is_connect() || inner.is_request() {
                    ErrorKind::Network
                } else {
                    ErrorKind::Unknown
                }
            }
            OrdersError::Timeout { .. } => ErrorKind::Network,
            OrdersError::Api { .. }
            | OrdersError::Authentication { .. }
            | OrdersError::TokenExpired
            | OrdersError::RateLimit { .. } => ErrorKind::Server,
            OrdersError::Serialization(_) | OrdersError::InvalidResponse(_) => ErrorKind::Decode,
            OrdersError::UrlParse(_) | OrdersError::Config(_) => ErrorKind::Unknown,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::Network => "Network unavailable; check your connection",
            ErrorKind::Server => "The server could not load your orders",
            ErrorKind::Decode => "Received an unexpected response from the server",
            ErrorKind::Unknown => "Something went wrong",
        }
    }
}

/// Injected mapping from adapter errors to [`ErrorKind`].
pub type ErrorMapper = Arc<dyn Fn(&OrdersError) -> ErrorKind + Send + Sync>;

pub fn default_error_mapper() -> ErrorMapper {
    Arc::new(ErrorKind::classify)
}

/// Precondition violations reported by controller operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("page must be at least 1, got {page}")]
    InvalidPage { page: u32 },
    #[error("limit must be at least 1")]
    InvalidLimit,
    #[error("page {page} requested for {requested:?} while {active:?} is active")]
    SessionMismatch {
        requested: FilterSelection,
        active: FilterSelection,
        page: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OrdersError::Timeout { duration: 30 }, ErrorKind::Network)]
    #[case(OrdersError::Api { code: 500, message: "boom".into() }, ErrorKind::Server)]
    #[case(OrdersError::Authentication { message: "expired".into() }, ErrorKind::Server)]
    #[case(OrdersError::TokenExpired, ErrorKind::Server)]
    #[case(OrdersError::RateLimit { retry_after: 3 }, ErrorKind::Server)]
    #[case(OrdersError::InvalidResponse("missing data".into()), ErrorKind::Decode)]
    #[case(OrdersError::Config("bad".into()), ErrorKind::Unknown)]
    fn test_classify(#[case] err: OrdersError, #[case] expected: ErrorKind) {
        assert_eq!(ErrorKind::classify(&err), expected);
    }

    #[test]
    fn test_serialization_is_decode() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            ErrorKind::classify(&OrdersError::Serialization(err)),
            ErrorKind::Decode
        );
    }
}

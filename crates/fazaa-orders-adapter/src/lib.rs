/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Fazaa driver order API adapter surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{ClientConfig, Credentials, DEFAULT_BASE_URL, OrdersClient, OrdersError, Result};

// Re-export all types
pub use types::*;

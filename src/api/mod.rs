// src/api/mod.rs
// HTTP API: routing, handlers and error mapping

pub mod error;
pub mod http;

pub use error::{ApiError, ApiResult};
pub use http::create_router;

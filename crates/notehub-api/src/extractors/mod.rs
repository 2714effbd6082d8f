//! Custom Axum extractors that report rejections as [`ApiError`]s.
//!
//! [`ApiError`]: crate::error::ApiError

pub mod json;
pub mod path;
pub mod query;

pub use json::ApiJson;
pub use path::ApiPath;
pub use query::ApiQuery;

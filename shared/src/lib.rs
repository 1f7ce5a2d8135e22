//! Shared types for the Ladle recipe platform
//!
//! Common types used by the API server and its tests: error types,
//! data models, response structures, and utility functions.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::PaginatedResponse;

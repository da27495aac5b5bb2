//! Shared types for the order engine
//!
//! Common types used by the engine and by any surface built on it:
//! error types, response envelope, menu models and order types.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

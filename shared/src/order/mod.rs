//! Cart and order types
//!
//! - Types: cart lines, composed selections, the order in progress
//! - Snapshot: the persisted order, its lifecycle status and statistics

pub mod snapshot;
pub mod types;

// Re-exports
pub use snapshot::{Order, OrderStatistics, OrderStatus};
pub use types::*;

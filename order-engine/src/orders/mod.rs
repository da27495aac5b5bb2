//! Orders: submission, lifecycle, statistics
//!
//! # Lifecycle
//!
//! ```text
//! pending ──► served ──► paid
//!    │
//!    └──────► cancelled (reason required)
//! ```
//!
//! # Modules
//!
//! - [`money`]: decimal money arithmetic
//! - [`lifecycle`]: pure status transitions
//! - [`statistics`]: daily aggregates
//! - [`board`]: live per-status views
//! - [`store`]: [`OrderStore`] seam and in-memory implementation
//! - [`service`]: [`OrderService`] tying store, lifecycle and printer together

mod error;
pub mod board;
pub mod lifecycle;
pub mod money;
pub mod service;
pub mod statistics;
pub mod store;

pub use board::{OrderBoard, spawn_board_watcher};
pub use error::{OrderError, OrderResult};
pub use lifecycle::apply_transition;
pub use service::{OrderService, SubmitOutcome};
pub use statistics::compute_statistics;
pub use store::{InMemoryOrderStore, OrderFeed, OrderStore, StoreError, StoreResult};

//! Order composition and pricing engine for a restaurant point of sale
//!
//! # Overview
//!
//! - **Catalog** (`catalog`): menu snapshot, composed-menu registry, step options
//! - **Wizard** (`wizard`): multi-step selection for composed menus
//! - **Cart** (`cart`): reducer over the order in progress
//! - **Orders** (`orders`): submission, lifecycle state machine, statistics
//! - **Printing** (`printing`): ticket payloads and the HTTP printer
//!
//! # Layout
//!
//! ```text
//! order-engine/src/
//! ├── core/          # config, bootstrap
//! ├── utils/         # logger, business-day time
//! ├── catalog/       # catalog, menu rules, option resolver
//! ├── wizard/        # selection wizard
//! ├── cart/          # cart reducer, session
//! ├── orders/        # money, lifecycle, store, board, service
//! └── printing/      # renderer, printer
//! ```
//!
//! # Flow
//!
//! ```text
//! Catalog + MenuRules ─► resolve_step_options ─► SelectionWizard ─► composed line
//!                                                                     │
//!            plain items ─────────────────────────────────────► CartSession
//!                                                                     │ submit
//!                                                    OrderService ◄───┘
//!                                             (store, lifecycle, printer)
//! ```

pub mod cart;
pub mod catalog;
pub mod core;
pub mod orders;
pub mod printing;
pub mod utils;
pub mod wizard;

pub use cart::{CartCommand, CartContext, CartError, CartSession};
pub use catalog::{Catalog, MenuRules, resolve_step_options};
pub use core::{Engine, EngineConfig};
pub use orders::{
    InMemoryOrderStore, OrderBoard, OrderError, OrderService, OrderStore, SubmitOutcome,
};
pub use printing::{HttpTicketPrinter, PrintOutcome, TicketPrinter, TicketRenderer};
pub use wizard::{SelectionWizard, WizardError, WizardNav};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

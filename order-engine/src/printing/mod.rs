//! Ticket printing
//!
//! - [`TicketRenderer`]: persisted order -> [`TicketPayload`]
//! - [`TicketPrinter`]: async seam to the print service
//! - [`HttpTicketPrinter`]: JSON over HTTP with bounded retries

pub mod printer;
pub mod renderer;
pub mod types;

pub use printer::{HttpTicketPrinter, PrintError, PrintResult, TicketPrinter};
pub use renderer::TicketRenderer;
pub use types::*;

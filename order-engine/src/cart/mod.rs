//! Cart engine
//!
//! - [`reduce`]: pure `(ActiveOrder, CartCommand) -> ActiveOrder` transition
//! - [`CartSession`]: mutex-guarded owner of one active order, with undo
//!   and a [`SubmitGuard`] that freezes it while its order is submitted

mod error;
pub mod reducer;
mod session;

pub use error::{CartError, CartResult};
pub use reducer::{CartCommand, CartContext, reduce};
pub use session::{CartSession, SubmitGuard};

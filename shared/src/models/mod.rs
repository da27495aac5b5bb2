//! Menu data models
//!
//! Catalog entities (categories and items) are pushed by the catalog
//! provider and consumed read-only. Composed-menu configurations come from
//! the menu rules document. All IDs are `String`.

pub mod category;
pub mod composed_menu;
pub mod menu_item;

// Re-exports
pub use category::*;
pub use composed_menu::*;
pub use menu_item::*;

//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity (read-only to the engine; owned by catalog management)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    /// Listed price (non-negative)
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub available: bool,
    /// Category reference
    pub category_id: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_special: bool,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Create an available item with the given identity, price and category
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            description: String::new(),
            available: true,
            category_id: category_id.into(),
            display_order: 0,
            is_popular: false,
            is_special: false,
        }
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

//! Menu Category Model

use serde::{Deserialize, Serialize};

/// Menu category entity
///
/// Determines which items are orderable (`active`) and supplies the default
/// emoji shown on cart lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub display_order: i32,
}

fn default_true() -> bool {
    true
}

impl MenuCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            emoji: emoji.into(),
            active: true,
            display_order: 0,
        }
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }
}

//! Composed Menu Model
//!
//! A composed menu is a menu item whose content is assembled through an
//! ordered sequence of selection steps (pick a main, pick two sides, pick a
//! drink...). Configurations are data: they are loaded from the menu rules
//! document and matched to catalog items by name.

use serde::{Deserialize, Serialize};

/// How many options a step accepts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionType {
    /// Zero or one option
    #[default]
    Single,
    /// Any number of options, bounded by min/max when set
    Multiple,
}

/// Where a step's options come from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Every available item of `source_category_id`
    Category,
    /// The explicit `source_item_ids` list
    Items,
    /// Inline `custom_options`
    Custom,
    /// Unrecognised source kind; resolves to no options
    #[serde(other)]
    Unknown,
}

/// One selectable choice within a step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuStepOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Signed delta added to the base item price (informational for composed menus)
    #[serde(default)]
    pub price_adjustment: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl MenuStepOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            price_adjustment: 0.0,
            emoji: None,
        }
    }

    pub fn with_price_adjustment(mut self, price_adjustment: f64) -> Self {
        self.price_adjustment = price_adjustment;
        self
    }
}

/// One stage of a composed-menu wizard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuStep {
    /// Unique within its configuration
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub selection_type: SelectionType,
    #[serde(default)]
    pub required: bool,
    /// Only meaningful for `Multiple`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<u32>,
    /// Only meaningful for `Multiple`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<u32>,
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_item_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_options: Option<Vec<MenuStepOption>>,
}

impl MenuStep {
    /// Lower cardinality bound, ignored for single-selection steps
    pub fn effective_min(&self) -> Option<u32> {
        match self.selection_type {
            SelectionType::Single => None,
            SelectionType::Multiple => self.min_selections,
        }
    }

    /// Upper cardinality bound; single-selection steps are always capped at 1
    pub fn effective_max(&self) -> Option<u32> {
        match self.selection_type {
            SelectionType::Single => Some(1),
            SelectionType::Multiple => self.max_selections,
        }
    }

    /// Whether this step's options are inline custom options rather than catalog items
    pub fn uses_custom_options(&self) -> bool {
        self.source_type == SourceType::Custom
    }
}

/// Composed menu configuration attached to catalog items by name matching
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComposedMenuConfig {
    pub id: String,
    /// Canonical menu name; catalog items whose name contains it are composed
    pub name: String,
    /// Ordered, non-empty
    pub steps: Vec<MenuStep>,
}

impl ComposedMenuConfig {
    pub fn step(&self, step_id: &str) -> Option<&MenuStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }
}

//! Shared types for carts and orders

use serde::{Deserialize, Serialize};

// ============================================================================
// Order Mode
// ============================================================================

/// Service mode; selects which identifier (table or client) an order carries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderMode {
    /// Served at a table, identified by `table_number`
    #[default]
    DineIn,
    /// Taken away, identified by `client_number`
    Takeaway,
}

impl OrderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderMode::DineIn => "dine-in",
            OrderMode::Takeaway => "takeaway",
        }
    }
}

impl std::fmt::Display for OrderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Portion
// ============================================================================

/// Portion variant with a fixed price multiplier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PortionType {
    /// Full portion (×1.0)
    #[default]
    Normal,
    /// Single piece (×0.3)
    Piece,
    /// Half portion (×0.5)
    Demi,
}

impl PortionType {
    /// Price multiplier in hundredths (exact, for decimal arithmetic)
    pub const fn multiplier_percent(&self) -> i64 {
        match self {
            PortionType::Normal => 100,
            PortionType::Piece => 30,
            PortionType::Demi => 50,
        }
    }

    /// Suffix appended to the item name on cart lines
    pub const fn suffix(&self) -> &'static str {
        match self {
            PortionType::Normal => "",
            PortionType::Piece => " (piece)",
            PortionType::Demi => " (demi part)",
        }
    }

    /// Label printed on tickets; `None` for the normal portion
    pub const fn label(&self) -> Option<&'static str> {
        match self {
            PortionType::Normal => None,
            PortionType::Piece => Some("piece"),
            PortionType::Demi => Some("demi part"),
        }
    }

    /// Suffix of the option id generated for this variant (`<itemId>-piece`)
    pub const fn option_id_suffix(&self) -> Option<&'static str> {
        match self {
            PortionType::Normal => None,
            PortionType::Piece => Some("-piece"),
            PortionType::Demi => Some("-demi"),
        }
    }

    pub fn is_normal(&self) -> bool {
        *self == PortionType::Normal
    }
}

// ============================================================================
// Composed Selections
// ============================================================================

/// Wizard working state for one step
///
/// Buckets keep insertion order so the oldest selection can be evicted first;
/// membership is set-like (an id appears at most once per bucket).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuSelection {
    pub step_id: String,
    /// Catalog item ids (including portion-variant ids)
    #[serde(default)]
    pub selected_item_ids: Vec<String>,
    /// Inline custom option ids
    #[serde(default)]
    pub selected_custom_options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_note: Option<String>,
}

impl MenuSelection {
    pub fn new(step_id: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            ..Default::default()
        }
    }

    pub fn total_selected(&self) -> usize {
        self.selected_item_ids.len() + self.selected_custom_options.len()
    }

    /// All selected ids, catalog bucket first
    pub fn all_ids(&self) -> impl Iterator<Item = &String> {
        self.selected_item_ids
            .iter()
            .chain(self.selected_custom_options.iter())
    }
}

/// One resolved choice inside a composed line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price_adjustment: f64,
}

/// Human-readable breakdown of one step of a composed line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepBreakdown {
    pub step_id: String,
    pub step_label: String,
    pub items: Vec<SelectedItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================================
// Cart Line
// ============================================================================

/// One distinguishable row of an order in progress or of a persisted order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Row identity (generated)
    pub line_id: String,
    /// Catalog item id
    pub item_id: String,
    /// Item name plus portion suffix
    pub display_name: String,
    pub unit_price: f64,
    /// Always >= 1
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub emoji: String,
    /// Set for simple lines; absent for composed lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portion_type: Option<PortionType>,
    /// Base price before portion or override adjustment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub is_composed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selections: Vec<MenuSelection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_items_breakdown: Vec<StepBreakdown>,
}

impl CartLineItem {
    /// Merge identity: composed lines have none (they never merge)
    pub fn merge_key(&self) -> Option<(&str, PortionType)> {
        if self.is_composed {
            return None;
        }
        Some((&self.item_id, self.portion_type.unwrap_or_default()))
    }
}

// ============================================================================
// Active Order (cart in progress)
// ============================================================================

/// Order being built; `total` is derived from the lines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveOrder {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub items: Vec<CartLineItem>,
    pub order_type: OrderMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_note: Option<String>,
    pub total: f64,
}

impl ActiveOrder {
    /// Create an empty dine-in order with a fresh id
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: String::new(),
            items: Vec::new(),
            order_type: OrderMode::DineIn,
            table_number: None,
            client_number: None,
            global_note: None,
            total: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of units across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Identifier matching the order type (table for dine-in, client for takeaway)
    pub fn slot(&self) -> Option<&str> {
        match self.order_type {
            OrderMode::DineIn => self.table_number.as_deref(),
            OrderMode::Takeaway => self.client_number.as_deref(),
        }
    }
}

impl Default for ActiveOrder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portion_metadata() {
        assert_eq!(PortionType::Normal.suffix(), "");
        assert_eq!(PortionType::Piece.suffix(), " (piece)");
        assert_eq!(PortionType::Demi.suffix(), " (demi part)");
        assert_eq!(PortionType::Piece.multiplier_percent(), 30);
        assert_eq!(PortionType::Demi.multiplier_percent(), 50);
        assert_eq!(PortionType::Normal.label(), None);
        assert_eq!(PortionType::Demi.option_id_suffix(), Some("-demi"));
    }

    #[test]
    fn test_order_mode_serde() {
        assert_eq!(
            serde_json::to_string(&OrderMode::DineIn).unwrap(),
            "\"dine-in\""
        );
        let mode: OrderMode = serde_json::from_str("\"takeaway\"").unwrap();
        assert_eq!(mode, OrderMode::Takeaway);
    }

    #[test]
    fn test_selection_counts() {
        let mut sel = MenuSelection::new("drinks");
        sel.selected_item_ids.push("cola".into());
        sel.selected_custom_options.push("no-ice".into());
        assert_eq!(sel.total_selected(), 2);
        let ids: Vec<&String> = sel.all_ids().collect();
        assert_eq!(ids, vec!["cola", "no-ice"]);
    }

    #[test]
    fn test_active_order_slot() {
        let mut order = ActiveOrder::new();
        order.table_number = Some("12".into());
        order.client_number = Some("C7".into());
        assert_eq!(order.slot(), Some("12"));
        order.order_type = OrderMode::Takeaway;
        assert_eq!(order.slot(), Some("C7"));
        assert!(order.is_empty());
    }
}

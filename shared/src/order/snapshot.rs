//! Persisted order and its lifecycle status
//!
//! An `Order` is created from an `ActiveOrder` on submission (status
//! `Pending`) and afterwards only changes through the lifecycle transitions.
//! Line items are a snapshot, decoupled from the live catalog.

use super::types::{CartLineItem, OrderMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status
///
/// ```text
/// pending   -> served | cancelled
/// served    -> paid
/// paid      -> (terminal)
/// cancelled -> (terminal)
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Served,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Served,
        OrderStatus::Paid,
        OrderStatus::Cancelled,
    ];

    /// Targets reachable from this status
    pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Served, OrderStatus::Cancelled],
            OrderStatus::Served => &[OrderStatus::Paid],
            OrderStatus::Paid | OrderStatus::Cancelled => &[],
        }
    }

    /// Strict allow-list check
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Served => "served",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub mode: OrderMode,
    /// Set iff `mode` is dine-in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    /// Set iff `mode` is takeaway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_number: Option<String>,
    pub total: f64,
    pub items: Vec<CartLineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub served_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

impl Order {
    /// Table or client identifier, whichever matches the mode
    pub fn slot(&self) -> Option<&str> {
        match self.mode {
            OrderMode::DineIn => self.table_number.as_deref(),
            OrderMode::Takeaway => self.client_number.as_deref(),
        }
    }

    /// Exactly one of table/client is set and it matches the mode
    pub fn has_consistent_slot(&self) -> bool {
        match self.mode {
            OrderMode::DineIn => self.table_number.is_some() && self.client_number.is_none(),
            OrderMode::Takeaway => self.client_number.is_some() && self.table_number.is_none(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    pub fn is_paid(&self) -> bool {
        self.status == OrderStatus::Paid
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }
}

/// Aggregate statistics over today's orders
///
/// Revenue only counts `paid` orders; `total_orders` counts every status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatistics {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub served_orders: usize,
    pub paid_orders: usize,
    pub cancelled_orders: usize,
    pub total_revenue: f64,
    pub average_order_value: f64,
}

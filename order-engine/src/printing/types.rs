//! Ticket print request types

use serde::{Deserialize, Serialize};

/// One product row of a ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketProduct {
    pub name: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    /// Rendered breakdown of a composed menu
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composed_details: Option<String>,
    /// `piece` / `demi part`; absent for a normal portion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portion_label: Option<String>,
}

/// Print request sent to the ticket printer service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPayload {
    pub printer_address: String,
    /// `Table <n>` or `Client <n>`
    pub table_or_client_label: String,
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_global_note: Option<String>,
    pub products: Vec<TicketProduct>,
}

/// Result of the print phase of a submission
///
/// A failed print never undoes the order it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PrintOutcome {
    Printed,
    Failed { reason: String },
}

impl PrintOutcome {
    pub fn is_printed(&self) -> bool {
        matches!(self, PrintOutcome::Printed)
    }
}

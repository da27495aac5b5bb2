//! Order -> ticket payload

use super::types::{TicketPayload, TicketProduct};
use crate::orders::money;
use rust_decimal::Decimal;
use shared::order::{CartLineItem, Order, OrderMode, StepBreakdown};

/// Builds ticket payloads for one physical printer
#[derive(Debug, Clone)]
pub struct TicketRenderer {
    printer_address: String,
}

impl TicketRenderer {
    pub fn new(printer_address: impl Into<String>) -> Self {
        Self {
            printer_address: printer_address.into(),
        }
    }

    pub fn render(&self, order: &Order) -> TicketPayload {
        TicketPayload {
            printer_address: self.printer_address.clone(),
            table_or_client_label: slot_label(order),
            order_id: order.id.clone(),
            optional_global_note: order.note.clone(),
            products: order.items.iter().map(render_line).collect(),
        }
    }
}

/// `Table <n>` for dine-in, `Client <n>` for takeaway
pub fn slot_label(order: &Order) -> String {
    let slot = order.slot().unwrap_or("?");
    match order.mode {
        OrderMode::DineIn => format!("Table {slot}"),
        OrderMode::Takeaway => format!("Client {slot}"),
    }
}

fn render_line(line: &CartLineItem) -> TicketProduct {
    let composed_details = (line.is_composed && !line.selected_items_breakdown.is_empty())
        .then(|| composed_details(&line.selected_items_breakdown));
    TicketProduct {
        name: line.display_name.clone(),
        quantity: line.quantity,
        special_instructions: line.note.clone(),
        composed_details,
        portion_label: line
            .portion_type
            .and_then(|p| p.label())
            .map(str::to_string),
    }
}

/// `Step: a, b (+1.50) [note] | Step: c`
pub fn composed_details(breakdown: &[StepBreakdown]) -> String {
    breakdown
        .iter()
        .map(|step| {
            let items: Vec<String> = step
                .items
                .iter()
                .map(|item| {
                    let adjustment = money::round_money(money::to_decimal(item.price_adjustment));
                    if adjustment.is_zero() {
                        item.name.clone()
                    } else {
                        format!("{} ({})", item.name, signed(adjustment))
                    }
                })
                .collect();
            let mut text = format!("{}: {}", step.step_label, items.join(", "));
            if let Some(note) = &step.note {
                text.push_str(&format!(" [{note}]"));
            }
            text
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn signed(amount: Decimal) -> String {
    if amount.is_sign_negative() {
        format!("-{:.2}", amount.abs())
    } else {
        format!("+{amount:.2}")
    }
}

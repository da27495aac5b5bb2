//! Order lifecycle transitions
//!
//! [`apply_transition`] validates a status change against the allow-list
//! and returns the updated order. A rejected transition returns an error
//! and the input order is left as it was.

use super::{OrderError, OrderResult};
use chrono::{DateTime, Utc};
use shared::order::{Order, OrderStatus};
use shared::util::normalize_text;

/// Apply `target` to `order` at `now`
///
/// Stamps the timestamp matching the target (write-once) and `updated_at`.
/// Cancellation requires a non-blank `reason`.
pub fn apply_transition(
    order: &Order,
    target: OrderStatus,
    reason: Option<&str>,
    now: DateTime<Utc>,
) -> OrderResult<Order> {
    if !order.status.can_transition_to(target) {
        return Err(OrderError::TransitionNotAllowed {
            from: order.status,
            to: target,
        });
    }

    let mut next = order.clone();
    match target {
        OrderStatus::Served => {
            next.served_at.get_or_insert(now);
        }
        OrderStatus::Paid => {
            next.paid_at.get_or_insert(now);
        }
        OrderStatus::Cancelled => {
            let reason = normalize_text(reason.map(str::to_string))
                .ok_or(OrderError::CancellationReasonRequired)?;
            next.cancelled_at.get_or_insert(now);
            next.cancellation_reason = Some(reason);
        }
        // not reachable through the allow-list
        OrderStatus::Pending => {}
    }
    next.status = target;
    next.updated_at = Some(now);
    Ok(next)
}

//! Order submission and lifecycle service
//!
//! Submission is two-phase: the order is persisted first, then a ticket is
//! printed. A print failure is reported in [`SubmitOutcome`] and never undoes
//! the persisted order.

use super::board::{OrderBoard, spawn_board_watcher};
use super::lifecycle::apply_transition;
use super::statistics::compute_statistics;
use super::store::OrderStore;
use super::{OrderError, OrderResult, money};
use crate::cart::CartSession;
use crate::printing::{PrintOutcome, TicketPrinter, TicketRenderer};
use chrono::Utc;
use chrono_tz::Tz;
use serde::Serialize;
use shared::error::ApiResponse;
use shared::order::{ActiveOrder, Order, OrderMode, OrderStatistics, OrderStatus};
use shared::util::{is_blank, normalize_text};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub order_id: String,
    pub print: PrintOutcome,
}

impl From<SubmitOutcome> for ApiResponse<SubmitOutcome> {
    /// A failed print is a degraded success: the order exists either way
    fn from(outcome: SubmitOutcome) -> Self {
        match &outcome.print {
            PrintOutcome::Printed => ApiResponse::success(outcome),
            PrintOutcome::Failed { reason } => ApiResponse::success_with_message(
                format!("Order created, ticket not printed: {reason}"),
                outcome,
            ),
        }
    }
}

pub struct OrderService<S: OrderStore, P: TicketPrinter> {
    store: Arc<S>,
    printer: Arc<P>,
    renderer: TicketRenderer,
    tz: Tz,
}

impl<S: OrderStore, P: TicketPrinter> std::fmt::Debug for OrderService<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService")
            .field("renderer", &self.renderer)
            .field("tz", &self.tz)
            .finish_non_exhaustive()
    }
}

impl<S: OrderStore, P: TicketPrinter> OrderService<S, P> {
    pub fn new(store: Arc<S>, printer: Arc<P>, renderer: TicketRenderer, tz: Tz) -> Self {
        Self {
            store,
            printer,
            renderer,
            tz,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Validate, persist as `pending`, then print
    #[instrument(skip(self, active), fields(active_id = %active.id))]
    pub async fn submit(&self, active: &ActiveOrder) -> OrderResult<SubmitOutcome> {
        let order = snapshot_order(active)?;
        let order_id = order.id.clone();
        self.store.insert(order.clone()).await?;
        info!(
            order_id = %order_id,
            mode = %order.mode,
            total = order.total,
            items = order.items.len(),
            "Order submitted"
        );

        let print = self.print(&order).await;
        Ok(SubmitOutcome { order_id, print })
    }

    /// Submit the session's order; the session is reset only on success
    ///
    /// The session is frozen for the whole submission, so no command can
    /// slip in between the snapshot and the reset.
    pub async fn submit_session(&self, session: &CartSession) -> OrderResult<SubmitOutcome> {
        let guard = session
            .begin_submit()
            .ok_or_else(|| OrderError::SubmissionInProgress(session.snapshot().id))?;
        let outcome = self.submit(guard.order()).await?;
        guard.commit();
        Ok(outcome)
    }

    /// Re-send the ticket of a persisted order
    pub async fn reprint(&self, order_id: &str) -> OrderResult<PrintOutcome> {
        let order = self.load(order_id).await?;
        Ok(self.print(&order).await)
    }

    pub async fn mark_served(&self, order_id: &str) -> OrderResult<Order> {
        self.transition(order_id, OrderStatus::Served, None).await
    }

    pub async fn mark_paid(&self, order_id: &str) -> OrderResult<Order> {
        self.transition(order_id, OrderStatus::Paid, None).await
    }

    pub async fn cancel(&self, order_id: &str, reason: &str) -> OrderResult<Order> {
        self.transition(order_id, OrderStatus::Cancelled, Some(reason))
            .await
    }

    /// Re-read, validate and persist a status change
    ///
    /// The write only lands if the stored status is still the one the
    /// transition was validated against.
    #[instrument(skip(self, reason))]
    pub async fn transition(
        &self,
        order_id: &str,
        target: OrderStatus,
        reason: Option<&str>,
    ) -> OrderResult<Order> {
        let current = self.load(order_id).await?;
        let next = apply_transition(&current, target, reason, Utc::now())?;
        self.store
            .update_if_status(next.clone(), current.status)
            .await?;
        info!(order_id, from = %current.status, to = %target, "Order status changed");
        Ok(next)
    }

    pub async fn get(&self, order_id: &str) -> OrderResult<Order> {
        self.load(order_id).await
    }

    pub async fn orders_for_slot(&self, mode: OrderMode, slot: &str) -> OrderResult<Vec<Order>> {
        Ok(self.store.list_for_slot(mode, slot).await?)
    }

    pub async fn board(&self) -> OrderResult<OrderBoard> {
        let orders = self.store.list().await?;
        Ok(OrderBoard::from_snapshot(&orders, Utc::now(), self.tz))
    }

    pub async fn statistics(&self) -> OrderResult<OrderStatistics> {
        let orders = self.store.list().await?;
        Ok(compute_statistics(&orders, Utc::now(), self.tz))
    }

    /// Live board, recomputed on every store change
    pub async fn watch_board(&self) -> OrderResult<(watch::Receiver<OrderBoard>, JoinHandle<()>)> {
        let feed = self.store.subscribe();
        let initial = self.board().await?;
        Ok(spawn_board_watcher(feed, initial, self.tz))
    }

    async fn load(&self, order_id: &str) -> OrderResult<Order> {
        self.store
            .get(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }

    async fn print(&self, order: &Order) -> PrintOutcome {
        let payload = self.renderer.render(order);
        match self.printer.print(&payload).await {
            Ok(()) => PrintOutcome::Printed,
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "Order saved but ticket printing failed");
                PrintOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Build the persisted order from a validated cart
fn snapshot_order(active: &ActiveOrder) -> OrderResult<Order> {
    if active.is_empty() {
        return Err(OrderError::Empty);
    }
    let (table_number, client_number) = match active.order_type {
        OrderMode::DineIn => {
            if is_blank(active.table_number.as_deref()) {
                return Err(OrderError::TableNumberRequired);
            }
            (normalize_text(active.table_number.clone()), None)
        }
        OrderMode::Takeaway => {
            if is_blank(active.client_number.as_deref()) {
                return Err(OrderError::ClientNumberRequired);
            }
            (None, normalize_text(active.client_number.clone()))
        }
    };

    Ok(Order {
        id: uuid::Uuid::new_v4().to_string(),
        created_at: Utc::now(),
        status: OrderStatus::Pending,
        mode: active.order_type,
        table_number,
        client_number,
        total: money::cart_total(&active.items),
        items: active.items.clone(),
        note: normalize_text(active.global_note.clone()),
        updated_at: None,
        served_at: None,
        paid_at: None,
        cancelled_at: None,
        cancellation_reason: None,
    })
}

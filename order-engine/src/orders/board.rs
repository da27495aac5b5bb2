//! Live order board
//!
//! Derived views recomputed from the full order set each time the store
//! feed pushes a new snapshot.

use super::statistics::{compute_statistics, todays_orders};
use super::store::OrderFeed;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use shared::order::{Order, OrderStatistics, OrderStatus};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Today's orders split by status, newest first
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBoard {
    pub pending: Vec<Order>,
    pub served: Vec<Order>,
    pub paid: Vec<Order>,
    /// Not shown with the active lists, kept for audit
    pub cancelled: Vec<Order>,
    pub statistics: OrderStatistics,
}

impl OrderBoard {
    pub fn from_snapshot(orders: &[Order], now: DateTime<Utc>, tz: Tz) -> Self {
        let mut board = OrderBoard {
            statistics: compute_statistics(orders, now, tz),
            ..Default::default()
        };
        for order in todays_orders(orders, now, tz) {
            let list = match order.status {
                OrderStatus::Pending => &mut board.pending,
                OrderStatus::Served => &mut board.served,
                OrderStatus::Paid => &mut board.paid,
                OrderStatus::Cancelled => &mut board.cancelled,
            };
            list.push(order.clone());
        }
        for list in [
            &mut board.pending,
            &mut board.served,
            &mut board.paid,
            &mut board.cancelled,
        ] {
            list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        board
    }

    /// Orders of the three active lists
    pub fn active_count(&self) -> usize {
        self.pending.len() + self.served.len() + self.paid.len()
    }
}

/// Recompute the board on every feed push
///
/// The task ends when the feed closes or every board receiver is dropped.
pub fn spawn_board_watcher(
    mut feed: OrderFeed,
    initial: OrderBoard,
    tz: Tz,
) -> (watch::Receiver<OrderBoard>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(initial);
    let handle = tokio::spawn(async move {
        loop {
            match feed.recv().await {
                Ok(orders) => {
                    let board = OrderBoard::from_snapshot(&orders, Utc::now(), tz);
                    if tx.send(board).is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // the next push carries the full set again
                    tracing::warn!(skipped, "Order board lagged behind the feed");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::debug!("Order board watcher stopped");
    });
    (rx, handle)
}

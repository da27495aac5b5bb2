//! Daily order statistics
//!
//! Recomputed from the full order set on every change. Only orders created
//! during the current business day count; revenue only counts paid orders.

use super::money;
use crate::utils::time::day_bounds;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::order::{Order, OrderStatistics, OrderStatus};

/// Orders created within the business day containing `now`
pub fn todays_orders<'a>(
    orders: &'a [Order],
    now: DateTime<Utc>,
    tz: Tz,
) -> impl Iterator<Item = &'a Order> + 'a {
    let (start, end) = day_bounds(now, tz);
    orders
        .iter()
        .filter(move |o| o.created_at >= start && o.created_at < end)
}

pub fn compute_statistics(orders: &[Order], now: DateTime<Utc>, tz: Tz) -> OrderStatistics {
    let mut stats = OrderStatistics::default();
    let mut revenue = Decimal::ZERO;

    for order in todays_orders(orders, now, tz) {
        stats.total_orders += 1;
        match order.status {
            OrderStatus::Pending => stats.pending_orders += 1,
            OrderStatus::Served => stats.served_orders += 1,
            OrderStatus::Paid => {
                stats.paid_orders += 1;
                revenue += money::to_decimal(order.total);
            }
            OrderStatus::Cancelled => stats.cancelled_orders += 1,
        }
    }

    stats.total_revenue = money::to_f64(revenue);
    stats.average_order_value = if stats.paid_orders == 0 {
        0.0
    } else {
        money::to_f64(revenue / Decimal::from(stats.paid_orders))
    };
    stats
}

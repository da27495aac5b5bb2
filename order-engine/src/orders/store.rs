//! Order store seam
//!
//! Orders are only ever inserted or updated; the engine never deletes one.
//! Updates go through [`OrderStore::update_if_status`] so that two racing
//! transitions cannot both win.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::order::{Order, OrderMode, OrderStatus};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::broadcast;

/// Feed channel capacity
const FEED_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Order store unavailable: {0}")]
    Unavailable(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Order already exists: {0}")]
    AlreadyExists(String),

    #[error("Order {order_id} is {actual}, expected {expected}")]
    StatusMismatch {
        order_id: String,
        expected: OrderStatus,
        actual: OrderStatus,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Full order set pushed after every change
pub type OrderFeed = broadcast::Receiver<Arc<Vec<Order>>>;

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, order: Order) -> StoreResult<()>;

    async fn get(&self, order_id: &str) -> StoreResult<Option<Order>>;

    /// Every order, oldest first
    async fn list(&self) -> StoreResult<Vec<Order>>;

    /// Orders of one table (dine-in) or client (takeaway)
    async fn list_for_slot(&self, mode: OrderMode, slot: &str) -> StoreResult<Vec<Order>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|o| o.mode == mode && o.slot() == Some(slot))
            .collect())
    }

    /// Replace the stored order only if it is still in `expected`
    async fn update_if_status(&self, order: Order, expected: OrderStatus) -> StoreResult<()>;

    fn subscribe(&self) -> OrderFeed;
}

/// In-process store backed by a map
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<String, Order>>,
    feed_tx: broadcast::Sender<Arc<Vec<Order>>>,
    offline: AtomicBool,
}

impl std::fmt::Debug for InMemoryOrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryOrderStore")
            .field("orders", &self.orders.read().len())
            .field("feed_tx", &"<broadcast::Sender>")
            .field("offline", &self.offline.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        let (feed_tx, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            orders: RwLock::new(HashMap::new()),
            feed_tx,
            offline: AtomicBool::new(false),
        }
    }

    /// Simulate the backing store going down (or coming back)
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".into()));
        }
        Ok(())
    }

    fn sorted(orders: &HashMap<String, Order>) -> Vec<Order> {
        let mut list: Vec<Order> = orders.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        list
    }

    fn publish(&self, orders: &HashMap<String, Order>) {
        if self.feed_tx.send(Arc::new(Self::sorted(orders))).is_err() {
            tracing::trace!("Order feed has no subscribers");
        }
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: Order) -> StoreResult<()> {
        self.check_online()?;
        let mut orders = self.orders.write();
        if orders.contains_key(&order.id) {
            return Err(StoreError::AlreadyExists(order.id));
        }
        orders.insert(order.id.clone(), order);
        self.publish(&orders);
        Ok(())
    }

    async fn get(&self, order_id: &str) -> StoreResult<Option<Order>> {
        self.check_online()?;
        Ok(self.orders.read().get(order_id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Order>> {
        self.check_online()?;
        Ok(Self::sorted(&self.orders.read()))
    }

    async fn update_if_status(&self, order: Order, expected: OrderStatus) -> StoreResult<()> {
        self.check_online()?;
        let mut orders = self.orders.write();
        let current = orders
            .get_mut(&order.id)
            .ok_or_else(|| StoreError::NotFound(order.id.clone()))?;
        if current.status != expected {
            return Err(StoreError::StatusMismatch {
                order_id: order.id,
                expected,
                actual: current.status,
            });
        }
        *current = order;
        self.publish(&orders);
        Ok(())
    }

    fn subscribe(&self) -> OrderFeed {
        self.feed_tx.subscribe()
    }
}

use super::store::StoreError;
use shared::error::{AppError, ErrorCode};
use shared::order::OrderStatus;
use thiserror::Error;

/// Order submission and lifecycle errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    #[error("Cannot submit an empty order")]
    Empty,

    #[error("Dine-in orders require a table number")]
    TableNumberRequired,

    #[error("Takeaway orders require a client number")]
    ClientNumberRequired,

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Transition not authorized: {from} -> {to}")]
    TransitionNotAllowed { from: OrderStatus, to: OrderStatus },

    #[error("Cancelling an order requires a reason")]
    CancellationReasonRequired,

    #[error("Order {order_id} was modified concurrently (now {actual})")]
    ConcurrentModification {
        order_id: String,
        actual: OrderStatus,
    },

    #[error("Order {0} is already being submitted")]
    SubmissionInProgress(String),

    #[error("Store error: {0}")]
    Store(StoreError),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => OrderError::NotFound(id),
            StoreError::StatusMismatch { order_id, actual, .. } => {
                OrderError::ConcurrentModification { order_id, actual }
            }
            other => OrderError::Store(other),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let code = match &err {
            OrderError::Empty => ErrorCode::OrderEmpty,
            OrderError::TableNumberRequired => ErrorCode::TableNumberRequired,
            OrderError::ClientNumberRequired => ErrorCode::ClientNumberRequired,
            OrderError::NotFound(_) => ErrorCode::OrderNotFound,
            OrderError::TransitionNotAllowed { .. } => ErrorCode::TransitionNotAllowed,
            OrderError::CancellationReasonRequired => ErrorCode::CancellationReasonRequired,
            OrderError::ConcurrentModification { .. } => ErrorCode::ConcurrentModification,
            OrderError::SubmissionInProgress(_) => ErrorCode::SubmissionInProgress,
            OrderError::Store(StoreError::Unavailable(_)) => ErrorCode::StoreUnavailable,
            OrderError::Store(StoreError::AlreadyExists(_)) => ErrorCode::AlreadyExists,
            OrderError::Store(e) => {
                tracing::error!(error = %e, "Order store error");
                ErrorCode::InternalError
            }
        };
        let app = AppError::with_message(code, err.to_string());
        match err {
            OrderError::TransitionNotAllowed { from, to } => app
                .with_detail("from", from.as_str())
                .with_detail("to", to.as_str()),
            OrderError::NotFound(id) | OrderError::ConcurrentModification { order_id: id, .. } => {
                app.with_detail("orderId", id)
            }
            _ => app,
        }
    }
}

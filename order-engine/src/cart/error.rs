use crate::orders::money::InvalidAmount;
use shared::error::{AppError, ErrorCode};
use shared::order::{OrderMode, PortionType};
use thiserror::Error;

/// Cart command rejections; a rejected command leaves the cart unchanged
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Item is not available: {0}")]
    ItemUnavailable(String),

    #[error("Composed menu must be built through the wizard: {0}")]
    RequiresWizard(String),

    #[error("Portion {portion:?} is not offered for item {item_id}")]
    PortionNotOffered { item_id: String, portion: PortionType },

    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    #[error("Only composed lines can be appended as-is")]
    NotComposedLine,

    #[error("Cannot set {field} on a {mode} order")]
    ModeMismatch { field: &'static str, mode: OrderMode },

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] InvalidAmount),

    #[error("Order {0} is being submitted")]
    SubmissionInProgress(String),
}

pub type CartResult<T> = Result<T, CartError>;

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        let code = match &err {
            CartError::ItemNotFound(_) => ErrorCode::ProductNotFound,
            CartError::ItemUnavailable(_) => ErrorCode::ProductUnavailable,
            CartError::RequiresWizard(_) => ErrorCode::ComposedMenuRequiresWizard,
            CartError::PortionNotOffered { .. } => ErrorCode::PortionNotOffered,
            CartError::LineNotFound(_) => ErrorCode::CartLineNotFound,
            CartError::NotComposedLine | CartError::ModeMismatch { .. } => {
                ErrorCode::ValidationFailed
            }
            CartError::InvalidPrice(_) => ErrorCode::ProductInvalidPrice,
            CartError::SubmissionInProgress(_) => ErrorCode::SubmissionInProgress,
        };
        AppError::with_message(code, err.to_string())
    }
}

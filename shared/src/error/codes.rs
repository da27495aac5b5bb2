//! Unified error codes for the order engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order / cart errors
//! - 6xxx: Menu and composed-menu errors
//! - 9xxx: System and integration errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order is empty
    OrderEmpty = 4007,
    /// Dine-in order without a table number
    TableNumberRequired = 4008,
    /// Takeaway order without a client number
    ClientNumberRequired = 4009,
    /// Status transition is not in the allow-list
    TransitionNotAllowed = 4010,
    /// Cancelling an order requires a reason
    CancellationReasonRequired = 4011,
    /// Order was modified concurrently
    ConcurrentModification = 4012,
    /// Cart line not found
    CartLineNotFound = 4013,
    /// Cart is being submitted and cannot change
    SubmissionInProgress = 4014,

    // ==================== 6xxx: Menu ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,
    /// Product is not available
    ProductUnavailable = 6004,
    /// Composed menu must go through the selection wizard
    ComposedMenuRequiresWizard = 6005,
    /// Portion not offered for this category
    PortionNotOffered = 6006,
    /// Composed menu configuration not found
    ComposedMenuNotFound = 6007,
    /// Current wizard step does not satisfy its selection rules
    WizardStepInvalid = 6008,
    /// Wizard is not open
    WizardNotOpen = 6009,
    /// Wizard can only be finalized from its last step
    WizardNotAtLastStep = 6010,
    /// Menu rules document is invalid
    MenuRulesInvalid = 6011,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Order store unavailable
    StoreUnavailable = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Printer not available
    PrinterNotAvailable = 9201,
    /// Print operation failed
    PrintFailed = 9202,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::TableNumberRequired => "Table number is required for dine-in orders",
            ErrorCode::ClientNumberRequired => "Client number is required for takeaway orders",
            ErrorCode::TransitionNotAllowed => "Status transition not authorized",
            ErrorCode::CancellationReasonRequired => "A cancellation reason is required",
            ErrorCode::ConcurrentModification => "Order was modified by another operation",
            ErrorCode::CartLineNotFound => "Cart line not found",
            ErrorCode::SubmissionInProgress => "Order is being submitted",

            // Menu
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::ProductUnavailable => "Product is not available",
            ErrorCode::ComposedMenuRequiresWizard => {
                "Composed menu must be configured through the selection wizard"
            }
            ErrorCode::PortionNotOffered => "Portion is not offered for this product",
            ErrorCode::ComposedMenuNotFound => "Composed menu configuration not found",
            ErrorCode::WizardStepInvalid => "Current step selection is not valid",
            ErrorCode::WizardNotOpen => "Selection wizard is not open",
            ErrorCode::WizardNotAtLastStep => "Selection wizard is not at its last step",
            ErrorCode::MenuRulesInvalid => "Menu rules document is invalid",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StoreUnavailable => "Order store unavailable",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::PrinterNotAvailable => "Printer is not available",
            ErrorCode::PrintFailed => "Print operation failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            4 => Ok(ErrorCode::AlreadyExists),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::TableNumberRequired),
            4009 => Ok(ErrorCode::ClientNumberRequired),
            4010 => Ok(ErrorCode::TransitionNotAllowed),
            4011 => Ok(ErrorCode::CancellationReasonRequired),
            4012 => Ok(ErrorCode::ConcurrentModification),
            4013 => Ok(ErrorCode::CartLineNotFound),
            4014 => Ok(ErrorCode::SubmissionInProgress),

            // Menu
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6004 => Ok(ErrorCode::ProductUnavailable),
            6005 => Ok(ErrorCode::ComposedMenuRequiresWizard),
            6006 => Ok(ErrorCode::PortionNotOffered),
            6007 => Ok(ErrorCode::ComposedMenuNotFound),
            6008 => Ok(ErrorCode::WizardStepInvalid),
            6009 => Ok(ErrorCode::WizardNotOpen),
            6010 => Ok(ErrorCode::WizardNotAtLastStep),
            6011 => Ok(ErrorCode::MenuRulesInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StoreUnavailable),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9201 => Ok(ErrorCode::PrinterNotAvailable),
            9202 => Ok(ErrorCode::PrintFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

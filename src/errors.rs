//! Unified error type for the receipt keeper crate.
//!
//! Every fallible operation returns [`Result`]. Validation failures keep the full
//! list of field-level violations so a caller can report them in one response.

use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

/// Errors produced by entity, schema and service operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The storage engine rejected an operation
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// An enumeration received a value outside its closed set
    #[error("Invalid value '{value}' for {field}, expected one of: {}", allowed.join(", "))]
    InvalidEnumValue {
        /// Name of the enumeration or field
        field: &'static str,
        /// The rejected raw value
        value: String,
        /// Every accepted value
        allowed: Vec<String>,
    },

    /// One or more input fields failed validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A receipt status change that the lifecycle does not allow
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: String,
        /// Requested status or transition
        to: String,
    },

    /// No user with this identifier
    #[error("User not found: {id}")]
    UserNotFound {
        /// The missing user id
        id: Uuid,
    },

    /// The user exists but has been deactivated
    #[error("User is inactive: {id}")]
    UserInactive {
        /// The inactive user id
        id: Uuid,
    },

    /// No category with this identifier
    #[error("Category not found: {id}")]
    CategoryNotFound {
        /// The missing category id
        id: String,
    },

    /// A category with this identifier already exists
    #[error("Category already exists: {id}")]
    DuplicateCategory {
        /// The conflicting category id
        id: String,
    },

    /// The category is still referenced by receipts and cannot be deleted
    #[error("Category {id} is referenced by {receipts} receipt(s)")]
    CategoryInUse {
        /// The category id
        id: String,
        /// Number of receipts referencing it
        receipts: u64,
    },

    /// No receipt with this identifier
    #[error("Receipt not found: {id}")]
    ReceiptNotFound {
        /// The missing receipt id
        id: Uuid,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

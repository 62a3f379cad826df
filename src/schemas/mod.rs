//! Projection schemas - validated request shapes and allow-listed response shapes.
//!
//! Request schemas are built from untrusted JSON through [`ValidateInput`]; response
//! schemas are built from entity models through explicit `From<&Model>` impls that
//! copy only the fields declared in [`WireSchema::FIELDS`]. The re-exports below are
//! the flat schema namespace; [`crate::registry::SCHEMAS`] must list every one of them.

pub mod category;
pub mod fields;
pub mod receipt;
pub mod receipt_edit;
pub mod user;

use crate::errors::Result;
use serde_json::Value;
use validator::ValidationErrors;

pub use category::{CategoryCreate, CategoryResponse, CategoryUpdate};
pub use fields::Input;
pub use receipt::{
    FieldChange, ReceiptChange, ReceiptCreate, ReceiptResponse, ReceiptStatusUpdate,
    ReceiptUpdate,
};
pub use receipt_edit::ReceiptEditResponse;
pub use user::{UserCreate, UserPlanUpdate, UserResponse};

/// A named wire shape with a fixed field allow-list.
pub trait WireSchema {
    /// Schema name as published to API tooling
    const NAME: &'static str;
    /// Every field the schema reads or writes, in declaration order
    const FIELDS: &'static [&'static str];
}

/// Request schemas: validation of a raw JSON object into a typed value.
pub trait ValidateInput: WireSchema + Sized {
    /// Checks presence, types and domain constraints of every declared field.
    /// On failure the error lists every violated field, not just the first.
    fn validate(input: &Input) -> std::result::Result<Self, ValidationErrors>;

    /// Like [`ValidateInput::validate`] but accepts any JSON value; non-objects are
    /// reported under [`fields::BODY_KEY`].
    fn validate_value(value: &Value) -> std::result::Result<Self, ValidationErrors> {
        match value.as_object() {
            Some(input) => Self::validate(input),
            None => {
                let mut errors = ValidationErrors::new();
                errors.add(
                    fields::BODY_KEY,
                    fields::violation("invalid_type", "request body must be a JSON object"),
                );
                Err(errors)
            }
        }
    }

    /// Validates a request body into the crate-wide error type.
    fn parse(value: &Value) -> Result<Self> {
        Self::validate_value(value).map_err(Into::into)
    }
}

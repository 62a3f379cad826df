//! Receipt edit response schema. Audit records are written by the service layer
//! only, so there is no request shape.

use super::WireSchema;
use crate::entities::receipt_edit;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Public view of one audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptEditResponse {
    pub id: Uuid,
    pub receipt_id: Uuid,
    pub edited_by: Option<Uuid>,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub edited_at: DateTime<Utc>,
}

impl WireSchema for ReceiptEditResponse {
    const NAME: &'static str = "ReceiptEditResponse";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "receipt_id",
        "edited_by",
        "field_name",
        "old_value",
        "new_value",
        "edited_at",
    ];
}

impl From<&receipt_edit::Model> for ReceiptEditResponse {
    fn from(model: &receipt_edit::Model) -> Self {
        Self {
            id: model.id,
            receipt_id: model.receipt_id,
            edited_by: model.edited_by,
            field_name: model.field_name.clone(),
            old_value: model.old_value.clone(),
            new_value: model.new_value.clone(),
            edited_at: model.edited_at,
        }
    }
}

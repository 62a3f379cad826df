//! Receipt edit business logic - Writing and reading the append-only audit trail.

use crate::{
    entities::{ReceiptEdit, receipt_edit},
    errors::Result,
    schemas::FieldChange,
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Writes one audit row per change. Meant to run inside the same transaction as
/// the receipt update it describes.
pub async fn record_changes<C>(
    db: &C,
    receipt_id: Uuid,
    edited_by: Option<Uuid>,
    changes: &[FieldChange],
    edited_at: DateTime<Utc>,
) -> Result<Vec<receipt_edit::Model>>
where
    C: ConnectionTrait,
{
    let mut recorded = Vec::with_capacity(changes.len());
    for change in changes {
        let edit = receipt_edit::ActiveModel {
            id: Set(Uuid::new_v4()),
            receipt_id: Set(receipt_id),
            edited_by: Set(edited_by),
            field_name: Set(change.field.to_string()),
            old_value: Set(change.old_value.clone()),
            new_value: Set(change.new_value.clone()),
            edited_at: Set(edited_at),
        };
        recorded.push(edit.insert(db).await?);
    }
    Ok(recorded)
}

/// Retrieves the audit trail of a receipt, oldest first.
pub async fn list_edits_for_receipt(
    db: &DatabaseConnection,
    receipt_id: Uuid,
) -> Result<Vec<receipt_edit::Model>> {
    ReceiptEdit::find()
        .filter(receipt_edit::Column::ReceiptId.eq(receipt_id))
        .order_by_asc(receipt_edit::Column::EditedAt)
        .order_by_asc(receipt_edit::Column::FieldName)
        .all(db)
        .await
        .map_err(Into::into)
}

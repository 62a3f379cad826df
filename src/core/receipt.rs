//! Receipt business logic - Capture, edits, status transitions and deletion.
//!
//! Every change to a stored receipt goes through a database transaction that
//! writes the new row and its audit records together. Status changes are checked
//! against the receipt lifecycle before anything is written, so a rejected
//! transition leaves the stored receipt exactly as it was.

use crate::{
    core::{category::get_category_by_id, receipt_edit::record_changes, user::get_user_by_id},
    entities::{Receipt, ReceiptEdit, ReceiptStatus, ReceiptTransition, receipt, receipt_edit},
    errors::{Error, Result},
    schemas::{FieldChange, ReceiptCreate, ReceiptUpdate},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Captures a new receipt for `user_id`. New receipts start as `pending`.
///
/// # Errors
/// - [`Error::UserNotFound`] / [`Error::UserInactive`] if the owner cannot capture receipts
/// - [`Error::CategoryNotFound`] if the category does not exist
#[instrument(skip(db, input), fields(category_id = %input.category_id))]
pub async fn create_receipt(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: ReceiptCreate,
) -> Result<receipt::Model> {
    let owner = get_user_by_id(db, user_id)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;
    if !owner.is_active {
        return Err(Error::UserInactive { id: user_id });
    }
    if get_category_by_id(db, &input.category_id).await?.is_none() {
        return Err(Error::CategoryNotFound {
            id: input.category_id,
        });
    }

    let now = chrono::Utc::now();
    let receipt = receipt::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        category_id: Set(input.category_id),
        status: Set(ReceiptStatus::INITIAL),
        merchant: Set(input.merchant),
        amount_cents: Set(input.amount_cents),
        currency: Set(input.currency),
        purchased_on: Set(input.purchased_on),
        note: Set(input.note),
        image_key: Set(None),
        ocr_text: Set(None),
        failure_reason: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = receipt.insert(db).await?;
    info!(receipt_id = %created.id, %user_id, "receipt captured");
    Ok(created)
}

/// Finds a receipt by id, returning None if it does not exist.
pub async fn get_receipt_by_id<C>(db: &C, receipt_id: Uuid) -> Result<Option<receipt::Model>>
where
    C: ConnectionTrait,
{
    Receipt::find_by_id(receipt_id)
        .one(db)
        .await
        .map_err(Into::into)
}

async fn require_receipt<C>(db: &C, receipt_id: Uuid) -> Result<receipt::Model>
where
    C: ConnectionTrait,
{
    get_receipt_by_id(db, receipt_id)
        .await?
        .ok_or(Error::ReceiptNotFound { id: receipt_id })
}

/// Lists a user's receipts, most recent purchase first.
pub async fn list_receipts_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<receipt::Model>> {
    Receipt::find()
        .filter(receipt::Column::UserId.eq(user_id))
        .order_by_desc(receipt::Column::PurchasedOn)
        .order_by_desc(receipt::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update and records one audit row per changed field.
/// An update that changes nothing writes nothing.
#[instrument(skip(db, update))]
pub async fn update_receipt(
    db: &DatabaseConnection,
    receipt_id: Uuid,
    editor: Uuid,
    update: ReceiptUpdate,
) -> Result<receipt::Model> {
    let txn = db.begin().await?;
    let current = require_receipt(&txn, receipt_id).await?;

    if let Some(category_id) = update
        .category_id
        .as_ref()
        .filter(|id| **id != current.category_id)
    {
        if get_category_by_id(&txn, category_id).await?.is_none() {
            return Err(Error::CategoryNotFound {
                id: category_id.clone(),
            });
        }
    }

    let now = chrono::Utc::now();
    let change = update.apply(&current, now);
    if change.is_empty() {
        return Ok(current);
    }

    let saved = receipt::ActiveModel::from(change.receipt)
        .reset_all()
        .update(&txn)
        .await?;
    record_changes(&txn, receipt_id, Some(editor), &change.changes, now).await?;
    txn.commit().await?;

    info!(%receipt_id, changed = change.changes.len(), "receipt updated");
    Ok(saved)
}

/// Moves a receipt to `target` if the lifecycle allows it.
///
/// # Errors
/// Returns [`Error::InvalidTransition`] without writing anything when the edge
/// does not exist.
pub async fn transition_receipt(
    db: &DatabaseConnection,
    receipt_id: Uuid,
    editor: Option<Uuid>,
    target: ReceiptStatus,
) -> Result<receipt::Model> {
    change_status(db, receipt_id, editor, |status| status.transition_to(target), None).await
}

/// Applies a named lifecycle event. `failure_reason` is stored on `Fail` and
/// cleared on `Retry`.
pub async fn apply_receipt_transition(
    db: &DatabaseConnection,
    receipt_id: Uuid,
    editor: Option<Uuid>,
    transition: ReceiptTransition,
    failure_reason: Option<String>,
) -> Result<receipt::Model> {
    change_status(
        db,
        receipt_id,
        editor,
        |status| status.apply(transition),
        failure_reason,
    )
    .await
}

#[instrument(skip(db, next, failure_reason))]
async fn change_status<F>(
    db: &DatabaseConnection,
    receipt_id: Uuid,
    editor: Option<Uuid>,
    next: F,
    failure_reason: Option<String>,
) -> Result<receipt::Model>
where
    F: FnOnce(ReceiptStatus) -> Result<ReceiptStatus>,
{
    let txn = db.begin().await?;
    let current = require_receipt(&txn, receipt_id).await?;
    let status = next(current.status)?;

    let failure_reason = match status {
        ReceiptStatus::Failed => failure_reason,
        ReceiptStatus::Pending => None,
        _ => current.failure_reason.clone(),
    };
    let change = FieldChange {
        field: "status",
        old_value: Some(current.status.to_string()),
        new_value: Some(status.to_string()),
    };

    let now = chrono::Utc::now();
    let mut active: receipt::ActiveModel = current.into();
    active.status = Set(status);
    active.failure_reason = Set(failure_reason);
    active.updated_at = Set(now);
    let saved = active.update(&txn).await?;
    record_changes(&txn, receipt_id, editor, &[change], now).await?;
    txn.commit().await?;

    info!(%receipt_id, %status, "receipt status changed");
    Ok(saved)
}

/// Deletes a receipt together with its audit trail.
#[instrument(skip(db))]
pub async fn delete_receipt(db: &DatabaseConnection, receipt_id: Uuid) -> Result<()> {
    let txn = db.begin().await?;
    require_receipt(&txn, receipt_id).await?;

    let edits = ReceiptEdit::delete_many()
        .filter(receipt_edit::Column::ReceiptId.eq(receipt_id))
        .exec(&txn)
        .await?;
    Receipt::delete_by_id(receipt_id).exec(&txn).await?;
    txn.commit().await?;

    info!(%receipt_id, edits = edits.rows_affected, "receipt deleted");
    Ok(())
}

//! Receipt request and response schemas.
//!
//! Updates never touch the model they are given: [`ReceiptUpdate::apply`] returns
//! the new model together with the per-field delta, and the caller decides how to
//! persist both.

use super::fields::{self, FieldReader, Input};
use super::{ValidateInput, WireSchema};
use crate::entities::{receipt, ReceiptStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::ValidationErrors;

const CATEGORY_ID_MAX: u64 = 32;
const MERCHANT_MAX: u64 = 200;
const NOTE_MAX: u64 = 1000;
/// Upper bound for a single receipt, in minor units.
const AMOUNT_MAX_CENTS: i64 = 100_000_000_000;

/// Payload for capturing a receipt. The owner comes from the authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptCreate {
    pub category_id: String,
    pub merchant: String,
    pub amount_cents: i64,
    pub currency: String,
    pub purchased_on: NaiveDate,
    pub note: Option<String>,
}

impl WireSchema for ReceiptCreate {
    const NAME: &'static str = "ReceiptCreate";
    const FIELDS: &'static [&'static str] = &[
        "category_id",
        "merchant",
        "amount_cents",
        "currency",
        "purchased_on",
        "note",
    ];
}

impl ValidateInput for ReceiptCreate {
    fn validate(input: &Input) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(input, Self::FIELDS);
        let category_id = reader.required("category_id", |v| fields::slug(v, CATEGORY_ID_MAX));
        let merchant = reader.required("merchant", |v| fields::text(v, MERCHANT_MAX));
        let amount_cents =
            reader.required("amount_cents", |v| fields::integer(v, 1, AMOUNT_MAX_CENTS));
        let currency = reader.required("currency", fields::currency);
        let purchased_on = reader.required("purchased_on", fields::date);
        let note = reader.optional("note", |v| fields::text(v, NOTE_MAX));

        match (category_id, merchant, amount_cents, currency, purchased_on) {
            (
                Some(category_id),
                Some(merchant),
                Some(amount_cents),
                Some(currency),
                Some(purchased_on),
            ) if reader.is_clean() => Ok(Self {
                category_id,
                merchant,
                amount_cents,
                currency,
                purchased_on,
                note,
            }),
            _ => Err(reader.into_errors()),
        }
    }
}

/// Partial update of a receipt. `note: null` clears the note; other fields cannot
/// be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReceiptUpdate {
    pub category_id: Option<String>,
    pub merchant: Option<String>,
    pub amount_cents: Option<i64>,
    pub currency: Option<String>,
    pub purchased_on: Option<NaiveDate>,
    pub note: Option<Option<String>>,
}

impl WireSchema for ReceiptUpdate {
    const NAME: &'static str = "ReceiptUpdate";
    const FIELDS: &'static [&'static str] = &[
        "category_id",
        "merchant",
        "amount_cents",
        "currency",
        "purchased_on",
        "note",
    ];
}

impl ValidateInput for ReceiptUpdate {
    fn validate(input: &Input) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(input, Self::FIELDS);
        let update = Self {
            category_id: reader.patch("category_id", |v| fields::slug(v, CATEGORY_ID_MAX)),
            merchant: reader.patch("merchant", |v| fields::text(v, MERCHANT_MAX)),
            amount_cents: reader.patch("amount_cents", |v| {
                fields::integer(v, 1, AMOUNT_MAX_CENTS)
            }),
            currency: reader.patch("currency", fields::currency),
            purchased_on: reader.patch("purchased_on", fields::date),
            note: reader.nullable_patch("note", |v| fields::text(v, NOTE_MAX)),
        };
        if reader.is_clean() {
            Ok(update)
        } else {
            Err(reader.into_errors())
        }
    }
}

/// One changed receipt field, rendered as text for the audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub field: &'static str,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// Result of applying an update: the new model plus what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptChange {
    pub receipt: receipt::Model,
    pub changes: Vec<FieldChange>,
}

impl ReceiptChange {
    /// True when the update did not change any field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

fn diff<T, F>(
    changes: &mut Vec<FieldChange>,
    field: &'static str,
    current: &T,
    requested: Option<&T>,
    render: F,
) -> T
where
    T: Clone + PartialEq,
    F: Fn(&T) -> Option<String>,
{
    match requested {
        Some(new) if new != current => {
            changes.push(FieldChange {
                field,
                old_value: render(current),
                new_value: render(new),
            });
            new.clone()
        }
        _ => current.clone(),
    }
}

impl ReceiptUpdate {
    /// Builds the updated receipt and the list of changed fields. Fields set to
    /// their current value are not reported. `updated_at` only moves when
    /// something changed.
    #[must_use]
    pub fn apply(&self, current: &receipt::Model, now: DateTime<Utc>) -> ReceiptChange {
        let mut changes = Vec::new();
        let category_id = diff(
            &mut changes,
            "category_id",
            &current.category_id,
            self.category_id.as_ref(),
            |v| Some(v.clone()),
        );
        let merchant = diff(
            &mut changes,
            "merchant",
            &current.merchant,
            self.merchant.as_ref(),
            |v| Some(v.clone()),
        );
        let amount_cents = diff(
            &mut changes,
            "amount_cents",
            &current.amount_cents,
            self.amount_cents.as_ref(),
            |v| Some(v.to_string()),
        );
        let currency = diff(
            &mut changes,
            "currency",
            &current.currency,
            self.currency.as_ref(),
            |v| Some(v.clone()),
        );
        let purchased_on = diff(
            &mut changes,
            "purchased_on",
            &current.purchased_on,
            self.purchased_on.as_ref(),
            |v| Some(v.format("%Y-%m-%d").to_string()),
        );
        let note = diff(
            &mut changes,
            "note",
            &current.note,
            self.note.as_ref(),
            Clone::clone,
        );

        let updated_at = if changes.is_empty() {
            current.updated_at
        } else {
            now
        };

        ReceiptChange {
            receipt: receipt::Model {
                category_id,
                merchant,
                amount_cents,
                currency,
                purchased_on,
                note,
                updated_at,
                ..current.clone()
            },
            changes,
        }
    }
}

/// Requested status change for a receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReceiptStatusUpdate {
    pub status: ReceiptStatus,
}

impl WireSchema for ReceiptStatusUpdate {
    const NAME: &'static str = "ReceiptStatusUpdate";
    const FIELDS: &'static [&'static str] = &["status"];
}

impl ValidateInput for ReceiptStatusUpdate {
    fn validate(input: &Input) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(input, Self::FIELDS);
        let status = reader.required("status", fields::enumeration::<ReceiptStatus>);
        match status {
            Some(status) if reader.is_clean() => Ok(Self { status }),
            _ => Err(reader.into_errors()),
        }
    }
}

/// Public view of a receipt. Ingestion internals (`image_key`, `ocr_text`) stay private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: String,
    pub status: ReceiptStatus,
    pub merchant: String,
    pub amount_cents: i64,
    pub currency: String,
    pub purchased_on: NaiveDate,
    pub note: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WireSchema for ReceiptResponse {
    const NAME: &'static str = "ReceiptResponse";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "user_id",
        "category_id",
        "status",
        "merchant",
        "amount_cents",
        "currency",
        "purchased_on",
        "note",
        "failure_reason",
        "created_at",
        "updated_at",
    ];
}

impl From<&receipt::Model> for ReceiptResponse {
    fn from(model: &receipt::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            category_id: model.category_id.clone(),
            status: model.status,
            merchant: model.merchant.clone(),
            amount_cents: model.amount_cents,
            currency: model.currency.clone(),
            purchased_on: model.purchased_on,
            note: model.note.clone(),
            failure_reason: model.failure_reason.clone(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

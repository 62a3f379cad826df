//! Receipt entity - A captured expense record.
//!
//! Each receipt belongs to exactly one user and references exactly one category.
//! `status` only moves along the edges allowed by [`ReceiptStatus`]; every other
//! change is recorded as a `receipt_edit` row.

use super::enums::ReceiptStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Receipt database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipts")]
pub struct Model {
    /// Unique identifier for the receipt
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Classification of the expense
    pub category_id: String,
    /// Lifecycle state
    pub status: ReceiptStatus,
    /// Merchant or shop name
    pub merchant: String,
    /// Total in minor currency units (cents)
    pub amount_cents: i64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Date printed on the receipt
    pub purchased_on: Date,
    /// Free-form user note
    pub note: Option<String>,
    /// Storage key of the uploaded image
    pub image_key: Option<String>,
    /// Raw text extracted during ingestion
    #[sea_orm(column_type = "Text", nullable)]
    pub ocr_text: Option<String>,
    /// Why the last ingestion attempt failed
    pub failure_reason: Option<String>,
    /// When the receipt was captured
    pub created_at: DateTimeUtc,
    /// When the receipt was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Receipt and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each receipt belongs to one user; removing the user removes the receipts
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    /// Each receipt references one category; referenced categories cannot be removed
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Restrict"
    )]
    Category,
    /// One receipt has many audit records
    #[sea_orm(has_many = "super::receipt_edit::Entity")]
    Edits,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::receipt_edit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Edits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

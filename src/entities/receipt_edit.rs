//! Receipt edit entity - Append-only audit trail of receipt changes.
//!
//! One row is written per changed field. Rows are never updated and never
//! deleted on their own; they only go away together with their receipt.

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Receipt edit database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipt_edits")]
pub struct Model {
    /// Unique identifier for the audit record
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Receipt that was changed
    pub receipt_id: Uuid,
    /// User who made the change, `None` for changes made by the ingestion pipeline
    pub edited_by: Option<Uuid>,
    /// Name of the changed receipt field (e.g. `"merchant"`, `"status"`)
    pub field_name: String,
    /// Value before the change, `None` when the field was empty
    pub old_value: Option<String>,
    /// Value after the change, `None` when the field was cleared
    pub new_value: Option<String>,
    /// When the change was made
    pub edited_at: DateTimeUtc,
}

/// Defines relationships between `ReceiptEdit` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each edit belongs to one receipt
    #[sea_orm(
        belongs_to = "super::receipt::Entity",
        from = "Column::ReceiptId",
        to = "super::receipt::Column::Id",
        on_delete = "Cascade"
    )]
    Receipt,
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipt.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            Ok(self)
        } else {
            Err(DbErr::Custom(
                "receipt edits are append-only and cannot be updated".to_string(),
            ))
        }
    }

    async fn before_delete<C>(self, _db: &C) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        Err(DbErr::Custom(
            "receipt edits are append-only and cannot be deleted".to_string(),
        ))
    }
}

//! Category entity - A receipt classification.
//!
//! Categories are seeded centrally and referenced, not owned, by receipts.
//! A category that is still referenced cannot be deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Stable slug identifier (e.g. `"c1"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Name in the primary locale
    pub name: String,
    /// English name
    pub name_en: String,
    /// Icon reference understood by the clients
    pub icon: String,
    /// Color token in `#RRGGBB` form
    pub color: String,
    /// Display order, lowest first
    pub sort_order: i32,
    /// When the category was created
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::receipt::Entity")]
    Receipts,
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! User entity - An account holder.
//!
//! Users own their receipts. Accounts are never hard deleted: `is_active` is
//! cleared instead, and inactive users cannot capture new receipts.

use super::enums::SubscriptionPlan;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Login email, unique across all users
    #[sea_orm(unique)]
    pub email: String,
    /// Credential hash produced by the authentication layer
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Name shown in the UI
    pub display_name: String,
    /// Current billing tier
    pub plan: SubscriptionPlan,
    /// Soft disable flag - inactive accounts keep their data
    pub is_active: bool,
    /// When the account was created
    pub created_at: DateTimeUtc,
    /// When the account was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user owns many receipts
    #[sea_orm(has_many = "super::receipt::Entity")]
    Receipts,
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

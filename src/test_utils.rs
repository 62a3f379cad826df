//! Shared test utilities for `ReceiptKeeper`.
//!
//! This module provides helpers for setting up test databases, creating stored
//! entities with sensible defaults, and building in-memory models for schema tests.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{category, receipt, user},
    entities::{self, ReceiptStatus, SubscriptionPlan},
    errors::Result,
    schemas::{CategoryCreate, ReceiptCreate, UserCreate},
};
use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use uuid::Uuid;
use validator::ValidationErrors;

/// Creates an in-memory `SQLite` database with all registered tables.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an active free-plan user with the given email.
pub async fn create_test_user(db: &DatabaseConnection, email: &str) -> Result<entities::user::Model> {
    let input = UserCreate {
        email: email.to_string(),
        display_name: "Jane".to_string(),
        plan: SubscriptionPlan::Free,
    };
    user::create_user(db, input, "hash".to_string()).await
}

/// A valid category payload: 餐饮 / Dining, icon `food`, color `#FF0000`.
pub fn category_create(id: &str) -> CategoryCreate {
    CategoryCreate {
        id: id.to_string(),
        name: "餐饮".to_string(),
        name_en: "Dining".to_string(),
        icon: "food".to_string(),
        color: "#FF0000".to_string(),
    }
}

/// Stores [`category_create`] with sort order 0.
pub async fn create_test_category(
    db: &DatabaseConnection,
    id: &str,
) -> Result<entities::category::Model> {
    category::create_category(db, category_create(id), 0).await
}

/// A valid receipt payload.
///
/// # Defaults
/// * merchant: "Corner Cafe"
/// * `amount_cents`: 1250 USD
/// * `purchased_on`: 2024-03-15
/// * note: "team lunch"
pub fn receipt_create(category_id: &str) -> ReceiptCreate {
    ReceiptCreate {
        category_id: category_id.to_string(),
        merchant: "Corner Cafe".to_string(),
        amount_cents: 1250,
        currency: "USD".to_string(),
        purchased_on: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        note: Some("team lunch".to_string()),
    }
}

/// Stores [`receipt_create`] for the given owner and category.
pub async fn create_test_receipt(
    db: &DatabaseConnection,
    user_id: Uuid,
    category_id: &str,
) -> Result<entities::receipt::Model> {
    receipt::create_receipt(db, user_id, receipt_create(category_id)).await
}

/// Fresh database holding one user, one category `c1` and one pending receipt.
pub async fn setup_with_receipt() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::category::Model,
    entities::receipt::Model,
)> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "jane@example.com").await?;
    let category = create_test_category(&db, "c1").await?;
    let receipt = create_test_receipt(&db, owner.id, &category.id).await?;
    Ok((db, owner, category, receipt))
}

/// Unsaved user model
pub fn sample_user() -> entities::user::Model {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    entities::user::Model {
        id: Uuid::new_v4(),
        email: "jane@example.com".to_string(),
        password_hash: "$argon2id$v=19$secret".to_string(),
        display_name: "Jane".to_string(),
        plan: SubscriptionPlan::Basic,
        is_active: true,
        created_at,
        updated_at: created_at,
    }
}

/// Unsaved category model
pub fn sample_category(id: &str) -> entities::category::Model {
    let create = category_create(id);
    entities::category::Model {
        id: create.id,
        name: create.name,
        name_en: create.name_en,
        icon: create.icon,
        color: create.color,
        sort_order: 3,
        created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
    }
}

/// Unsaved processed receipt with every optional column filled in.
pub fn sample_receipt() -> entities::receipt::Model {
    let created_at = Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap();
    entities::receipt::Model {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        category_id: "c1".to_string(),
        status: ReceiptStatus::Processed,
        merchant: "Corner Cafe".to_string(),
        amount_cents: 1250,
        currency: "USD".to_string(),
        purchased_on: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        note: Some("team lunch".to_string()),
        image_key: Some("receipts/2024/03/cafe.jpg".to_string()),
        ocr_text: Some("CORNER CAFE\nTOTAL 12.50".to_string()),
        failure_reason: None,
        created_at,
        updated_at: created_at,
    }
}

/// Unsaved audit record
pub fn sample_receipt_edit() -> entities::receipt_edit::Model {
    entities::receipt_edit::Model {
        id: Uuid::new_v4(),
        receipt_id: Uuid::new_v4(),
        edited_by: Some(Uuid::new_v4()),
        field_name: "merchant".to_string(),
        old_value: Some("Corner Cafe".to_string()),
        new_value: Some("Bakery".to_string()),
        edited_at: Utc.with_ymd_and_hms(2024, 3, 16, 9, 0, 0).unwrap(),
    }
}

/// Sorted names of the fields that carry violations.
pub fn error_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(ToString::to_string)
        .collect();
    fields.sort();
    fields
}

/// Sorted top-level keys of a value's JSON form.
pub fn json_keys<T: Serialize>(value: &T) -> Vec<String> {
    let json = serde_json::to_value(value).unwrap();
    let mut keys: Vec<String> = json.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    keys
}

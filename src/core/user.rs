//! User business logic - account creation, plan changes and soft deactivation.
//!
//! Users are never hard deleted. Deactivated accounts keep their receipts but can
//! no longer capture new ones.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
    schemas::{UserCreate, UserPlanUpdate},
};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

/// Creates a user from a validated payload. The password hash is produced by the
/// authentication layer and stored as given.
#[instrument(skip(db, password_hash), fields(email = %input.email))]
pub async fn create_user(
    db: &DatabaseConnection,
    input: UserCreate,
    password_hash: String,
) -> Result<user::Model> {
    let now = chrono::Utc::now();
    let user = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(input.email),
        password_hash: Set(password_hash),
        display_name: Set(input.display_name),
        plan: Set(input.plan),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = user.insert(db).await?;
    info!(user_id = %created.id, plan = %created.plan, "user created");
    Ok(created)
}

/// Finds a user by id, returning None if it does not exist.
pub async fn get_user_by_id<C>(db: &C, user_id: Uuid) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

async fn require_user(db: &DatabaseConnection, user_id: Uuid) -> Result<user::Model> {
    get_user_by_id(db, user_id)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })
}

/// Applies a billing event. Setting the plan the user already has is a no-op.
#[instrument(skip(db))]
pub async fn change_plan(
    db: &DatabaseConnection,
    user_id: Uuid,
    update: UserPlanUpdate,
) -> Result<user::Model> {
    let current = require_user(db, user_id).await?;
    if current.plan == update.plan {
        return Ok(current);
    }

    let previous = current.plan;
    let mut active: user::ActiveModel = current.into();
    active.plan = Set(update.plan);
    active.updated_at = Set(chrono::Utc::now());
    let updated = active.update(db).await?;

    info!(%user_id, from = %previous, to = %updated.plan, "plan changed");
    Ok(updated)
}

/// Soft-disables a user. Receipts stay in place.
#[instrument(skip(db))]
pub async fn deactivate_user(db: &DatabaseConnection, user_id: Uuid) -> Result<user::Model> {
    let current = require_user(db, user_id).await?;
    if !current.is_active {
        return Ok(current);
    }

    let mut active: user::ActiveModel = current.into();
    active.is_active = Set(false);
    active.updated_at = Set(chrono::Utc::now());
    let updated = active.update(db).await?;

    info!(%user_id, "user deactivated");
    Ok(updated)
}

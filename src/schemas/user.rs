//! User request and response schemas.
//!
//! Credentials never travel through these shapes: the authentication layer hashes
//! passwords and hands the hash to `core::user::create_user` directly.

use super::fields::{self, FieldReader, Input};
use super::{ValidateInput, WireSchema};
use crate::entities::{user, SubscriptionPlan};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::ValidationErrors;

const EMAIL_MAX: u64 = 254;
const DISPLAY_NAME_MAX: u64 = 100;

/// Payload for registering a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCreate {
    pub email: String,
    pub display_name: String,
    /// Defaults to [`SubscriptionPlan::Free`] when absent
    pub plan: SubscriptionPlan,
}

impl WireSchema for UserCreate {
    const NAME: &'static str = "UserCreate";
    const FIELDS: &'static [&'static str] = &["email", "display_name", "plan"];
}

impl ValidateInput for UserCreate {
    fn validate(input: &Input) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(input, Self::FIELDS);
        let email = reader.required("email", |v| fields::email(v, EMAIL_MAX));
        let display_name = reader.required("display_name", |v| fields::text(v, DISPLAY_NAME_MAX));
        let plan = reader.optional("plan", fields::enumeration::<SubscriptionPlan>);

        match (email, display_name) {
            (Some(email), Some(display_name)) if reader.is_clean() => Ok(Self {
                email,
                display_name,
                plan: plan.unwrap_or(SubscriptionPlan::Free),
            }),
            _ => Err(reader.into_errors()),
        }
    }
}

/// Billing event changing a user's plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserPlanUpdate {
    pub plan: SubscriptionPlan,
}

impl WireSchema for UserPlanUpdate {
    const NAME: &'static str = "UserPlanUpdate";
    const FIELDS: &'static [&'static str] = &["plan"];
}

impl ValidateInput for UserPlanUpdate {
    fn validate(input: &Input) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(input, Self::FIELDS);
        let plan = reader.required("plan", fields::enumeration::<SubscriptionPlan>);
        match plan {
            Some(plan) if reader.is_clean() => Ok(Self { plan }),
            _ => Err(reader.into_errors()),
        }
    }
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub plan: SubscriptionPlan,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl WireSchema for UserResponse {
    const NAME: &'static str = "UserResponse";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "email",
        "display_name",
        "plan",
        "is_active",
        "created_at",
    ];
}

impl From<&user::Model> for UserResponse {
    fn from(model: &user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email.clone(),
            display_name: model.display_name.clone(),
            plan: model.plan,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

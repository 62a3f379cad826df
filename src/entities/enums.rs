//! Active enums shared by the entity definitions.
//!
//! Both enums are closed sets stored as lowercase strings. Parsing is exact: no
//! trimming and no case folding, so `"Pending"` is rejected just like `"bogus"`.

use crate::errors::{Error, Result};
use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Billing tier of a user
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    /// Default tier for new accounts
    #[sea_orm(string_value = "free")]
    Free,
    /// Entry paid tier
    #[sea_orm(string_value = "basic")]
    Basic,
    /// Full paid tier
    #[sea_orm(string_value = "premium")]
    Premium,
}

impl SubscriptionPlan {
    /// Wire and storage representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Premium => "premium",
        }
    }

    /// Whether this tier is billed
    #[must_use]
    pub const fn is_paid(self) -> bool {
        !matches!(self, Self::Free)
    }
}

/// Lifecycle state of a receipt
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    /// Captured, waiting for ingestion
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Ingestion in progress
    #[sea_orm(string_value = "processing")]
    Processing,
    /// Ingestion finished successfully
    #[sea_orm(string_value = "processed")]
    Processed,
    /// Ingestion failed; may be retried by the user
    #[sea_orm(string_value = "failed")]
    Failed,
}

/// Named events that move a receipt through its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptTransition {
    /// `pending -> processing`
    StartProcessing,
    /// `processing -> processed`
    Complete,
    /// `processing -> failed`
    Fail,
    /// `failed -> pending`, triggered by the user
    Retry,
}

impl ReceiptTransition {
    /// Status this event moves a receipt into
    #[must_use]
    pub const fn target(self) -> ReceiptStatus {
        match self {
            Self::StartProcessing => ReceiptStatus::Processing,
            Self::Complete => ReceiptStatus::Processed,
            Self::Fail => ReceiptStatus::Failed,
            Self::Retry => ReceiptStatus::Pending,
        }
    }

    /// Event name as accepted on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartProcessing => "start_processing",
            Self::Complete => "complete",
            Self::Fail => "fail",
            Self::Retry => "retry",
        }
    }
}

impl ReceiptStatus {
    /// Status every new receipt starts in
    pub const INITIAL: Self = Self::Pending;

    /// Wire and storage representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Processed => "processed",
            Self::Failed => "failed",
        }
    }

    /// Processed and failed receipts never move on without an explicit user action.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Processed | Self::Failed)
    }

    /// Whether `self -> target` is an edge of the lifecycle.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Processing)
                | (Self::Processing, Self::Processed | Self::Failed)
                | (Self::Failed, Self::Pending)
        )
    }

    /// Returns the new status, or [`Error::InvalidTransition`] when the edge does not exist.
    pub fn transition_to(self, target: Self) -> Result<Self> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(Error::InvalidTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
            })
        }
    }

    /// Applies a named event. The event must start from the status it is defined for.
    pub fn apply(self, transition: ReceiptTransition) -> Result<Self> {
        let target = transition.target();
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(Error::InvalidTransition {
                from: self.as_str().to_string(),
                to: transition.as_str().to_string(),
            })
        }
    }
}

fn parse_closed<T>(field: &'static str, value: &str) -> Result<T>
where
    T: ActiveEnum<Value = String> + Iterable,
{
    T::iter()
        .find(|candidate| candidate.to_value() == value)
        .ok_or_else(|| Error::InvalidEnumValue {
            field,
            value: value.to_string(),
            allowed: T::iter().map(|candidate| candidate.to_value()).collect(),
        })
}

impl FromStr for SubscriptionPlan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_closed("plan", s)
    }
}

impl FromStr for ReceiptStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_closed("status", s)
    }
}

impl FromStr for ReceiptTransition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        const ALL: [ReceiptTransition; 4] = [
            ReceiptTransition::StartProcessing,
            ReceiptTransition::Complete,
            ReceiptTransition::Fail,
            ReceiptTransition::Retry,
        ];
        ALL.into_iter()
            .find(|candidate| candidate.as_str() == s)
            .ok_or_else(|| Error::InvalidEnumValue {
                field: "transition",
                value: s.to_string(),
                allowed: ALL.iter().map(|t| t.as_str().to_string()).collect(),
            })
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

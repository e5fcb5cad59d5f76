//! Domain Layer
//!
//! Documents handled by the ledger API and the shared error type.
//! No storage or HTTP types appear here.

mod entity;
mod user;
mod action_type;
mod user_action;
mod category;

use chrono::{SecondsFormat, Utc};

pub use entity::{Document, DomainError, DomainResult};
pub use user::UserBalance;
pub use action_type::{ActionType, CreditType, Orientation};
pub use user_action::UserAction;
pub use category::UserCategory;

/// Current time as an ISO-8601 UTC string with millisecond precision
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Category creation, restricted deletion and config seeding
pub mod category;
/// Receipt capture, edits, lifecycle transitions and deletion
pub mod receipt;
/// Append-only audit trail of receipt changes
pub mod receipt_edit;
/// Account creation, plan changes and deactivation
pub mod user;

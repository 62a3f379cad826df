//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.
//!
//! The re-exports below are the flat entity namespace; table creation goes through
//! [`crate::registry::ENTITIES`], which must list every entity declared here.

pub mod category;
pub mod enums;
pub mod receipt;
pub mod receipt_edit;
pub mod user;

pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use enums::{ReceiptStatus, ReceiptTransition, SubscriptionPlan};
pub use receipt::{Column as ReceiptColumn, Entity as Receipt, Model as ReceiptModel};
pub use receipt_edit::{
    Column as ReceiptEditColumn, Entity as ReceiptEdit, Model as ReceiptEditModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};

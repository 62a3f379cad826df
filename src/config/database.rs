//! Database configuration module.
//!
//! Handles the database connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions listed in [`crate::registry::ENTITIES`]
//! with `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL.

use crate::errors::Result;
use crate::registry;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/receipt_keeper.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns
/// the default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates every registered table that does not exist yet, in registration order.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    for entity in registry::ENTITIES {
        let mut statement = (entity.create_table)(&schema);
        statement.if_not_exists();
        db.execute(builder.build(&statement)).await?;
        debug!(table = entity.table_name, "table ensured");
    }

    info!("Database tables ensured: {}", registry::entity_table_names().join(", "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Category, Receipt, ReceiptEdit, User};
    use sea_orm::{DbBackend, EntityTrait, QuerySelect, Statement};

    async fn table_names(db: &DatabaseConnection) -> Result<Vec<String>> {
        let rows = db
            .query_all(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            ))
            .await?;
        rows.iter()
            .map(|row| row.try_get::<String>("", "name").map_err(Into::into))
            .collect()
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        User::find().limit(1).all(&db).await?;
        Category::find().limit(1).all(&db).await?;
        Receipt::find().limit(1).all(&db).await?;
        ReceiptEdit::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_created_tables_match_registry() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let mut expected: Vec<String> = registry::entity_table_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        expected.sort();
        assert_eq!(table_names(&db).await?, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        assert_eq!(table_names(&db).await?.len(), registry::ENTITIES.len());
        Ok(())
    }
}

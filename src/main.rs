use receipt_keeper::{
    config::{categories, database},
    core::category::seed_categories,
    errors::Result,
    registry,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenvy::dotenv().ok();

    // 3. Load category seed configuration
    let config = categories::load_default_config()
        .inspect_err(|e| error!("Failed to load category configuration: {}", e))?;

    // 4. Connect and ensure every registered table exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Seed categories that are not stored yet
    seed_categories(&db, &config.categories)
        .await
        .inspect_err(|e| error!("Failed to seed categories: {}", e))?;

    info!(
        entities = %registry::entity_table_names().join(", "),
        schemas = %registry::schema_names().join(", "),
        "receipt keeper ready"
    );
    Ok(())
}

/// Database configuration and connection management
pub mod database;

/// Category seed loading from config.toml
pub mod categories;

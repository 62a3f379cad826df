//! Category seed loading from config.toml
//!
//! Categories are managed centrally: the `[[categories]]` entries of the
//! configuration file are inserted on startup when missing. Each entry is checked
//! with the same `CategoryCreate` schema that guards API input.

use crate::errors::{Error, Result};
use crate::schemas::{CategoryCreate, ValidateInput, fields::Input};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Categories to seed
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
}

/// One category entry of the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySeed {
    /// Display order, lowest first
    #[serde(default)]
    pub sort_order: i32,
    /// Every other key, validated as a `CategoryCreate`
    #[serde(flatten)]
    pub fields: Input,
}

impl CategorySeed {
    /// Validates the entry as a `CategoryCreate`.
    pub fn to_create(&self) -> Result<CategoryCreate> {
        CategoryCreate::validate(&self.fields).map_err(Into::into)
    }
}

/// Parses seed configuration from TOML text
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads seed configuration from `RECEIPT_KEEPER_CONFIG`, falling back to
/// `./config.toml`. A missing default file yields an empty configuration.
pub fn load_default_config() -> Result<Config> {
    match std::env::var("RECEIPT_KEEPER_CONFIG") {
        Ok(path) => load_config(path),
        Err(_) if !Path::new("config.toml").exists() => {
            tracing::warn!("config.toml not found, no categories will be seeded");
            Ok(Config::default())
        }
        Err(_) => load_config("config.toml"),
    }
}

//! Seed data loading from seed.toml
//!
//! The seed file describes the catalog to create on startup, a fixed list of
//! purchases to record, and which rows to delete afterwards. It replaces random
//! test-data generation with something reproducible.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{env::VarError, path::Path};

/// Path used when `SEED_CONFIG` is not set.
pub const DEFAULT_SEED_PATH: &str = "seed.toml";

/// Configuration structure representing the entire seed.toml file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedConfig {
    /// Customers to insert, in id order
    #[serde(default)]
    pub customers: Vec<CustomerSeed>,
    /// Products to insert, in id order
    #[serde(default)]
    pub products: Vec<ProductSeed>,
    /// Purchases to record once the catalog exists
    #[serde(default)]
    pub purchases: Vec<PurchaseSeed>,
    /// Deletions to attempt at the end of the run
    #[serde(default)]
    pub cleanup: CleanupPlan,
}

/// A customer row to seed
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerSeed {
    /// Customer name
    pub name: String,
}

/// A product row to seed
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSeed {
    /// Product title
    pub title: String,
    /// Unit price
    pub price: i32,
}

/// A purchase to record by id
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseSeed {
    /// Buyer
    pub customer_id: i64,
    /// Product bought
    pub product_id: i64,
    /// Units bought
    pub quantity: i32,
}

/// Ids to delete after reporting. Either list may be empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CleanupPlan {
    /// Products to try to delete; referenced ones are refused
    #[serde(default)]
    pub delete_products: Vec<i64>,
    /// Customers to delete together with their purchases
    #[serde(default)]
    pub delete_customers: Vec<i64>,
}

/// Parses seed configuration from a TOML string.
///
/// # Errors
/// Returns `Error::Config` if the TOML is invalid or a field has the wrong type.
pub fn parse_seed(contents: &str) -> Result<SeedConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed file: {e}"),
    })
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading seed data from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read seed file {}: {e}", path_ref.display()),
    })?;
    parse_seed(&contents)
}

/// Loads seed configuration from `SEED_CONFIG`, or ./seed.toml when unset.
///
/// # Errors
/// Returns `Error::EnvVar` if `SEED_CONFIG` is not valid unicode, otherwise the
/// errors of [`load_seed`].
pub fn load_default_seed() -> Result<SeedConfig> {
    let path = match std::env::var("SEED_CONFIG") {
        Ok(path) => path,
        Err(VarError::NotPresent) => DEFAULT_SEED_PATH.to_string(),
        Err(e) => return Err(e.into()),
    };
    load_seed(path)
}

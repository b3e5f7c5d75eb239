//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, which also emits the foreign keys declared on
//! the `belongs_to` relations, so `ON DELETE CASCADE` (customers) and
//! `ON DELETE NO ACTION` (products) are enforced by the schema itself.

use crate::entities::{Customer, Product, Purchase};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::env::VarError;
use tracing::{debug, info};

/// Connection string used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Gets the database URL from environment variable or returns the default.
///
/// The default is an in-memory `SQLite` database, so every run starts from an
/// empty store.
///
/// # Errors
/// Returns `Error::EnvVar` if `DATABASE_URL` is set but is not valid unicode.
pub fn get_database_url() -> Result<String> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Ok(url),
        Err(VarError::NotPresent) => Ok(DEFAULT_DATABASE_URL.to_string()),
        Err(e) => Err(e.into()),
    }
}

/// Establishes a connection to the database at `database_url`.
///
/// `SQLite` connections opened through sqlx enable `PRAGMA foreign_keys` by default,
/// which the cascade and restrict rules depend on.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to {}", database_url);
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the customers, products and purchases tables if they do not exist yet.
///
/// Parent tables are created before `purchases` so the foreign keys resolve.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut customer_table = schema.create_table_from_entity(Customer);
    let mut product_table = schema.create_table_from_entity(Product);
    let mut purchase_table = schema.create_table_from_entity(Purchase);
    customer_table.if_not_exists();
    product_table.if_not_exists();
    purchase_table.if_not_exists();

    db.execute(builder.build(&customer_table)).await?;
    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&purchase_table)).await?;

    info!("Database schema ready");
    Ok(())
}

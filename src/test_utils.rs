//! Shared test utilities for the purchase ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{customer, product},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::config::database::create_connection("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test customer with the given name.
pub async fn create_test_customer(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::customer::Model> {
    customer::create_customer(db, name).await
}

/// Creates a test product with the given title and price.
pub async fn create_test_product(
    db: &DatabaseConnection,
    title: &str,
    price: i32,
) -> Result<entities::product::Model> {
    product::create_product(db, title, price).await
}

/// Sets up a database holding customer "Ann" (id 1) and product "Milk" priced 45 (id 1).
/// Returns (db, customer, product) for purchase-related tests.
pub async fn setup_with_customer_and_product() -> Result<(
    DatabaseConnection,
    entities::customer::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let customer = create_test_customer(&db, "Ann").await?;
    let product = create_test_product(&db, "Milk", 45).await?;
    Ok((db, customer, product))
}

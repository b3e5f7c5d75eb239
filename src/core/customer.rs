//! Customer business logic - Handles all customer-related operations.
//!
//! Deleting a customer removes its purchases first, inside the same transaction,
//! and then the customer row. The schema's `ON DELETE CASCADE` would do the same;
//! doing it here lets the caller know how many purchases went away.

use crate::{
    entities::{Customer, Purchase, customer, purchase},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// Trims a customer name, rejecting blank ones.
pub(crate) fn normalize_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Customer name cannot be empty".to_string(),
        });
    }
    Ok(name)
}

/// Inserts a customer on any connection or open transaction.
///
/// `name` must already have passed `normalize_name`.
pub(crate) async fn insert_customer<C>(db: &C, name: &str) -> Result<customer::Model>
where
    C: ConnectionTrait,
{
    let customer = customer::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    let result = customer.insert(db).await?;
    info!("Created customer '{}' (ID: {})", result.name, result.id);
    Ok(result)
}

/// Loads a customer or fails with `Error::CustomerNotFound`.
pub(crate) async fn require_customer<C>(db: &C, customer_id: i64) -> Result<customer::Model>
where
    C: ConnectionTrait,
{
    Customer::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or(Error::CustomerNotFound { id: customer_id })
}

/// Creates a new customer and returns it with its assigned id.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The database insert operation fails
pub async fn create_customer(db: &DatabaseConnection, name: &str) -> Result<customer::Model> {
    let name = normalize_name(name)?;
    let txn = db.begin().await?;
    let customer = insert_customer(&txn, name).await?;
    txn.commit().await?;
    Ok(customer)
}

/// Finds a customer by its unique ID, returning None if it does not exist.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_customer_by_id(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Option<customer::Model>> {
    Customer::find_by_id(customer_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all customers ordered by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_customers(db: &DatabaseConnection) -> Result<Vec<customer::Model>> {
    let customers = Customer::find()
        .order_by_asc(customer::Column::Id)
        .all(db)
        .await?;
    debug!("Fetched {} customers", customers.len());
    Ok(customers)
}

/// Deletes a customer together with all of its purchases.
///
/// Returns the number of purchases that were removed along with the customer.
///
/// # Errors
/// Returns an error if:
/// - The customer does not exist (`Error::CustomerNotFound`); nothing is changed
/// - Any statement or the commit fails; the transaction is rolled back
pub async fn delete_customer(db: &DatabaseConnection, customer_id: i64) -> Result<u64> {
    let txn = db.begin().await?;

    let customer = require_customer(&txn, customer_id).await?;

    let removed = Purchase::delete_many()
        .filter(purchase::Column::CustomerId.eq(customer_id))
        .exec(&txn)
        .await?
        .rows_affected;

    customer.delete(&txn).await?;
    txn.commit().await?;

    info!(
        "Deleted customer_id {} and {} of its purchases",
        customer_id, removed
    );
    Ok(removed)
}

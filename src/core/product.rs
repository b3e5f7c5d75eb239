//! Product business logic - Handles all product-related operations.
//!
//! This module provides functions for creating, retrieving, repricing and deleting
//! products. A product that has been purchased at least once can never be deleted:
//! the purchase history would otherwise point at nothing. The check runs inside the
//! delete transaction, and the schema's `ON DELETE NO ACTION` foreign key backs it
//! up.

use crate::{
    entities::{Product, Purchase, product, purchase},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, warn};

/// Trims a product title, rejecting blank ones.
pub(crate) fn normalize_title(title: &str) -> Result<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::Validation {
            message: "Product title cannot be empty".to_string(),
        });
    }
    Ok(title)
}

/// Rejects negative prices.
pub(crate) fn validate_price(price: i32) -> Result<i32> {
    if price < 0 {
        return Err(Error::InvalidPrice { price });
    }
    Ok(price)
}

/// Inserts a product on any connection or open transaction.
///
/// `title` and `price` must already have passed `normalize_title` and
/// `validate_price`.
pub(crate) async fn insert_product<C>(db: &C, title: &str, price: i32) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let product = product::ActiveModel {
        title: Set(title.to_string()),
        price: Set(price),
        ..Default::default()
    };
    let result = product.insert(db).await?;
    info!(
        "Created product '{}' (ID: {}) with price {}",
        result.title, result.id, result.price
    );
    Ok(result)
}

/// Loads a product or fails with `Error::ProductNotFound`.
pub(crate) async fn require_product<C>(db: &C, product_id: i64) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })
}

/// Counts purchases that reference a product.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn count_purchases_for_product<C>(db: &C, product_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    Purchase::find()
        .filter(purchase::Column::ProductId.eq(product_id))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product and returns it with its assigned id.
///
/// # Errors
/// Returns an error if:
/// - The title is empty or whitespace-only
/// - The price is negative
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    title: &str,
    price: i32,
) -> Result<product::Model> {
    let title = normalize_title(title)?;
    let price = validate_price(price)?;

    let txn = db.begin().await?;
    let product = insert_product(&txn, title, price).await?;
    txn.commit().await?;
    Ok(product)
}

/// Retrieves a specific product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all products ordered by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    let products = Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;
    debug!("Fetched {} products", products.len());
    Ok(products)
}

/// Changes the catalog price of a product.
///
/// Purchases already recorded keep the price they were made at.
///
/// # Errors
/// Returns an error if:
/// - The price is negative
/// - The product does not exist
/// - The database update operation fails
pub async fn update_product_price(
    db: &DatabaseConnection,
    product_id: i64,
    new_price: i32,
) -> Result<product::Model> {
    validate_price(new_price)?;

    let txn = db.begin().await?;
    let mut product: product::ActiveModel = require_product(&txn, product_id).await?.into();
    product.price = Set(new_price);
    let updated = product.update(&txn).await?;
    txn.commit().await?;

    info!(
        "Updated price for product_id {}: new_price = {}",
        product_id, new_price
    );
    Ok(updated)
}

/// Deletes a product that nobody has purchased.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist (`Error::ProductNotFound`)
/// - Any purchase still references it (`Error::ProductInUse`); nothing is changed
/// - The store rejects the delete or the commit fails; the transaction is rolled back
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let product = require_product(&txn, product_id).await?;

    let purchases = count_purchases_for_product(&txn, product_id).await?;
    if purchases > 0 {
        warn!(
            "Refusing to delete product '{}' (ID: {}): {} purchase(s) reference it",
            product.title, product_id, purchases
        );
        return Err(Error::ProductInUse {
            product_id,
            purchases,
        });
    }

    product.delete(&txn).await?;
    txn.commit().await?;

    info!("Deleted product_id {}", product_id);
    Ok(())
}

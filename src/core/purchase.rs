//! Purchase business logic - Recording purchases and reading purchase history.
//!
//! History is always read through explicit queries keyed by customer or product,
//! never by walking relations on a loaded model, so every store access is visible
//! at the call site. Results come back ordered by purchase id.

use crate::{
    core::{customer::require_customer, product::require_product},
    entities::{Customer, Product, Purchase, customer, product, purchase},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::fmt;
use tracing::{debug, info};

/// A purchase together with the customer and product it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseDetails {
    /// The stored purchase row
    pub purchase: purchase::Model,
    /// Who bought it
    pub customer: customer::Model,
    /// What was bought, with its current catalog price
    pub product: product::Model,
}

impl PurchaseDetails {
    /// Total cost at the price the purchase was made at.
    #[must_use]
    pub fn total_cost(&self) -> i64 {
        self.purchase.total_cost()
    }
}

impl fmt::Display for PurchaseDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product: {} Price: {} Quantity: {} Total cost: {}",
            self.product.title,
            self.purchase.price,
            self.purchase.quantity,
            self.total_cost()
        )
    }
}

/// Records that a customer bought `quantity` units of a product.
///
/// The purchase stores the product's price as it is right now; later price
/// changes do not affect it.
///
/// # Errors
/// Returns an error if:
/// - `quantity` is zero or negative (`Error::InvalidQuantity`)
/// - The customer or the product does not exist; no purchase is stored
/// - The database insert or commit fails
pub async fn record_purchase(
    db: &DatabaseConnection,
    customer_id: i64,
    product_id: i64,
    quantity: i32,
) -> Result<purchase::Model> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let txn = db.begin().await?;

    let customer = require_customer(&txn, customer_id).await?;
    let product = require_product(&txn, product_id).await?;

    let purchase = purchase::ActiveModel {
        quantity: Set(quantity),
        price: Set(product.price),
        customer_id: Set(customer.id),
        product_id: Set(product.id),
        ..Default::default()
    };
    let result = purchase.insert(&txn).await?;

    txn.commit().await?;

    info!(
        "Recorded purchase_id {}: customer '{}' bought {} x '{}' at {}",
        result.id, customer.name, quantity, product.title, result.price
    );
    Ok(result)
}

/// Lists every purchase made by a customer.
///
/// A customer without purchases yields an empty list.
///
/// # Errors
/// Returns `Error::CustomerNotFound` if the customer does not exist, or an error
/// if the database query fails.
pub async fn list_purchases_by_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Vec<PurchaseDetails>> {
    let txn = db.begin().await?;

    let customer = require_customer(&txn, customer_id).await?;
    let rows = Purchase::find()
        .filter(purchase::Column::CustomerId.eq(customer_id))
        .order_by_asc(purchase::Column::Id)
        .find_also_related(Product)
        .all(&txn)
        .await?;

    txn.commit().await?;

    let details = rows
        .into_iter()
        .map(|(purchase, product)| -> Result<PurchaseDetails> {
            let product = product.ok_or(Error::ProductNotFound {
                id: purchase.product_id,
            })?;
            Ok(PurchaseDetails {
                purchase,
                customer: customer.clone(),
                product,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Fetched {} purchases for customer_id {}",
        details.len(),
        customer_id
    );
    Ok(details)
}

/// Lists every purchase of a product, one entry per buyer and purchase.
///
/// A product nobody has bought yields an empty list.
///
/// # Errors
/// Returns `Error::ProductNotFound` if the product does not exist, or an error
/// if the database query fails.
pub async fn list_purchases_by_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<PurchaseDetails>> {
    let txn = db.begin().await?;

    let product = require_product(&txn, product_id).await?;
    let rows = Purchase::find()
        .filter(purchase::Column::ProductId.eq(product_id))
        .order_by_asc(purchase::Column::Id)
        .find_also_related(Customer)
        .all(&txn)
        .await?;

    txn.commit().await?;

    let details = rows
        .into_iter()
        .map(|(purchase, customer)| -> Result<PurchaseDetails> {
            let customer = customer.ok_or(Error::CustomerNotFound {
                id: purchase.customer_id,
            })?;
            Ok(PurchaseDetails {
                purchase,
                customer,
                product: product.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Fetched {} purchases for product_id {}",
        details.len(),
        product_id
    );
    Ok(details)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::product::update_product_price;
    use crate::errors::ErrorKind;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_record_purchase_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = record_purchase(&db, 1, 1, 0).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidQuantity { quantity: 0 }
        ));

        let result = record_purchase(&db, 1, 1, -3).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidQuantity { quantity: -3 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_record_purchase_snapshots_price() -> Result<()> {
        let (db, ann, milk) = setup_with_customer_and_product().await?;
        assert_eq!((ann.id, milk.id), (1, 1));

        let purchase = record_purchase(&db, 1, 1, 3).await?;
        assert_eq!(purchase.quantity, 3);
        assert_eq!(purchase.price, 45);
        assert_eq!(purchase.total_cost(), 135);
        assert_eq!(purchase.customer_id, ann.id);
        assert_eq!(purchase.product_id, milk.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_price_change_does_not_rewrite_history() -> Result<()> {
        let (db, ann, milk) = setup_with_customer_and_product().await?;
        record_purchase(&db, ann.id, milk.id, 2).await?;

        update_product_price(&db, milk.id, 60).await?;
        let later = record_purchase(&db, ann.id, milk.id, 1).await?;
        assert_eq!(later.price, 60);

        let history = list_purchases_by_customer(&db, ann.id).await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].purchase.price, 45);
        assert_eq!(history[0].total_cost(), 90);
        assert_eq!(history[0].product.price, 60);
        assert_eq!(history[1].purchase.price, 60);

        Ok(())
    }

    #[tokio::test]
    async fn test_record_purchase_missing_customer() -> Result<()> {
        let (db, _ann, milk) = setup_with_customer_and_product().await?;

        let err = record_purchase(&db, 999, milk.id, 1).await.unwrap_err();
        assert!(matches!(err, Error::CustomerNotFound { id: 999 }));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        assert!(Purchase::find().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_record_purchase_missing_product() -> Result<()> {
        let (db, ann, _milk) = setup_with_customer_and_product().await?;

        let err = record_purchase(&db, ann.id, 42, 1).await.unwrap_err();
        assert!(matches!(err, Error::ProductNotFound { id: 42 }));

        assert!(Purchase::find().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_purchases_by_customer() -> Result<()> {
        let (db, ann, milk) = setup_with_customer_and_product().await?;
        let bread = create_test_product(&db, "Bread", 30).await?;
        let bob = create_test_customer(&db, "Bob").await?;

        assert!(list_purchases_by_customer(&db, ann.id).await?.is_empty());

        record_purchase(&db, ann.id, bread.id, 2).await?;
        record_purchase(&db, bob.id, milk.id, 1).await?;
        record_purchase(&db, ann.id, milk.id, 3).await?;

        let history = list_purchases_by_customer(&db, ann.id).await?;
        assert_eq!(history.len(), 2);
        assert!(history[0].purchase.id < history[1].purchase.id);
        assert_eq!(history[0].product, bread);
        assert_eq!(history[1].product, milk);
        assert!(history.iter().all(|d| d.customer == ann));

        let err = list_purchases_by_customer(&db, 999).await.unwrap_err();
        assert!(matches!(err, Error::CustomerNotFound { id: 999 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_purchases_by_product() -> Result<()> {
        let (db, ann, milk) = setup_with_customer_and_product().await?;
        let bob = create_test_customer(&db, "Bob").await?;

        assert!(list_purchases_by_product(&db, milk.id).await?.is_empty());

        record_purchase(&db, bob.id, milk.id, 1).await?;
        record_purchase(&db, ann.id, milk.id, 4).await?;

        let buyers: Vec<String> = list_purchases_by_product(&db, milk.id)
            .await?
            .into_iter()
            .map(|d| d.customer.name)
            .collect();
        assert_eq!(buyers, vec!["Bob".to_string(), "Ann".to_string()]);

        let err = list_purchases_by_product(&db, 999).await.unwrap_err();
        assert!(matches!(err, Error::ProductNotFound { id: 999 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_details_display() -> Result<()> {
        let (db, ann, milk) = setup_with_customer_and_product().await?;
        record_purchase(&db, ann.id, milk.id, 3).await?;

        let history = list_purchases_by_customer(&db, ann.id).await?;
        assert_eq!(
            history[0].to_string(),
            "Product: Milk Price: 45 Quantity: 3 Total cost: 135"
        );
        Ok(())
    }
}

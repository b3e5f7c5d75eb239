//! Catalog seeding.
//!
//! All customers and products from the seed file are inserted in a single
//! transaction, so a bad row leaves the store exactly as it was.

use crate::{
    config::seed::{CustomerSeed, ProductSeed},
    core::{
        customer::{insert_customer, normalize_name},
        product::{insert_product, normalize_title, validate_price},
    },
    entities::{customer, product},
    errors::Result,
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

/// Rows created by [`seed_catalog`], in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Persisted customers
    pub customers: Vec<customer::Model>,
    /// Persisted products
    pub products: Vec<product::Model>,
}

/// Inserts every customer and product as one unit of work.
///
/// All rows are validated before the transaction is opened.
///
/// # Errors
/// Returns an error if any row fails validation or insertion; nothing is committed.
pub async fn seed_catalog(
    db: &DatabaseConnection,
    customers: &[CustomerSeed],
    products: &[ProductSeed],
) -> Result<Catalog> {
    let names = customers
        .iter()
        .map(|seed| normalize_name(&seed.name))
        .collect::<Result<Vec<_>>>()?;
    let mut rows = Vec::with_capacity(products.len());
    for seed in products {
        rows.push((normalize_title(&seed.title)?, validate_price(seed.price)?));
    }

    let txn = db.begin().await?;

    let mut catalog = Catalog::default();
    for name in names {
        catalog.customers.push(insert_customer(&txn, name).await?);
    }
    for (title, price) in rows {
        catalog
            .products
            .push(insert_product(&txn, title, price).await?);
    }

    txn.commit().await?;

    info!(
        "Seeded {} customers and {} products",
        catalog.customers.len(),
        catalog.products.len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{customer::list_customers, product::list_products};
    use crate::errors::{Error, ErrorKind};
    use crate::test_utils::setup_test_db;

    fn customer_seed(name: &str) -> CustomerSeed {
        CustomerSeed {
            name: name.to_string(),
        }
    }

    fn product_seed(title: &str, price: i32) -> ProductSeed {
        ProductSeed {
            title: title.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_seed_catalog_assigns_sequential_ids() -> Result<()> {
        let db = setup_test_db().await?;

        let catalog = seed_catalog(
            &db,
            &[customer_seed("Ann"), customer_seed("Bob")],
            &[product_seed("Milk", 45), product_seed("Bread", 30)],
        )
        .await?;

        let customer_ids: Vec<i64> = catalog.customers.iter().map(|c| c.id).collect();
        let product_ids: Vec<i64> = catalog.products.iter().map(|p| p.id).collect();
        assert_eq!(customer_ids, vec![1, 2]);
        assert_eq!(product_ids, vec![1, 2]);
        assert_eq!(catalog.products[1].title, "Bread");

        assert_eq!(list_customers(&db).await?, catalog.customers);
        assert_eq!(list_products(&db).await?, catalog.products);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalog_trims_names_and_titles() -> Result<()> {
        let db = setup_test_db().await?;

        let catalog = seed_catalog(
            &db,
            &[customer_seed("  Ann ")],
            &[product_seed(" Milk", 45)],
        )
        .await?;

        assert_eq!(catalog.customers[0].name, "Ann");
        assert_eq!(catalog.products[0].title, "Milk");
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalog_rejects_blank_customer() -> Result<()> {
        let db = setup_test_db().await?;

        let err = seed_catalog(&db, &[customer_seed("Ann"), customer_seed("   ")], &[])
            .await
            .err();
        assert!(matches!(err, Some(Error::Validation { .. })));

        assert!(list_customers(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalog_is_all_or_nothing() -> Result<()> {
        let db = setup_test_db().await?;

        let err = seed_catalog(
            &db,
            &[customer_seed("Ann")],
            &[product_seed("Milk", 45), product_seed("Broken", -1)],
        )
        .await
        .err();
        assert_eq!(err.map(|e| e.kind()), Some(ErrorKind::InvalidInput));

        assert!(list_customers(&db).await?.is_empty());
        assert!(list_products(&db).await?.is_empty());
        Ok(())
    }
}

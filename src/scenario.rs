//! Demonstration run over a freshly created store.
//!
//! Seeds the catalog, records the configured purchases, reports purchase history,
//! then attempts the configured deletions and reports again. Apart from seeding,
//! every step is independent: a failure is logged, counted, and the run moves on
//! to the next item.

use crate::{
    config::seed::SeedConfig,
    core::{
        catalog::seed_catalog,
        customer::delete_customer,
        product::delete_product,
        purchase::{list_purchases_by_customer, list_purchases_by_product, record_purchase},
    },
    entities::{customer, product},
    errors::{ErrorKind, Result},
};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

/// Outcome of [`run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioSummary {
    /// Purchases stored successfully
    pub purchases_recorded: usize,
    /// Products that were deleted
    pub products_deleted: Vec<i64>,
    /// Products whose deletion was refused because they have purchases
    pub products_kept: Vec<i64>,
    /// Customers that were deleted
    pub customers_deleted: Vec<i64>,
    /// Purchases removed together with deleted customers
    pub purchases_removed: u64,
    /// Operations that returned an error of any kind
    pub failures: usize,
}

/// Runs the whole demonstration against `db`.
///
/// # Errors
/// Returns an error only if seeding the catalog fails; later failures are
/// recorded in the returned summary.
pub async fn run(db: &DatabaseConnection, seed: &SeedConfig) -> Result<ScenarioSummary> {
    let catalog = seed_catalog(db, &seed.customers, &seed.products).await?;
    let mut summary = ScenarioSummary::default();

    info!("====== Making some purchases ======");
    for purchase in &seed.purchases {
        match record_purchase(
            db,
            purchase.customer_id,
            purchase.product_id,
            purchase.quantity,
        )
        .await
        {
            Ok(_) => summary.purchases_recorded += 1,
            Err(e) => {
                summary.failures += 1;
                warn!(
                    "Could not record purchase of product {} by customer {}: {}",
                    purchase.product_id, purchase.customer_id, e
                );
            }
        }
    }

    info!("====== Listing purchases of every customer ======");
    report_customer_purchases(db, &catalog.customers, &mut summary).await;

    info!("====== Listing customers of every product ======");
    report_product_buyers(db, &catalog.products, &mut summary).await;

    info!("====== Removing products ======");
    for &product_id in &seed.cleanup.delete_products {
        match delete_product(db, product_id).await {
            Ok(()) => summary.products_deleted.push(product_id),
            Err(e) => {
                summary.failures += 1;
                if e.kind() == ErrorKind::ReferentialIntegrityViolation {
                    summary.products_kept.push(product_id);
                }
                warn!("Could not remove product with id {}: {}", product_id, e);
            }
        }
    }

    info!("====== Removing customers ======");
    for &customer_id in &seed.cleanup.delete_customers {
        match delete_customer(db, customer_id).await {
            Ok(removed) => {
                summary.customers_deleted.push(customer_id);
                summary.purchases_removed += removed;
            }
            Err(e) => {
                summary.failures += 1;
                warn!("Could not remove customer with id {}: {}", customer_id, e);
            }
        }
    }

    info!("====== Listing purchases again ======");
    report_customer_purchases(db, &catalog.customers, &mut summary).await;

    Ok(summary)
}

async fn report_customer_purchases(
    db: &DatabaseConnection,
    customers: &[customer::Model],
    summary: &mut ScenarioSummary,
) {
    for customer in customers {
        match list_purchases_by_customer(db, customer.id).await {
            Ok(purchases) if purchases.is_empty() => {
                info!("Customer {} hasn't made any purchase yet", customer.name);
            }
            Ok(purchases) => {
                info!("Products bought by {}:", customer.name);
                for details in &purchases {
                    info!("  {}", details);
                }
            }
            Err(e) => {
                summary.failures += 1;
                warn!("Customer with id {} is unavailable: {}", customer.id, e);
            }
        }
    }
}

async fn report_product_buyers(
    db: &DatabaseConnection,
    products: &[product::Model],
    summary: &mut ScenarioSummary,
) {
    for product in products {
        match list_purchases_by_product(db, product.id).await {
            Ok(purchases) if purchases.is_empty() => {
                info!("Nobody has bought {} yet", product.title);
            }
            Ok(purchases) => {
                info!("Customers who bought {}:", product.title);
                for details in &purchases {
                    info!("  {} (x{})", details.customer.name, details.purchase.quantity);
                }
            }
            Err(e) => {
                summary.failures += 1;
                warn!("Product with id {} is unavailable: {}", product.id, e);
            }
        }
    }
}

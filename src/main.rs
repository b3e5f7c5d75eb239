use dotenvy::dotenv;
use purchase_ledger::{
    config::{database, seed},
    errors::Result,
    scenario,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can be set externally too
    if dotenv().is_err() {
        info!("No .env file loaded");
    }

    // 3. Open the store and make sure the schema exists
    let database_url = database::get_database_url()?;
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to {}: {}", database_url, e))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 4. Load the seed data and run the demonstration
    let seed = seed::load_default_seed()
        .inspect_err(|e| error!("Failed to load seed data: {}", e))?;
    let summary = scenario::run(&db, &seed)
        .await
        .inspect_err(|e| error!("Failed to seed the catalog: {}", e))?;

    info!(
        "Done: {} purchases recorded, products deleted {:?}, products kept {:?}, customers deleted {:?} ({} purchases removed)",
        summary.purchases_recorded,
        summary.products_deleted,
        summary.products_kept,
        summary.customers_deleted,
        summary.purchases_removed
    );
    if summary.failures > 0 {
        warn!("{} operations failed along the way", summary.failures);
    }

    db.close().await?;
    Ok(())
}

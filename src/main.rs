use brewpos::{config, errors::Result};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Connect to the store (DATABASE_URL, with a local SQLite fallback)
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;

    // 4. Ensure the schema exists
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database schema ready."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed the initial catalog (only if the store is empty)
    let catalog = config::catalog::load_default_config()
        .inspect_err(|e| error!("Failed to load catalog configuration: {}", e))?;
    let seeded = config::catalog::seed_initial_products(&db, &catalog)
        .await
        .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;
    if seeded > 0 {
        info!(count = seeded, "Seeded initial catalog.");
    }

    info!("POS store initialized and ready.");
    Ok(())
}

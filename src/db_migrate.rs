use availabilities_core::config::AvailabilityConfig;
use availabilities_db::{
    config::DbConfig,
    create_pool,
    schema::{initialize_database, seed_initial_availability},
};
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let db_config = DbConfig::from_env()?;
    let availability_config = AvailabilityConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(db_config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Connecting to database...");
    let db_pool = create_pool(&db_config.database_url, db_config.max_connections).await?;

    initialize_database(&db_pool).await?;

    if !seed_initial_availability(&db_pool, &availability_config).await? {
        info!("Availability already present, nothing to seed.");
    }

    Ok(())
}

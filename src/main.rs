//! LevelUp backend
//!
//! Main application entry point: migrates and checks the database, wires
//! the service layer, and reports catalog and roster statistics.

use anyhow::Context;
use tracing::info;

use levelup::{
    config::Settings,
    utils::logging,
    database::{DatabaseService, DatabaseConfig, create_pool, run_migrations, health_check},
    services::ServiceFactory,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load settings")?;
    settings.validate()?;

    // Initialize logging; the guard keeps the file writer flushing until exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", levelup::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&DatabaseConfig::from(&settings.database))
        .await
        .context("failed to connect to database")?;

    run_migrations(&db_pool).await?;
    health_check(&db_pool).await?;

    let database_service = DatabaseService::new(db_pool);
    let _services = ServiceFactory::new(&settings, &database_service);

    let stats = database_service.get_stats().await?;
    info!(
        gamers = stats.gamers,
        games = stats.games,
        events = stats.events,
        max_description_length = settings.roster.max_description_length,
        "Event roster ready"
    );

    database_service.pool().close().await;
    info!("{} has been shut down.", levelup::NAME);

    Ok(())
}

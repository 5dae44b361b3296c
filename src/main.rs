//! Bootstrap binary: loads configuration, connects to PostgreSQL and
//! applies pending migrations. The engine itself is consumed as a
//! library by the host CRM service.

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use dealcompass::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        "connected to database"
    );

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("migrations applied");
    }

    if !config.ai.has_provider() {
        tracing::warn!("no AI provider configured; detection will run rules-only");
    }

    Ok(())
}

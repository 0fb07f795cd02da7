use anyhow::Result;
use paris_bike_routes::{config, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("paris_bike_routes=info".parse()?),
        )
        .init();

    info!("Starting Paris bike routes server");

    let config = config::Config::from_env()?;
    server::serve(config).await
}

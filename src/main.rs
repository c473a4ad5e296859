use std::time::Duration;

use anyhow::{Context, Result};
use byob_meetings::{create_router, AppState, Config};
use tracing::info;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = Config::load().context("configuration (is MONGODB_URI set?)")?;

    info!("BYOB Meetings v0.1.0");

    let client = tokio::time::timeout(
        CONNECT_TIMEOUT,
        mongodb::Client::with_uri_str(&cfg.mongodb_uri),
    )
    .await
    .context("mongodb timeout")?
    .context("mongodb")?;

    let Some(database) = client.default_database() else {
        anyhow::bail!("connection string names no default database")
    };

    // Fail before binding the listener if the store is unreachable
    tokio::time::timeout(
        CONNECT_TIMEOUT,
        database.run_command(bson::doc! { "ping": 1 }, None),
    )
    .await
    .context("mongodb ping timeout")?
    .context("mongodb ping")?;

    info!("Connected to MongoDB database: {}", database.name());

    let state = AppState::new(&database);
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.bind, cfg.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await.context("http server")?;

    Ok(())
}

use activities_api::{
    adapters::outbound::sqlite::{self, SqliteActivityStore},
    config::read_config,
    domain::seed::{default_catalog, seed_if_empty},
    router, telemetry, AppState,
};
use anyhow::Context;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = read_config().context("Failed to read configuration")?;
    tracing::debug!(?config, "Configuration loaded");

    let db_pool = sqlite::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    sqlite::migrate(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    let catalog = default_catalog()?;
    let outcome = seed_if_empty(&SqliteActivityStore::new(db_pool.clone()), &catalog)
        .await
        .context("Failed to seed activities")?;
    tracing::info!(?outcome, "Activity catalog ready");

    let app_state = AppState::new(db_pool);
    let app = router::create(app_state.clone(), &config.application);

    let addr = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    app_state.shutdown().await;
    tracing::info!("Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!("Failed to listen for SIGTERM: {}", err),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

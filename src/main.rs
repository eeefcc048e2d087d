use std::sync::Arc;

use streaming_catalog::{
    api::{create_router, AppState},
    config::Config,
    db::{create_pool, PgTitleStore, TitleStore},
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("streaming_catalog=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to PostgreSQL when configured; any failure leaves the service running without a store
async fn connect_store(config: &Config) -> Option<Arc<dyn TitleStore>> {
    if !config.has_database_url() {
        tracing::warn!("DATABASE_URL not set, running without a database");
        return None;
    }
    let database_url = config.database_url.as_deref().unwrap_or_default();

    let pool = match create_pool(database_url, config.database_name.as_deref()).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            return None;
        }
    };

    match PgTitleStore::open(pool).await {
        Ok(store) => {
            tracing::info!("Database connection established");
            let store: Arc<dyn TitleStore> = Arc::new(store);
            Some(store)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to prepare title collection");
            None
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
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

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    let store = connect_store(&config).await;
    let address = config.bind_address();

    let state = AppState::new(config, store.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(store) = store {
        store.close().await;
    }

    Ok(())
}

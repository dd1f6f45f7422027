use itaudit_control::config::ControlConfig;
use itaudit_control::state::AppState;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(%e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ControlConfig::from_env();
    tracing::info!(database_url = %config.database_url, "opening audit database");
    if !config.require_session {
        tracing::warn!("session gate disabled; /api/db is open to anyone who can reach it");
    }

    let db = itaudit_control::init_db_and_migrate(&config).await?;
    let addr = config.listen_addr;
    let app = itaudit_control::app(AppState::new(db, config));

    tracing::info!(%addr, "itaudit-control HTTP listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

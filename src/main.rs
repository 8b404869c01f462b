use tokio::net::TcpListener;

use folio::config::Config;
use folio::errors::WikiError;
use folio::handlers;
use folio::logger::Logger;
use folio::types::AppState;

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if Logger::init().is_err() {
        eprintln!("logger already initialized");
    }

    let config = Config::from_env();
    if !config.pages_dir.exists() {
        log::info!("Creating page directory {:?}", config.pages_dir);
        std::fs::create_dir_all(&config.pages_dir)?;
    }

    let addr = config.socket_addr()?;
    let state = AppState::new(config);
    let app = handlers::router(state);

    let listener = TcpListener::bind(addr).await?;
    log::info!("Wiki listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(WikiError::from)?;

    log::info!("Wiki shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
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
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("Received Ctrl+C, shutting down"),
        _ = terminate => log::info!("Received SIGTERM, shutting down"),
    }
}

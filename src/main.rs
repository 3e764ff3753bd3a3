use dotenvy::dotenv;
use tokio::signal;

use classbook::bootstrap::ensure_bootstrap_teacher;
use classbook::logging::init_tracing;
use classbook::metrics::init_metrics;
use classbook::router::init_router;
use classbook::state::AppState;
use classbook_config::{BootstrapConfig, CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use classbook_db::{init_db_pool, run_migrations};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let _guard = match init_tracing() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run().await {
        tracing::error!(error = ?e, "Server stopped with an error");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let server = ServerConfig::from_env();

    let Some(database) = DatabaseConfig::from_env() else {
        anyhow::bail!("DATABASE_URL must be set");
    };

    let db = init_db_pool(&database).await?;
    run_migrations(&db).await?;

    ensure_bootstrap_teacher(&db, &BootstrapConfig::from_env()).await;

    let metrics = if server.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    let state = AppState::new(db, JwtConfig::from_env(), CorsConfig::from_env()).with_metrics(metrics);
    let app = init_router(state);

    let address = server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(address = %address, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui", address);
    tracing::info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
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

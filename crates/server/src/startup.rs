use axum::Router;
use configs::AppConfig;
use service::{auth::domain::Credentials, runtime};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the stores under `cfg.storage.data_dir` (seeding absent documents)
/// and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    runtime::ensure_env(&cfg.storage.frontend_dir, &cfg.storage.data_dir).await?;
    let stores = runtime::open_stores(&cfg.storage.data_dir).await?;
    let credentials = Credentials {
        username: cfg.admin.username.clone(),
        password: cfg.admin.password.clone(),
    };
    let state = auth::ServerState::new(stores, credentials);
    Ok(routes::build_router(state, build_cors(), &cfg.storage.frontend_dir))
}

/// Public entry: load configuration and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate()?;
    run_with(cfg).await
}

/// Serve until Ctrl+C.
pub async fn run_with(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, data_dir = %cfg.storage.data_dir.display(), "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server drained");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl_c listener unavailable");
        std::future::pending::<()>().await;
    }
}

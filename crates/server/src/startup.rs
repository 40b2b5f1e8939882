use std::{env, net::SocketAddr};

use anyhow::Context;
use axum::Router;
use common::env::{ensure_env, sqlite_data_dir};
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, CompanySeed};
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use service::errors::ServiceError;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` (or `CONFIG_PATH`) first; without one, fall back to
/// `SERVER_HOST`, `SERVER_PORT` and `DATABASE_URL`.
pub fn load_config() -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config file unusable; falling back to environment");
            config_from_env()
        }
    }
}

fn config_from_env() -> anyhow::Result<AppConfig> {
    let mut cfg = AppConfig::default();
    if let Ok(host) = env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    cfg.database.url = models::db::DATABASE_URL.clone();
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let raw = format!("{}:{}", cfg.server.host, cfg.server.port);
    raw.parse().with_context(|| format!("invalid bind address {raw}"))
}

/// Insert the configured company record unless one is already stored.
async fn seed_company(state: &AppState, seed: CompanySeed) -> anyhow::Result<()> {
    match state.company.seed(seed.into()).await {
        Ok(created) => {
            info!(id = created.id, "company info seeded from config");
            Ok(())
        }
        Err(ServiceError::Conflict(_)) => {
            info!("company info already present; config seed skipped");
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("company seed in config rejected: {e}")),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown signal received; draining connections");
}

/// Public entry: build the app and run the HTTP server until a shutdown
/// signal arrives.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;
    ensure_env(&cfg.server.frontend_dir, sqlite_data_dir(&cfg.database.url).as_deref()).await?;

    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg).await?;
    if cfg.database.auto_migrate {
        Migrator::up(&db, None).await.context("applying migrations")?;
        info!("database migrations applied");
    }

    let state = AppState::new(db);
    if let Some(seed) = cfg.company.clone() {
        seed_company(&state, seed).await?;
    }

    let app: Router = routes::build_router(state, build_cors(), &cfg.server.frontend_dir);

    let addr = bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

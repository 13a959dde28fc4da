//! HTTP-адаптер (axum): только перевод запросов в команды и снапшотов в JSON.
//! Решений о ходе игры здесь нет.

pub mod handlers;
pub mod routes;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, EngineConfig};
use crate::engine::session_manager::SessionManager;
use crate::infra::persistence::{InMemorySessionStore, SessionStore};
use crate::infra::rng::DeterministicRng;

pub use handlers::{AppState, SharedState};
pub use routes::create_router;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid listen address: {0}")]
    Address(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Подключить `tracing-subscriber`. `RUST_LOG` важнее `default_filter`.
/// Повторный вызов ничего не делает.
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .try_init();
}

/// Менеджер сессий по конфигу.
///
/// С мастер-seed каждая сессия получает RNG из `seed.derive(id, rounds_played)`,
/// без него из энтропии ОС.
pub fn build_manager(
    config: &EngineConfig,
    store: Arc<dyn SessionStore>,
) -> Result<SessionManager<DeterministicRng>, ConfigError> {
    let rules = config.rules.clone();
    let manager = match config.master_seed()? {
        Some(seed) => SessionManager::new(rules, store, move |id: &str, nonce: u64| {
            seed.derive(id, nonce).to_rng()
        }),
        None => SessionManager::new(rules, store, |_: &str, _: u64| {
            DeterministicRng::from_entropy()
        }),
    };
    Ok(manager)
}

/// Собрать приложение с CORS и трассировкой запросов.
pub fn build_app(manager: SessionManager<DeterministicRng>) -> Router {
    let state = Arc::new(AppState { manager });

    create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Запустить сервер и ждать Ctrl+C / SIGTERM.
pub async fn run(config: EngineConfig) -> Result<(), ServerError> {
    config.validate()?;

    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let manager = build_manager(&config, store)?;
    let app = build_app(manager);

    let ip: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|_| ServerError::Address(config.server.host.clone()))?;
    let addr = SocketAddr::from((ip, config.server.port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, seeded = config.rng.master_seed.is_some(), "casino server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("casino server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received terminate signal"),
    }
}

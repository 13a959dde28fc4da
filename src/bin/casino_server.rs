// src/bin/casino_server.rs

use std::path::PathBuf;
use std::process::ExitCode;

use casino_engine::config::EngineConfig;
use casino_engine::server::{init_tracing, run};
use clap::Parser;
use tracing::error;

/// HTTP-сервер казино.
#[derive(Debug, Parser)]
#[command(name = "casino_server", version, about = "Casino game-round engine HTTP server")]
struct Args {
    /// Путь к TOML-конфигу. Без него берутся значения по умолчанию.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Адрес, перекрывает server.host.
    #[arg(long)]
    host: Option<String>,

    /// Порт, перекрывает server.port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Мастер-seed (64 hex), перекрывает rng.master_seed.
    #[arg(long)]
    seed: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing("casino_engine=debug,tower_http=info");

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match EngineConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load config");
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(seed) = args.seed {
        config.rng.master_seed = Some(seed);
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

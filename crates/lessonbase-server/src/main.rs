//! Lessonbase server binary.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use lessonbase_core::search::SearchConfig;
use lessonbase_core::{ContentStore, EnvOverrides};
use lessonbase_server::{create_router, AppState};
use tracing_subscriber::EnvFilter;

/// Read-only content API for learning modules and the glossary.
#[derive(Parser, Debug)]
#[command(name = "lessonbase-server", version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Address to bind
    #[arg(long, env = "LESSONBASE_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// SQLite database file
    #[arg(long, env = "LESSONBASE_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Base directory for the database and config.toml
    #[arg(long, env = "LESSONBASE_ROOT")]
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let store = ContentStore::initialize(EnvOverrides {
        base_root: args.root,
        db_path: args.db_path,
    })?;
    let env = store.env_info();
    let search_config = SearchConfig::load_in(&env.base_root)?;
    log::info!("[Server] Using database {}", env.db_path.display());

    let app = create_router(AppState::new(store, search_config));

    let addr = SocketAddr::new(args.host, args.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("[Server] Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("[Server] Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    log::info!("[Server] Shutdown complete");
    Ok(())
}

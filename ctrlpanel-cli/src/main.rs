//! Control panel terminal.
//!
//! Runs the command interpreter against an on-disk store, either as an
//! interactive session or for a single command.
//!
//! Usage:
//!   ctrlpanel --db ctrlpanel.db
//!   ctrlpanel -c "status"

use anyhow::{Context, Result};
use clap::Parser;
use ctrlpanel_cli::{render, run_repl};
use ctrlpanel_command::{CommandInterpreter, Console, InterpreterConfig};
use ctrlpanel_storage::{GatewayConfig, PersistenceGateway, SqliteBackend};
use ctrlpanel_store::{EntityStore, SharedStore, StoreCapabilities, StoreConfig};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "ctrlpanel")]
#[command(about = "Control panel terminal")]
struct Args {
    /// SQLite database holding the panel state
    #[arg(long, default_value = "ctrlpanel.db")]
    db: PathBuf,

    /// Platform name reported by `status` and summaries
    #[arg(long)]
    platform: Option<String>,

    /// Run one command and exit
    #[arg(short, long)]
    command: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let builder = FmtSubscriber::builder()
        .with_target(false)
        .with_writer(io::stderr)
        .compact();
    match EnvFilter::try_from_default_env() {
        Ok(filter) => builder.with_env_filter(filter).init(),
        Err(_) => builder.with_max_level(log_level).init(),
    }

    let backend = SqliteBackend::open(&args.db)
        .with_context(|| format!("Failed to open database {}", args.db.display()))?;
    let gateway = PersistenceGateway::new(Arc::new(backend), GatewayConfig::default());
    let loaded = gateway.load();
    let queue = Arc::new(gateway.start_writer());

    let mut store_config = StoreConfig::default();
    if let Some(platform) = args.platform {
        store_config.platform = platform;
    }
    let console = Console::new(CommandInterpreter::new(InterpreterConfig {
        platform: store_config.platform.clone(),
        ..InterpreterConfig::default()
    }));
    let store = SharedStore::new(EntityStore::restore(
        loaded,
        store_config,
        StoreCapabilities::with_sink(queue.clone()),
    ));
    info!(db = %args.db.display(), "store loaded");

    let success = match args.command {
        Some(command) => {
            let result = console.run_shared(&store, &command);
            println!("{}", render(&result));
            result.success
        }
        None => {
            let session_store = store.clone();
            let executed = tokio::task::spawn_blocking(move || {
                let stdin = io::stdin();
                let interactive = stdin.is_terminal();
                run_repl(&console, &session_store, stdin.lock(), io::stdout(), interactive)
            })
            .await
            .context("Terminal session panicked")??;
            info!(executed, "session ended");
            true
        }
    };

    drop(store);
    match tokio::time::timeout(Duration::from_secs(10), queue.flush()).await {
        Ok(result) => result.context("Failed to flush pending writes")?,
        Err(_) => warn!("timed out flushing pending writes"),
    }

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

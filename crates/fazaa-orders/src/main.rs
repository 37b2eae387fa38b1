/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Interactive order list TUI or a headless order listing
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

mod cli;
mod tui;

use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fazaa_orders::{AppConfig, FilterSelection, OrderListController, OrderListPresenter};

use crate::tui::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory};

#[derive(Parser, Debug)]
#[command(name = "fazaa-orders", version, about = "Fazaa driver order list")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Overrides api.base_url from the config file
    #[arg(long = "base-url", value_name = "URL")]
    base_url: Option<String>,
    /// Overrides api.token from the config file
    #[arg(long = "token", value_name = "TOKEN")]
    token: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Browse orders interactively (default)
    Tui,
    /// Print orders to stdout
    List {
        /// `all` or an order status such as `new`, `way`, `canceled`
        #[arg(long = "status", default_value = "all")]
        status: FilterSelection,
        /// Maximum number of pages to fetch
        #[arg(long = "pages", default_value_t = 1)]
        pages: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let command = args.command.clone().unwrap_or(Command::Tui);

    let log_buffer = match command {
        Command::Tui => Some(Arc::new(StdMutex::new(LogBuffer::new(LOG_BUFFER_CAPACITY)))),
        Command::List { .. } => None,
    };
    init_tracing(&args.log_level, log_buffer.clone())?;

    let config = load_config(&args)?;
    info!(
        base_url = %config.api.base_url,
        page_size = config.list.page_size,
        "configuration loaded"
    );

    let client = config.api.build_client()?;
    let controller = OrderListController::new(Arc::new(client.clone()), config.list.page_size);

    match command {
        Command::Tui => {
            let log_buffer = log_buffer.context("log buffer missing in tui mode")?;
            let shutdown = CancellationToken::new();
            setup_signal_handlers(shutdown.clone());
            tui::run_tui_with_log(OrderListPresenter::new(controller), client, log_buffer, shutdown)
                .await
        }
        Command::List { status, pages } => {
            let mut stdout = std::io::stdout().lock();
            let printed = cli::list::run_list(&controller, status, pages, &mut stdout).await?;
            info!(printed, filter = %status, "listing complete");
            Ok(())
        }
    }
}

fn init_tracing(log_level: &str, log_buffer: Option<LogBufferHandle>) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match log_buffer {
        Some(buffer) => builder
            .with_ansi(false)
            .with_writer(LogWriterFactory::new(buffer))
            .try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    result
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(args: &Cli) -> Result<AppConfig> {
    let mut config = match &args.config_path {
        Some(path) => AppConfig::from_file(path).context("load config")?,
        None => AppConfig::default(),
    };
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(token) = &args.token {
        config.api.token = Some(token.clone());
        // The file's expiry belongs to the file's token.
        config.api.token_expires_at = None;
    }
    config.validate()?;
    Ok(config)
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}

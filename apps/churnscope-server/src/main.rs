use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use churnscope_server::bootstrap;
use churnscope_server::config::AppConfig;

/// Churnscope - authenticated churn-prediction service
#[derive(Parser)]
#[command(name = "churnscope-server")]
#[command(about = "Churnscope - authenticated churn-prediction service")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
    }

    init_logging(cli.verbose);

    // Layered config: defaults -> YAML (if provided) -> env (CHURNSCOPE__*)
    // -> CLI overrides.
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    config.apply_cli_overrides(cli.port);

    if config.uses_dev_secret() {
        tracing::warn!(
            "auth.secret is the development default; set CHURNSCOPE__AUTH__SECRET before \
             exposing this server"
        );
    }

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Churnscope server starting");

    let db = bootstrap::connect_database(&config.database.dsn).await?;
    let services = bootstrap::build_services(db, &config)?;
    let router = bootstrap::build_router(&services, &config)?;

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}

fn check_config(config: &AppConfig) -> Result<()> {
    println!("Configuration is valid");
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

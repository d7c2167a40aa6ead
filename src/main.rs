//! Service entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mongo_api_starter::api::{create_router, AppState};
use mongo_api_starter::config::Settings;
use mongo_api_starter::db::{Lifecycle, MongoClient};
use mongo_api_starter::utils::shutdown_signal;

/// Minimal HTTP service scaffold with a lifecycle-managed MongoDB connection.
#[derive(Parser, Debug)]
#[command(name = "mongo-api-starter")]
#[command(about = "HTTP service scaffold: health endpoint, example routes, MongoDB lifecycle")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides the PORT environment variable).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Run {
        /// HTTP server port (overrides the PORT environment variable).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("mongo_api_starter=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Run { port }) => cmd_run(port).await,
        None => cmd_run(args.port).await,
    }
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("MONGO API STARTER - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let settings = match Settings::load() {
        Ok(s) => {
            println!("OK");
            s
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match settings.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  App: {} v{}", settings.app_name, settings.app_version);
    println!("  Environment: {}", settings.environment);
    println!("  Database: {}", settings.mongodb_database);
    println!(
        "  Pool Size: {}..{}",
        settings.mongodb_min_pool_size, settings.mongodb_max_pool_size
    );
    println!("  API Prefix: {}", settings.api_prefix);
    println!("  Allowed Origins: {}", settings.allowed_origins.join(", "));
    println!("  Port: {}", settings.port);
    println!("  Debug: {}", settings.debug);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server.
///
/// Startup order: settings, database client, liveness probe, router, serve
/// loop. Any failure before the listener binds aborts the process with a
/// non-zero exit; the client is released only after the serve loop returns.
async fn cmd_run(port_override: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut settings = Settings::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        settings.port = port;
    }

    // Validate configuration
    if let Err(e) = settings.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!(
        environment = %settings.environment,
        "Starting {} v{}",
        settings.app_name,
        settings.app_version
    );

    // Acquire the shared database client and verify reachability
    let client = MongoClient::connect(&settings).await.map_err(|e| {
        error!("Failed to build MongoDB client: {}", e);
        e
    })?;

    let lifecycle = Arc::new(Lifecycle::new());
    lifecycle
        .startup(client, &settings.mongodb_database)
        .await
        .map_err(|e| {
            error!("Failed to connect to MongoDB: {}", e);
            e
        })?;
    info!("MongoDB connected successfully");

    // Build the router and bind the listener
    let state = AppState::new(settings.clone(), lifecycle.clone());
    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    // Serve until SIGINT/SIGTERM, then release the client
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down application");
    lifecycle.shutdown().await;
    info!("MongoDB connection closed");

    Ok(())
}

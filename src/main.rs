//! Filesystem MCP Server Entry Point
//!
//! Resolves configuration from command-line flags and environment
//! variables, constructs the backend from the allowed directories, and
//! runs the selected transport until it stops or the process receives a
//! termination signal.

use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use fs_mcp_server::core::{
    CliArgs, Config, EnvSnapshot, FilesystemServer, TransportService, transport::signal,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let env = EnvSnapshot::capture();

    // Logging is up before resolution so degradation warnings are visible.
    init_logging(env.raw("MCP_LOG_LEVEL").unwrap_or("info"));

    let config = match Config::resolve(args, &env) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let server = match FilesystemServer::new(&config.allowed_dirs) {
        Ok(server) => server,
        Err(err) => {
            error!("Failed to create server: {err}");
            std::process::exit(1);
        }
    };

    info!(
        "Server initialized with {} allowed directories",
        config.allowed_dirs.len()
    );

    let cancel = signal::shutdown_token();
    let transport = TransportService::new(config);
    if let Err(err) = transport.run(server, cancel).await {
        error!("Transport error: {err}");
        std::process::exit(1);
    }

    info!("Server shutting down");
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level, writing to stderr so
/// stdout stays free for the stdio transport.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

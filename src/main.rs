//! Office Add-ins MCP Server entry point.
//!
//! Initializes logging, loads configuration and starts the server with the
//! configured transport.

use anyhow::{Context, Result};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use office_addins_mcp_server::core::config::LoggingConfig;
use office_addins_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Before Config::from_env, which logs its fallbacks.
    init_logging(&LoggingConfig::from_env());

    let config = Config::from_env();
    config.validate().context("invalid configuration")?;

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!(
        "Add-in directory: {} (timeout {}s)",
        config.addins.base_url, config.addins.timeout_secs
    );

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config).context("failed to create MCP server")?;

    info!("Server initialized");

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr so they never interleave with STDIO protocol frames.
fn init_logging(logging: &LoggingConfig) {
    let level = match logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}

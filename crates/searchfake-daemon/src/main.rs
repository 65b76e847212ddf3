//! `searchfake`: run the simulated search API as a standalone process.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line flags
//! 2. Load configuration (`--config`, else `searchfake.yaml` if present)
//! 3. Initialize structured logging (tracing)
//! 4. Load the seed file, if any
//! 5. Start the server and wait for Ctrl-C

mod error;
mod seed;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use searchfake_core::Engine;
use searchfake_server::{LoggingConfig, SearchFakeServer, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::DaemonError;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_PATH: &str = "searchfake.yaml";

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "searchfake")]
#[command(about = "In-memory stand-in for an Elasticsearch REST endpoint")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Address to bind (overrides config file and environment)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config file and environment)
    #[arg(short, long)]
    port: Option<u16>,

    /// YAML file of documents to seed before serving
    #[arg(short, long, value_name = "PATH")]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), DaemonError> {
    let args = Args::parse();

    let config = resolve_config(&args)?;
    init_logging(&config.logging)?;
    info!(address = %config.address(), version = %config.service.version, "searchfake starting");

    let engine = Arc::new(Engine::new());
    if let Some(path) = &args.seed {
        let seeds = seed::load(path)?;
        seed::apply(&engine, seeds).await;
    }

    let server = SearchFakeServer::with_engine(config, engine);
    let addr = server.start().await?;
    info!(%addr, "Ready; press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    server.stop().await;

    Ok(())
}

/// Config file, then environment, then command-line flags.
fn resolve_config(args: &Args) -> Result<ServerConfig, DaemonError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(host) = &args.host {
        config.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    Ok(config)
}

fn load_config(path: Option<&Path>) -> Result<ServerConfig, DaemonError> {
    if let Some(path) = path {
        return Ok(ServerConfig::from_file(path)?);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        Ok(ServerConfig::from_file(default_path)?)
    } else {
        let mut config = ServerConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), DaemonError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| DaemonError::Logging {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from(["searchfake", "--host", "0.0.0.0", "--port", "9333"]);
        let config = args.map_err(|e| e.to_string()).and_then(|args| {
            resolve_config(&args).map_err(|e| e.to_string())
        });
        assert_eq!(config.map(|c| c.address()).ok().as_deref(), Some("0.0.0.0:9333"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/searchfake.yaml")));
        assert!(matches!(result, Err(DaemonError::Config { .. })));
    }

    #[test]
    fn invalid_port_flag_is_rejected() {
        assert!(Args::try_parse_from(["searchfake", "--port", "99999"]).is_err());
    }
}

//! Local development proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 DEV PROXY                    │
//!   Browser request    │  ┌──────────┐   ┌──────────┐                 │
//!   ───────────────────┼─▶│  axum    │──▶│ routing  │                 │
//!                      │  │ server   │   └────┬─────┘                 │
//!                      │  └──────────┘        │                       │
//!                      │         ┌────────────┼─────────────┐         │
//!                      │         ▼            ▼             ▼         │
//!                      │   OPTIONS → 200   /api/<rest>   any other    │
//!                      │                      │            path       │
//!                      │                      ▼             ▼         │
//!                      │               ┌───────────┐  ┌───────────┐   │
//!                      │               │ forwarder │  │  static   │   │
//!                      │               │ (stream)  │  │   files   │   │
//!                      │               └─────┬─────┘  └───────────┘   │
//!                      │  CORS headers on    │                        │
//!                      │  every response     ▼                        │
//!                      └─────────────── upstream API ─────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use dev_proxy::config::{read_config, validate_config, ConfigError, ProxyConfig};
use dev_proxy::lifecycle::{signals, startup, Shutdown, StartupError};
use dev_proxy::observability::init_logging;
use dev_proxy::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "dev-proxy")]
#[command(about = "Serve a static app and forward /api/ calls to a remote host under one origin", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port (keeps the configured bind host)
    #[arg(short, long)]
    port: Option<u16>,

    /// Listen address, e.g. 0.0.0.0:8080
    #[arg(long)]
    bind: Option<String>,

    /// Upstream origin, e.g. http://apis.data.go.kr
    #[arg(short, long)]
    upstream: Option<String>,

    /// Document root for static files
    #[arg(short, long)]
    root: Option<String>,

    /// Document served for `/`
    #[arg(short, long)]
    index: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Send `Cache-Control: no-store` on every response
    #[arg(long)]
    no_store: bool,
}

impl Cli {
    /// Layer command-line flags over the loaded configuration.
    fn apply_overrides(&self, config: &mut ProxyConfig) {
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(port) = self.port {
            if let Ok(mut addr) = config.listener.bind_address.parse::<SocketAddr>() {
                addr.set_port(port);
                config.listener.bind_address = addr.to_string();
            }
        }
        if let Some(upstream) = &self.upstream {
            config.upstream.origin = upstream.clone();
        }
        if let Some(root) = &self.root {
            config.static_files.root = root.clone();
        }
        if let Some(index) = &self.index {
            config.static_files.default_document = index.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if self.no_store {
            config.static_files.no_store = true;
        }
    }

    fn load(&self) -> Result<ProxyConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ProxyConfig::default(),
        };
        self.apply_overrides(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.load()?;

    init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.origin,
        root = %config.static_files.root,
        default_document = %config.static_files.default_document,
        "Configuration loaded"
    );

    let server = HttpServer::new(config.clone()).map_err(StartupError::from)?;

    let listener = match startup::bind(&config).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };
    startup::print_banner(listener.local_addr()?, &config);

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    signals::trigger_on_signal(shutdown);

    server.run(listener, signal).await.map_err(StartupError::Serve)?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "dev-proxy",
            "--port",
            "9000",
            "--upstream",
            "http://127.0.0.1:7000",
            "--root",
            "web",
            "--index",
            "app.html",
            "--no-store",
        ]);
        let config = cli.load().unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.upstream.origin, "http://127.0.0.1:7000");
        assert_eq!(config.static_files.root, "web");
        assert_eq!(config.static_files.default_document, "app.html");
        assert!(config.static_files.no_store);
    }

    #[test]
    fn port_applies_after_bind() {
        let cli = Cli::parse_from(["dev-proxy", "--bind", "0.0.0.0:1234", "-p", "8081"]);
        assert_eq!(cli.load().unwrap().listener.bind_address, "0.0.0.0:8081");
    }

    #[test]
    fn override_repairs_file_before_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"[listener]\nbind_address = \"localhost:8080\"\n",
        )
        .unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let cli = Cli::parse_from(["dev-proxy", "-c", path.as_str(), "--bind", "127.0.0.1:8081"]);
        assert_eq!(cli.load().unwrap().listener.bind_address, "127.0.0.1:8081");

        let cli = Cli::parse_from(["dev-proxy", "-c", path.as_str()]);
        assert!(matches!(cli.load(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn invalid_override_fails_validation() {
        let cli = Cli::parse_from(["dev-proxy", "--upstream", "https://secure.example"]);
        assert!(matches!(cli.load(), Err(ConfigError::Validation(_))));
    }
}

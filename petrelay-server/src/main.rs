//! # Pet Relay Server
//!
//! Tiny shared-state relay between pet scanners and notifiers.
//!
//! ## Overview
//!
//! - **Submit**: scanners post the pets they saw for a job/place pair
//! - **Poll**: notifiers list whatever is still live, newest first
//! - **Stats**: aggregate counts and the most common pets
//!
//! Findings live in memory only. Each expires 15 seconds after its last
//! submit, and at most 100 are kept.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use petrelay_core::FindingsStore;
use petrelay_server::{
    AppState, create_app,
    infra::config::ServerConfig,
    routes::ENDPOINTS,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "petrelay-server")]
#[command(about = "Relay pet findings from scanners to notifiers")]
struct Cli {
    /// Server port (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ServerConfig::from_env()
        .context("failed to load configuration")?
        .with_port_override(cli.port);

    init_tracing();

    if config.env_file_loaded {
        info!("loaded .env file");
    }

    let addr = config.bind_addr();
    let findings = Arc::new(FindingsStore::new());
    let limits = findings.limits();
    let state = AppState::new(findings, Arc::new(config));
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        %addr,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Pet Relay server"
    );
    info!(
        max_findings = limits.max_findings,
        ttl_ms = limits.ttl.num_milliseconds(),
        "findings store ready"
    );
    for endpoint in ENDPOINTS {
        info!("  {} {}", endpoint.method, endpoint.path);
    }

    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                // Override via RUST_LOG.
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn port_flag_is_optional() {
        let cli = Cli::try_parse_from(["petrelay-server"]).expect("parses");
        assert_eq!(cli.port, None);

        let cli = Cli::try_parse_from(["petrelay-server", "--port", "4000"])
            .expect("parses");
        assert_eq!(cli.port, Some(4000));
    }
}

//! # Touchlink Panel Runtime
//!
//! Runs one panel until Ctrl+C.
//!
//! ## Startup Sequence
//!
//! 1. Install logging (`RUST_LOG` filter, `info` by default)
//! 2. Load configuration (defaults plus `TL_*` environment overrides)
//! 3. Build and wire the subsystems
//! 4. Wait for Ctrl+C, then shut down

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use panel_runtime::adapters::TracingTransport;
use panel_runtime::{PanelRuntime, RuntimeConfig};
use tl_03_pin_authentication::JsonFileCredentialStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = RuntimeConfig::from_env().context("Invalid environment configuration")?;
    let store = Arc::new(JsonFileCredentialStore::new(config.credentials_path.clone()));
    let transport = Arc::new(TracingTransport::new());

    // Create and start the panel runtime
    let runtime = PanelRuntime::new(config, transport, store)
        .await
        .context("Failed to build panel subsystems")?;
    runtime.start().await.context("Failed to wire panel subsystems")?;

    info!("Panel is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;
    Ok(())
}

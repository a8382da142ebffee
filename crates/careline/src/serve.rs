// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `careline serve` command implementation.
//!
//! Opens the SQLite store, wires the intent client and WhatsApp channel into
//! the gateway, and serves until SIGINT or SIGTERM. Every adapter is shut
//! down after the listener drains; the store last, so its WAL checkpoint
//! sees every write.

use std::sync::Arc;

use careline_config::CarelineConfig;
use careline_core::{CarelineError, DomainStore, PluginAdapter};
use careline_gateway::{GatewayState, start_server};
use careline_intent::RasaIntent;
use careline_storage::SqliteStore;
use careline_whatsapp::WhatsAppChannel;
use tracing::{debug, error, info};

use crate::shutdown;

/// Runs the `careline serve` command.
pub async fn run_serve(config: CarelineConfig) -> Result<(), CarelineError> {
    init_tracing(&config.logging.level);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        database = %config.storage.database_path,
        intent_url = %config.intent.url,
        "starting careline"
    );

    let store = Arc::new(SqliteStore::new(config.storage.clone()));
    store.initialize().await?;

    let intent = Arc::new(RasaIntent::new(&config.intent)?);
    let channel = Arc::new(WhatsAppChannel::new(config.whatsapp.clone()));
    let state = GatewayState::new(store.clone(), intent.clone(), channel.clone(), &config);

    let token = shutdown::install_signal_handler();
    let served = start_server(&config.server, state, async move {
        token.cancelled().await;
    })
    .await;

    let adapters: [Arc<dyn PluginAdapter>; 3] = [channel, intent, store];
    shutdown_adapters(&adapters).await;
    served?;

    info!("careline stopped");
    Ok(())
}

/// Shuts adapters down in order, logging failures without stopping.
///
/// Returns how many adapters failed.
async fn shutdown_adapters(adapters: &[Arc<dyn PluginAdapter>]) -> usize {
    let mut failures = 0;
    for adapter in adapters {
        match adapter.shutdown().await {
            Ok(()) => debug!(adapter = adapter.name(), "adapter shut down"),
            Err(e) => {
                failures += 1;
                error!(adapter = adapter.name(), error = %e, "adapter shutdown failed");
            }
        }
    }
    failures
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("careline={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

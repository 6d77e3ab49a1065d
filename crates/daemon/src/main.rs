//! localexec provider - Main Entry Point
//! Serves the command data source over JSON-RPC until Ctrl+C

mod config;
mod logging;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

// Import workspace crates
use config::DaemonConfig;
use localexec_api_rpc::RpcServer;
use localexec_core::application::CommandDataSource;
use localexec_core::port::id_provider::UuidProvider;
use localexec_core::port::time_provider::SystemTimeProvider;
use localexec_infra_system::{SearchPathResolver, ShellExecutor};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::from_env()?;

    // 2. Initialize logging
    let _log_guard = logging::init(&config.log)?;

    info!("localexec provider v{} starting...", VERSION);
    info!(
        shell = %config.shell.program.display(),
        provider = %config.provider_name,
        "Configuration loaded"
    );

    // 3. Setup dependencies (DI wiring)
    let executor = Arc::new(
        ShellExecutor::new(
            Arc::new(SearchPathResolver::from_env()),
            Arc::new(SystemTimeProvider),
        )
        .with_shell(config.shell.clone()),
    );
    let data_source = Arc::new(
        CommandDataSource::new(executor, Arc::new(UuidProvider))
            .with_provider_type_name(config.provider_name.clone()),
    );

    // 4. Start JSON-RPC server
    let (addr, rpc_handle) = RpcServer::new(config.rpc.clone(), data_source)
        .start()
        .await
        .context("RPC server start failed")?;

    info!(addr = %addr, "System ready. Press Ctrl+C to shutdown");

    // 5. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    info!("Shutdown complete.");

    Ok(())
}

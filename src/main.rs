use std::time::Duration;

use tokio_util::sync::CancellationToken;

use aludesk::{AppState, BackupScheduler, Config, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Configuration and logging
    let config = Config::from_env();
    let log_dir = config.log_dir.as_ref().and_then(|d| d.to_str().map(String::from));
    init_logger_with_file(Some(&config.log_level), log_dir.as_deref());

    tracing::info!("AluDesk starting...");

    // 2. Open every store
    let state = AppState::open(config)?;
    tracing::info!(
        customers = state.customers.len(),
        items = state.catalog.len(),
        orders = state.orders.len(),
        "Data stores ready"
    );

    // 3. Background backup loop
    let shutdown = CancellationToken::new();
    let scheduler = BackupScheduler::new(
        aludesk::BackupManager::new(state.config.backed_up_files()),
        state.config.backup_dir.clone(),
        state.config.backup_keep,
        Duration::from_secs(state.config.backup_interval_hours * 3600),
        shutdown.clone(),
    );
    let scheduler_handle = tokio::spawn(scheduler.run());

    // 4. Run until interrupted
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    shutdown.cancel();
    scheduler_handle.await?;

    tracing::info!("AluDesk stopped");
    Ok(())
}

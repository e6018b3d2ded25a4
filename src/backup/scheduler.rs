//! Backup scheduler
//!
//! Startup snapshot, then a fixed-interval loop. Failures are logged and the
//! loop keeps going; a broken backup must never take the app down.

use std::path::PathBuf;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::backup::BackupManager;

/// Periodic backup driver.
///
/// Runs one snapshot immediately on start, then every `interval` until the
/// shutdown token fires. Each snapshot is followed by a prune down to
/// `keep_count`.
pub struct BackupScheduler {
    manager: BackupManager,
    root: PathBuf,
    keep_count: usize,
    interval: Duration,
    shutdown: CancellationToken,
}

impl BackupScheduler {
    pub fn new(
        manager: BackupManager,
        root: PathBuf,
        keep_count: usize,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            manager,
            root,
            keep_count,
            interval,
            shutdown,
        }
    }

    /// Main loop: startup snapshot, then interval ticks.
    pub async fn run(self) {
        tracing::info!(
            root = %self.root.display(),
            keep = self.keep_count,
            interval_secs = self.interval.as_secs(),
            "Backup scheduler started"
        );

        self.tick();

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Backup scheduler received shutdown signal");
                    break;
                }
            }
            self.tick();
        }

        tracing::info!("Backup scheduler stopped");
    }

    fn tick(&self) {
        if let Err(e) = self.manager.snapshot(&self.root) {
            tracing::error!(error = %e, "Backup snapshot failed");
            return;
        }
        if let Err(e) = self.manager.prune(&self.root, self.keep_count) {
            tracing::error!(error = %e, "Backup prune failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_takes_startup_snapshot_and_stops_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("clientes.json"), "[]").unwrap();
        let root = dir.path().join("backups");

        let manager = BackupManager::new(vec![data.join("clientes.json")]);
        let shutdown = CancellationToken::new();
        let scheduler = BackupScheduler::new(
            manager,
            root.clone(),
            1,
            Duration::from_secs(3600),
            shutdown.clone(),
        );

        let handle = tokio::spawn(scheduler.run());
        // Give the startup snapshot a moment, then stop the loop.
        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.cancel();
        handle.await.unwrap();

        let snapshots: Vec<_> = std::fs::read_dir(&root).unwrap().collect();
        assert_eq!(snapshots.len(), 1);
    }
}

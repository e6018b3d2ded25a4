//! Backup manager
//!
//! Snapshots the data files (`clientes.json`, `acessorios.json`,
//! `pedidos.json`, `preco_aluminio.json`) into timestamped directories under
//! a backup root, restores
//! from a chosen snapshot, and prunes old snapshots down to a retention
//! count. The periodic driver lives in [`scheduler`].

pub mod scheduler;

pub use scheduler::BackupScheduler;

use crate::utils::AppResult;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Snapshot directory name prefix; the suffix is a sortable local timestamp.
const SNAPSHOT_PREFIX: &str = "backup_";

/// Copies a fixed set of data files in and out of snapshot directories.
pub struct BackupManager {
    files: Vec<PathBuf>,
}

impl BackupManager {
    /// `files` are the live data files to protect. Missing entries are
    /// skipped at snapshot time, so a fresh install backs up cleanly.
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    /// Create a timestamped snapshot under `root`.
    ///
    /// Returns the snapshot directory path. Files that do not exist yet are
    /// skipped; the directory is created even when every file is missing so
    /// the retention window keeps moving.
    pub fn snapshot(&self, root: &Path) -> AppResult<PathBuf> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let dir = root.join(format!("{SNAPSHOT_PREFIX}{stamp}"));
        std::fs::create_dir_all(&dir)?;

        let mut copied = 0usize;
        for file in &self.files {
            if !file.exists() {
                continue;
            }
            if let Some(name) = file.file_name() {
                std::fs::copy(file, dir.join(name))?;
                copied += 1;
            }
        }
        tracing::info!(dir = %dir.display(), files = copied, "Backup snapshot created");
        Ok(dir)
    }

    /// Overwrite the live data files with the copies found in `source`.
    ///
    /// Only files present in the snapshot are touched. No content validation
    /// is performed; the stores load fail-open on next open anyway.
    pub fn restore(&self, source: &Path) -> AppResult<usize> {
        let mut restored = 0usize;
        for file in &self.files {
            let Some(name) = file.file_name() else { continue };
            let candidate = source.join(name);
            if !candidate.exists() {
                continue;
            }
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(&candidate, file)?;
            restored += 1;
        }
        tracing::info!(source = %source.display(), files = restored, "Backup restored");
        Ok(restored)
    }

    /// List snapshot directories under `root`, oldest first.
    ///
    /// The timestamp suffix sorts lexicographically, so plain name order is
    /// chronological order.
    pub fn list_snapshots(&self, root: &Path) -> AppResult<Vec<PathBuf>> {
        if !root.exists() {
            return Ok(Vec::new());
        }
        let mut snapshots: Vec<PathBuf> = std::fs::read_dir(root)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_dir()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with(SNAPSHOT_PREFIX))
            })
            .collect();
        snapshots.sort();
        Ok(snapshots)
    }

    /// Delete the oldest snapshots until at most `keep` remain. The newest
    /// snapshot always survives, even with `keep == 0`.
    pub fn prune(&self, root: &Path, keep: usize) -> AppResult<usize> {
        let keep = keep.max(1);
        let snapshots = self.list_snapshots(root)?;
        if snapshots.len() <= keep {
            return Ok(0);
        }
        let excess = snapshots.len() - keep;
        for old in &snapshots[..excess] {
            std::fs::remove_dir_all(old)?;
            tracing::debug!(dir = %old.display(), "Old backup pruned");
        }
        Ok(excess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(data: &Path) -> BackupManager {
        BackupManager::new(vec![
            data.join("clientes.json"),
            data.join("acessorios.json"),
            data.join("pedidos.json"),
        ])
    }

    #[test]
    fn test_snapshot_copies_existing_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("clientes.json"), "[]").unwrap();
        std::fs::write(data.join("pedidos.json"), "[]").unwrap();

        let root = dir.path().join("backups");
        let snapshot = manager(&data).snapshot(&root).unwrap();

        assert!(snapshot.join("clientes.json").exists());
        assert!(snapshot.join("pedidos.json").exists());
        assert!(!snapshot.join("acessorios.json").exists());
        assert!(
            snapshot
                .file_name()
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("backup_")
        );
    }

    #[test]
    fn test_restore_overwrites_live_files() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("clientes.json"), r#"[{"nome":"old"}]"#).unwrap();

        let root = dir.path().join("backups");
        let m = manager(&data);
        let snapshot = m.snapshot(&root).unwrap();

        std::fs::write(data.join("clientes.json"), r#"[{"nome":"changed"}]"#).unwrap();
        let restored = m.restore(&snapshot).unwrap();

        assert_eq!(restored, 1);
        let content = std::fs::read_to_string(data.join("clientes.json")).unwrap();
        assert!(content.contains("old"));
    }

    #[test]
    fn test_prune_keeps_newest() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        let root = dir.path().join("backups");

        // Created by hand so the stamps differ; same-second snapshots would
        // collide on the directory name.
        for stamp in ["20260101_000000", "20260102_000000", "20260103_000000"] {
            std::fs::create_dir_all(root.join(format!("backup_{stamp}"))).unwrap();
        }
        // Unrelated directories are never pruned.
        std::fs::create_dir_all(root.join("notes")).unwrap();

        let m = manager(&data);
        let pruned = m.prune(&root, 1).unwrap();
        assert_eq!(pruned, 2);

        let remaining = m.list_snapshots(&root).unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].ends_with("backup_20260103_000000"));
        assert!(root.join("notes").exists());
    }

    #[test]
    fn test_prune_under_limit_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        let root = dir.path().join("backups");
        std::fs::create_dir_all(root.join("backup_20260101_000000")).unwrap();

        let pruned = manager(&data).prune(&root, 3).unwrap();
        assert_eq!(pruned, 0);
        assert_eq!(manager(&data).list_snapshots(&root).unwrap().len(), 1);
    }

    #[test]
    fn test_list_snapshots_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let snapshots = manager(&data)
            .list_snapshots(&dir.path().join("nope"))
            .unwrap();
        assert!(snapshots.is_empty());
    }
}

use crate::documents::IssuerInfo;
use std::path::{Path, PathBuf};

/// Application configuration.
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ALUDESK_DATA_DIR | ./dados | Data files directory |
/// | ALUDESK_BACKUP_DIR | <data_dir>/backups | Backup snapshot root |
/// | ALUDESK_BACKUP_KEEP | 1 | Snapshots retained after pruning |
/// | ALUDESK_BACKUP_INTERVAL_HOURS | 24 | Hours between snapshots |
/// | ALUDESK_LOG_LEVEL | info | Log filter level |
/// | ALUDESK_LOG_DIR | (unset) | When set, also log to daily files here |
/// | ALUDESK_LOGO | (unset) | PNG printed on quote letterheads |
/// | ALUDESK_ISSUER_NAME | Distribuidora de Alumínio | Letterhead name |
/// | ALUDESK_ISSUER_CNPJ | (empty) | Letterhead CNPJ |
/// | ALUDESK_ISSUER_ADDRESS | (empty) | Letterhead address |
/// | ALUDESK_ISSUER_CITY | (empty) | Letterhead city/state |
/// | ALUDESK_ISSUER_PHONE | (empty) | Letterhead phone |
/// | ALUDESK_ISSUER_EMAIL | (empty) | Letterhead email |
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the four JSON data files.
    pub data_dir: PathBuf,
    /// Root directory for backup snapshots.
    pub backup_dir: PathBuf,
    /// Snapshots retained after each prune.
    pub backup_keep: usize,
    /// Hours between periodic snapshots.
    pub backup_interval_hours: u64,
    /// Log filter level, e.g. "info" or "debug".
    pub log_level: String,
    /// Optional directory for daily log files.
    pub log_dir: Option<PathBuf>,
    /// Optional PNG logo for the quote letterhead.
    pub logo_path: Option<PathBuf>,
    /// Identity printed on quotes.
    pub issuer: IssuerInfo,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let data_dir = PathBuf::from(env_or("ALUDESK_DATA_DIR", "./dados"));
        let backup_dir = std::env::var("ALUDESK_BACKUP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("backups"));
        Self {
            backup_dir,
            backup_keep: std::env::var("ALUDESK_BACKUP_KEEP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            backup_interval_hours: std::env::var("ALUDESK_BACKUP_INTERVAL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            log_level: env_or("ALUDESK_LOG_LEVEL", "info"),
            log_dir: std::env::var("ALUDESK_LOG_DIR").ok().map(PathBuf::from),
            logo_path: std::env::var("ALUDESK_LOGO").ok().map(PathBuf::from),
            issuer: IssuerInfo {
                name: env_or("ALUDESK_ISSUER_NAME", "Distribuidora de Alumínio"),
                tax_id: env_or("ALUDESK_ISSUER_CNPJ", ""),
                address: env_or("ALUDESK_ISSUER_ADDRESS", ""),
                city: env_or("ALUDESK_ISSUER_CITY", ""),
                phone: env_or("ALUDESK_ISSUER_PHONE", ""),
                email: env_or("ALUDESK_ISSUER_EMAIL", ""),
            },
            data_dir,
        }
    }

    /// Config rooted at a custom data directory. Used by tests.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let mut config = Self::from_env();
        config.backup_dir = data_dir.join("backups");
        config.data_dir = data_dir;
        config
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir.join("clientes.json")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join("acessorios.json")
    }

    pub fn orders_path(&self) -> PathBuf {
        self.data_dir.join("pedidos.json")
    }

    pub fn price_path(&self) -> PathBuf {
        self.data_dir.join("preco_aluminio.json")
    }

    /// The files covered by backup snapshots. The price file is tiny and
    /// cheap to include alongside the three collections.
    pub fn backed_up_files(&self) -> Vec<PathBuf> {
        vec![
            self.customers_path(),
            self.catalog_path(),
            self.orders_path(),
            self.price_path(),
        ]
    }

    pub fn logo(&self) -> Option<&Path> {
        self.logo_path.as_deref()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_data_dir_derives_paths() {
        let config = Config::with_data_dir("/tmp/aludesk-test");
        assert_eq!(
            config.customers_path(),
            PathBuf::from("/tmp/aludesk-test/clientes.json")
        );
        assert_eq!(
            config.backup_dir,
            PathBuf::from("/tmp/aludesk-test/backups")
        );
        assert_eq!(config.backed_up_files().len(), 4);
    }
}

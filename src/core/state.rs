use crate::backup::BackupManager;
use crate::catalog::{ItemCatalog, PriceStore};
use crate::core::Config;
use crate::customers::CustomerRegistry;
use crate::documents;
use crate::models::Order;
use crate::orders::OrderEngine;
use crate::utils::AppResult;
use std::path::Path;

/// Application state - owns every store and service.
///
/// One instance per process. All stores load eagerly at open; a mutation on
/// any of them persists synchronously, so there is no flush step at shutdown.
pub struct AppState {
    pub config: Config,
    pub customers: CustomerRegistry,
    pub catalog: ItemCatalog,
    pub price: PriceStore,
    pub orders: OrderEngine,
    pub backup: BackupManager,
}

impl AppState {
    /// Wire every component from the configuration.
    pub fn open(config: Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        tracing::info!(data_dir = %config.data_dir.display(), "Opening data stores");

        let customers = CustomerRegistry::open(config.customers_path());
        let catalog = ItemCatalog::open(config.catalog_path());
        let price = PriceStore::new(config.price_path());
        let orders = OrderEngine::open(config.orders_path());
        let backup = BackupManager::new(config.backed_up_files());

        Ok(Self {
            config,
            customers,
            catalog,
            price,
            orders,
            backup,
        })
    }

    /// Render the proposal PDF for a saved order, using the configured
    /// issuer identity and logo.
    pub fn render_quote(&self, order: &Order) -> AppResult<Vec<u8>> {
        documents::render_quote(order, &self.config.issuer, self.config.logo())
    }

    /// Render a saved order's proposal and write it to `path`.
    pub fn export_quote(&self, order: &Order, path: &Path) -> AppResult<()> {
        let bytes = self.render_quote(order)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        tracing::info!(numero = order.number, path = %path.display(), "Quote exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("dados");
        let state = AppState::open(Config::with_data_dir(&data_dir)).unwrap();
        assert!(data_dir.exists());
        assert!(state.customers.is_empty());
        assert!(state.catalog.is_empty());
        assert_eq!(state.price.get(), 0.0);
        assert!(state.orders.is_empty());
    }
}

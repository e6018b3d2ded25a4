//! AluDesk - order desk for an aluminum profile distributor
//!
//! Customers, a weight-priced item catalog, and sales orders whose lines
//! freeze the price-per-kg in effect when they were added. Saved orders
//! export as "Proposta" PDFs, and a background scheduler snapshots the JSON
//! data files.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/        # configuration, application state
//! ├── models/      # serde data types (Customer, CatalogItem, Order)
//! ├── store/       # JSON file persistence, fail-open loading
//! ├── customers/   # customer registry
//! ├── catalog/     # item catalog, price-per-kg store
//! ├── orders/      # order engine (compose, finalize, edit, search)
//! ├── documents/   # quote PDF renderer
//! ├── backup/      # snapshot/restore/prune + scheduler
//! └── utils/       # errors, logging, input validation
//! ```

pub mod backup;
pub mod catalog;
pub mod core;
pub mod customers;
pub mod documents;
pub mod models;
pub mod orders;
pub mod store;
pub mod utils;

// Re-export the public surface.
pub use backup::{BackupManager, BackupScheduler};
pub use catalog::{ItemCatalog, PriceSource, PriceStore};
pub use crate::core::{AppState, Config};
pub use customers::CustomerRegistry;
pub use documents::{IssuerInfo, render_quote, suggested_filename};
pub use models::{CatalogItem, Customer, Order, OrderLine};
pub use orders::{OrderEngine, OrderError, Session};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

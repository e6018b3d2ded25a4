//! Entity models
//!
//! Serde structs for the persisted JSON stores. Wire field names keep the
//! Portuguese keys of the legacy data files; fields absent in old files
//! default to empty strings so existing stores load unchanged.

pub mod customer;
pub mod item;
pub mod order;

pub use customer::Customer;
pub use item::CatalogItem;
pub use order::{Order, OrderLine};

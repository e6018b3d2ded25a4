//! Order composition and persistence
//!
//! - **engine**: `OrderEngine` (working session state machine, frozen-price
//!   lines, finalize/edit/delete/search over `pedidos.json`)

pub mod engine;

pub use engine::{OrderEngine, OrderError, OrderResult, Session};

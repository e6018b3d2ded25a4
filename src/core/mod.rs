//! Core module - configuration and application state
//!
//! - [`Config`] - environment-driven configuration
//! - [`AppState`] - owns every service and store, wired from a `Config`

pub mod config;
pub mod state;

pub use config::Config;
pub use state::AppState;

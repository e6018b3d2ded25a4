//! Document generation
//!
//! - **quote**: commercial proposal PDF rendered from a saved [`Order`](crate::models::Order)

pub mod quote;

pub use quote::{IssuerInfo, render_quote, suggested_filename};

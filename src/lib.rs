//! Election vote tallying.
//!
//! Reads pre-aggregated per-department party totals from Redis, party metadata
//! from SQL, and shapes them into ranked, percentage-annotated results.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod voting;

pub use config::Config;
pub use error::{Result, TallyError};
pub use service::TallyService;

//! Shared utilities for trendcast
//!
//! This crate provides common functionality used across the trendcast workspace:
//! tracing setup, `.env` loading, and the application configuration shared by
//! the three pipeline stages.

pub mod config;
pub mod logging;

pub use config::{AppConfig, load_dotenv, report_dotenv};
pub use logging::init_tracing;

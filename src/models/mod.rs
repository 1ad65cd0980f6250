// src/models/mod.rs

//! Domain models for the scraper application.

mod config;
mod product;

// Re-export all public types
pub use config::{Config, ExportConfig, FetchConfig, SelectorConfig, parse_url_list};
pub use product::{NO_DESCRIPTION, ProductRecord};

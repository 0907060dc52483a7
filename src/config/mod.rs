//! Configuration module for Page-Sift
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file behaves like an empty one.
//!
//! # Example
//!
//! ```no_run
//! use page_sift::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("page-sift.toml")).unwrap();
//! println!("Fetches per step: {}", config.crawler.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig, OutputConfig, ScopeConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;

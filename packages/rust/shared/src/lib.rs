//! Shared types, error model, and configuration for mdattrs.
//!
//! This crate is the foundation depended on by the other mdattrs crates.
//! It provides:
//! - [`MdAttrsError`], the unified error type
//! - Domain types ([`Extraction`])
//! - Configuration ([`AppConfig`], [`MarkdownConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, MarkdownConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{MdAttrsError, Result};
pub use types::Extraction;

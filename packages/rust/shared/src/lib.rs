//! Shared types, error model, and configuration for the search-index builder.
//!
//! This crate is the foundation depended on by all other sitesearch crates.
//! It provides:
//! - [`SearchIndexError`] — the unified error type
//! - Domain types ([`Locale`], [`LocalizedText`], [`CellValue`],
//!   [`SearchIndexItem`], [`SearchIndexData`])
//! - Configuration ([`SiteConfig`], [`BuildConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    BuildConfig, BuildSection, CONFIG_FILE_NAME, PathsConfig, SiteConfig, load_config,
    load_config_from,
};
pub use error::{Result, SearchIndexError};
pub use types::{
    CellValue, ItemType, Locale, LocalizedText, SearchIndexData, SearchIndexItem,
};

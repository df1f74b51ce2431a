//! Build configuration for the search-index builder.
//!
//! Project config lives at `<root>/sitesearch.toml` and is optional.
//! CLI flags override config file values, which override defaults.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchIndexError};
use crate::types::Locale;

/// Configuration file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "sitesearch.toml";

// ---------------------------------------------------------------------------
// Config structs (matching sitesearch.toml schema)
// ---------------------------------------------------------------------------

/// Top-level project config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Input and output locations, relative to the project root.
    #[serde(default)]
    pub paths: PathsConfig,

    /// What gets built and validated.
    #[serde(default)]
    pub build: BuildSection,
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Static data: catalog, messages, standards, reference tables.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Content tree: `blog/`, `guides/`, `glossary/`, `tools/`.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Where `search-index.<locale>.json` files are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            content_dir: default_content_dir(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "data".into()
}
fn default_content_dir() -> String {
    "content".into()
}
fn default_output_dir() -> String {
    "public".into()
}

/// `[build]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSection {
    /// Locales to build an index for.
    #[serde(default = "default_locales")]
    pub locales: Vec<Locale>,

    /// Tools that must ship a schema-valid doc file for every locale.
    #[serde(default)]
    pub active_tool_docs: Vec<String>,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            locales: default_locales(),
            active_tool_docs: Vec::new(),
        }
    }
}

fn default_locales() -> Vec<Locale> {
    Locale::ALL.to_vec()
}

// ---------------------------------------------------------------------------
// Build config (runtime, resolved against the project root)
// ---------------------------------------------------------------------------

/// Runtime build configuration with absolute-ish paths.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub data_dir: PathBuf,
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    pub locales: Vec<Locale>,
    pub active_tool_docs: Vec<String>,
}

impl BuildConfig {
    /// Resolve a [`SiteConfig`] against `root`, rejecting empty or repeated locales.
    pub fn resolve(config: &SiteConfig, root: &Path) -> Result<Self> {
        if config.build.locales.is_empty() {
            return Err(SearchIndexError::config("[build] locales must not be empty"));
        }

        let mut seen = HashSet::new();
        for locale in &config.build.locales {
            if !seen.insert(*locale) {
                return Err(SearchIndexError::config(format!(
                    "locale '{locale}' listed more than once"
                )));
            }
        }

        Ok(Self {
            data_dir: root.join(&config.paths.data_dir),
            content_dir: root.join(&config.paths.content_dir),
            output_dir: root.join(&config.paths.output_dir),
            locales: config.build.locales.clone(),
            active_tool_docs: config.build.active_tool_docs.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load `<root>/sitesearch.toml`. Returns defaults if the file does not exist.
pub fn load_config(root: &Path) -> Result<SiteConfig> {
    let path = root.join(CONFIG_FILE_NAME);

    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content, &path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(?path, "config file not found, using defaults");
            Ok(SiteConfig::default())
        }
        Err(e) => Err(SearchIndexError::io(path, e)),
    }
}

/// Load the project config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<SiteConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SearchIndexError::io(path, e))?;
    parse_config(&content, path)
}

fn parse_config(content: &str, path: &Path) -> Result<SiteConfig> {
    toml::from_str(content).map_err(|e| {
        SearchIndexError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = SiteConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("content_dir"));
        assert!(toml_str.contains("output_dir"));
    }

    #[test]
    fn config_roundtrip() {
        let config = SiteConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: SiteConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.paths.output_dir, "public");
        assert_eq!(parsed.build.locales, vec![Locale::Tr, Locale::En]);
    }

    #[test]
    fn config_with_active_docs() {
        let toml_str = r#"
[paths]
output_dir = "dist"

[build]
locales = ["en"]
active_tool_docs = ["bolt-calculator", "pipe-pressure-drop"]
"#;
        let config: SiteConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.paths.output_dir, "dist");
        assert_eq!(config.paths.data_dir, "data");
        assert_eq!(config.build.locales, vec![Locale::En]);
        assert_eq!(config.build.active_tool_docs.len(), 2);
    }

    #[test]
    fn unknown_locale_rejected() {
        let result: std::result::Result<SiteConfig, _> =
            toml::from_str("[build]\nlocales = [\"de\"]\n");
        assert!(result.is_err());
    }

    #[test]
    fn build_config_resolves_paths() {
        let config = SiteConfig::default();
        let build = BuildConfig::resolve(&config, Path::new("/srv/site")).expect("resolve");
        assert_eq!(build.content_dir, PathBuf::from("/srv/site/content"));
        assert_eq!(build.output_dir, PathBuf::from("/srv/site/public"));
        assert_eq!(build.locales.len(), 2);
    }

    #[test]
    fn build_config_rejects_duplicate_locales() {
        let mut config = SiteConfig::default();
        config.build.locales = vec![Locale::En, Locale::En];
        let err = BuildConfig::resolve(&config, Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("more than once"));

        config.build.locales.clear();
        assert!(BuildConfig::resolve(&config, Path::new(".")).is_err());
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let dir = std::env::temp_dir().join(format!(
            "sitesearch-config-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();

        let config = load_config(&dir).expect("defaults");
        assert_eq!(config.paths.data_dir, "data");

        std::fs::write(dir.join(CONFIG_FILE_NAME), "[paths]\ndata_dir = \"site-data\"\n").unwrap();
        let config = load_config(&dir).expect("load");
        assert_eq!(config.paths.data_dir, "site-data");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unreadable_config_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!(
            "sitesearch-config-test-{}",
            uuid::Uuid::now_v7()
        ));
        // Present but not readable as a file.
        std::fs::create_dir_all(dir.join(CONFIG_FILE_NAME)).unwrap();

        let err = load_config(&dir).unwrap_err();
        assert!(matches!(err, SearchIndexError::Io { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }
}

//! Static site data, loaded once per build from the data directory.
//!
//! ```text
//! <data_dir>/
//! ├── catalog.json
//! ├── reference.json
//! ├── messages/
//! │   ├── tr.json
//! │   └── en.json
//! └── standards/
//!     ├── manifest.json
//!     └── tables.json
//! ```

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use sitesearch_shared::{Locale, Result, SearchIndexError};

use crate::catalog::{Messages, ToolCatalog};
use crate::reference::ReferenceTable;
use crate::standards::StandardsManifest;
use crate::tables::TableRegistry;

pub const CATALOG_FILE: &str = "catalog.json";
pub const REFERENCE_FILE: &str = "reference.json";
pub const MESSAGES_DIR: &str = "messages";
pub const STANDARDS_MANIFEST_FILE: &str = "standards/manifest.json";
pub const STANDARDS_TABLES_FILE: &str = "standards/tables.json";

static NO_MESSAGES: Messages = Messages::empty();

/// Immutable inputs shared by every locale's build.
#[derive(Debug, Clone)]
pub struct SiteData {
    pub catalog: ToolCatalog,
    pub messages: BTreeMap<Locale, Messages>,
    pub manifest: StandardsManifest,
    pub tables: TableRegistry,
    pub reference: Vec<ReferenceTable>,
}

impl SiteData {
    /// The message catalog for `locale` (empty when none was loaded).
    pub fn messages(&self, locale: Locale) -> &Messages {
        self.messages.get(&locale).unwrap_or(&NO_MESSAGES)
    }
}

/// Load every static data file under `data_dir`.
///
/// A missing message catalog only costs localized tool copy, so it is logged
/// and replaced by an empty one. Every other file is required.
#[instrument(skip_all, fields(data_dir = %data_dir.display()))]
pub async fn load_site_data(data_dir: &Path, locales: &[Locale]) -> Result<SiteData> {
    let catalog: ToolCatalog = read_json(&data_dir.join(CATALOG_FILE)).await?;
    let manifest: StandardsManifest = read_json(&data_dir.join(STANDARDS_MANIFEST_FILE)).await?;
    let tables: TableRegistry = read_json(&data_dir.join(STANDARDS_TABLES_FILE)).await?;
    let reference: Vec<ReferenceTable> = read_json(&data_dir.join(REFERENCE_FILE)).await?;

    check_registry_keys(&tables)?;

    let mut messages = BTreeMap::new();
    for &locale in locales {
        let path = data_dir.join(MESSAGES_DIR).join(format!("{locale}.json"));
        match read_json::<Messages>(&path).await {
            Ok(catalog) => {
                messages.insert(locale, catalog);
            }
            Err(SearchIndexError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "message catalog not found, using catalog titles");
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        tools = catalog.tools.len(),
        categories = manifest.categories.len(),
        tables = tables.len(),
        reference_tables = reference.len(),
        "site data loaded"
    );

    Ok(SiteData {
        catalog,
        messages,
        manifest,
        tables,
        reference,
    })
}

/// Registry keys are what the manifest references; they must match the ids
/// used in rendered anchors.
fn check_registry_keys(tables: &TableRegistry) -> Result<()> {
    for (key, table) in tables {
        if key != &table.id {
            return Err(SearchIndexError::validation(format!(
                "table registry key '{key}' holds table '{}'",
                table.id
            )));
        }
    }
    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SearchIndexError::io(path, e))?;

    let value = serde_json::from_str(&content)
        .map_err(|e| SearchIndexError::parse(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), "loaded data file");
    Ok(value)
}

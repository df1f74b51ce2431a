//! Build-time contract checks.
//!
//! Both checks collect every violation before failing so one build attempt
//! reports the whole list.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use sitesearch_content::ContentRepository;
use sitesearch_shared::{Locale, Result, SearchIndexError};

use crate::standards::StandardsManifest;
use crate::tables::TableRegistry;
use crate::tool_doc::ToolDocStandard;

/// Directory under the content root holding tool docs.
pub const TOOL_DOCS_DIR: &str = "tools";

/// Every `(category, tableId)` pair in the manifest must name a registered table.
///
/// Violations are reported as `"<category.slug> -> <tableId>"`.
#[instrument(skip_all, fields(categories = manifest.categories.len(), tables = registry.len()))]
pub fn validate_manifest(manifest: &StandardsManifest, registry: &TableRegistry) -> Result<()> {
    let mut violations = Vec::new();
    for category in &manifest.categories {
        for table_id in &category.tables {
            if !registry.contains_key(table_id) {
                violations.push(format!("{} -> {table_id}", category.slug));
            }
        }
    }

    if !violations.is_empty() {
        warn!(count = violations.len(), "standards manifest references unknown tables");
        return Err(SearchIndexError::Manifest { violations });
    }

    debug!("standards manifest consistent with table registry");
    Ok(())
}

/// Path of the doc for `tool_id` in `locale`.
pub fn tool_doc_path(content_root: &Path, tool_id: &str, locale: Locale) -> PathBuf {
    content_root
        .join(TOOL_DOCS_DIR)
        .join(format!("{tool_id}.{locale}.json"))
}

/// Every active tool must have a schema-valid doc for every locale.
///
/// Missing, unparseable, and shape-invalid docs are all reported the same way,
/// as `"<id> (<locale>)"`. Unexpected I/O errors propagate unchanged.
#[instrument(skip_all, fields(tools = active_tool_ids.len(), locales = locales.len()))]
pub async fn validate_tool_docs<R: ContentRepository>(
    repo: &R,
    content_root: &Path,
    active_tool_ids: &[String],
    locales: &[Locale],
) -> Result<()> {
    let mut violations = Vec::new();

    for tool_id in active_tool_ids {
        for &locale in locales {
            let path = tool_doc_path(content_root, tool_id, locale);
            let reason = match repo.read_to_string(&path).await {
                Ok(None) => Some("file not found".to_string()),
                Ok(Some(source)) => ToolDocStandard::parse(&source).err(),
                Err(SearchIndexError::Io { source, .. })
                    if source.kind() == ErrorKind::InvalidData =>
                {
                    Some(format!("unreadable: {source}"))
                }
                Err(e) => return Err(e),
            };

            if let Some(reason) = reason {
                debug!(tool = %tool_id, %locale, path = %path.display(), %reason, "invalid tool doc");
                violations.push(format!("{tool_id} ({locale})"));
            }
        }
    }

    if !violations.is_empty() {
        warn!(count = violations.len(), "active tools without a valid doc");
        return Err(SearchIndexError::ToolDocs { violations });
    }

    info!(checked = active_tool_ids.len() * locales.len(), "tool docs valid");
    Ok(())
}

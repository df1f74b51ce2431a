//! Search index assembler and writer.
//!
//! Takes every adapter's items for one locale, merges them into a single
//! ordered [`SearchIndexData`], then writes `search-index.<locale>.json`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use sitesearch_shared::{Locale, Result, SearchIndexData, SearchIndexError, SearchIndexItem};

use crate::normalize::normalize;
use crate::standards::StandardsItems;

/// Every adapter's output for one locale.
#[derive(Debug, Clone, Default)]
pub struct IndexParts {
    pub tools: Vec<SearchIndexItem>,
    pub standards: StandardsItems,
    pub reference: Vec<SearchIndexItem>,
    pub blog: Vec<SearchIndexItem>,
    pub guides: Vec<SearchIndexItem>,
    pub glossary: Vec<SearchIndexItem>,
}

/// Output file name for a locale's index.
pub fn index_file_name(locale: Locale) -> String {
    format!("search-index.{locale}.json")
}

/// Merge a locale's parts into one index stamped with the current time.
pub fn assemble(locale: Locale, parts: IndexParts) -> SearchIndexData {
    assemble_at(locale, parts, Utc::now())
}

/// Merge a locale's parts into one index.
///
/// Order: tools, standards hub and categories, reference rows, standards
/// rows, blog, guides, glossary. Ids are made unique and every item gets a
/// non-empty `searchText`.
#[instrument(skip_all, fields(locale = %locale))]
pub fn assemble_at(locale: Locale, parts: IndexParts, updated_at: DateTime<Utc>) -> SearchIndexData {
    let IndexParts {
        tools,
        standards,
        reference,
        blog,
        guides,
        glossary,
    } = parts;

    let mut items: Vec<SearchIndexItem> = tools
        .into_iter()
        .chain(standards.overview)
        .chain(reference)
        .chain(standards.rows)
        .chain(blog)
        .chain(guides)
        .chain(glossary)
        .collect();

    ensure_unique_ids(&mut items);
    for item in &mut items {
        if item.search_text.is_empty() {
            item.search_text = normalize(&item.id);
        }
    }

    info!(items = items.len(), "index assembled");

    SearchIndexData {
        locale,
        updated_at,
        items,
    }
}

/// Rename later duplicates to `<id>~2`, `<id>~3`, ... The first keeps its id.
fn ensure_unique_ids(items: &mut [SearchIndexItem]) {
    let mut taken: HashSet<String> = HashSet::with_capacity(items.len());

    for item in items.iter_mut() {
        if taken.insert(item.id.clone()) {
            continue;
        }

        let base = item.id.clone();
        let mut n = 2;
        let unique = loop {
            let candidate = format!("{base}~{n}");
            if !taken.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };

        warn!(id = %base, renamed = %unique, "duplicate index id");
        taken.insert(unique.clone());
        item.id = unique;
    }
}

/// Write `search-index.<locale>.json` into `output_dir`.
///
/// The whole document is written to a hidden temp file and renamed over the
/// target, so readers never see a partial index.
#[instrument(skip_all, fields(locale = %index.locale, items = index.items.len()))]
pub async fn write_index(index: &SearchIndexData, output_dir: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| SearchIndexError::io(output_dir, e))?;

    let mut json = serde_json::to_string_pretty(index)
        .map_err(|e| SearchIndexError::Serialize(e.to_string()))?;
    json.push('\n');

    let file_name = index_file_name(index.locale);
    let target = output_dir.join(&file_name);
    let temp = output_dir.join(format!(".{file_name}.tmp"));

    tokio::fs::write(&temp, json.as_bytes())
        .await
        .map_err(|e| SearchIndexError::io(&temp, e))?;
    if let Err(e) = tokio::fs::rename(&temp, &target).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(SearchIndexError::io(&target, e));
    }

    debug!(path = %target.display(), bytes = json.len(), "wrote search index");
    Ok(target)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Reference tables (materials, threads, friction, fits, units) and their
//! index adapter. Each row becomes its own index item.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use sitesearch_shared::{ItemType, Locale, SearchIndexItem};

use crate::normalize::{build_search_text, localize_href};
use crate::tables::StandardsTable;

/// A reference table plus the page that renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
    /// Page route without locale prefix (`/reference/materials`).
    pub href: String,
    #[serde(flatten)]
    pub table: StandardsTable,
}

/// One index item per reference row.
#[instrument(skip_all, fields(locale = %locale, tables = tables.len()))]
pub fn reference_items(tables: &[ReferenceTable], locale: Locale) -> Vec<SearchIndexItem> {
    let mut items = Vec::new();

    for reference in tables {
        let table = &reference.table;
        let table_title = table.title.get(locale);
        let href = localize_href(locale, &format!("{}#{}", reference.href, table.id));

        for (index, row) in table.rows.iter().enumerate() {
            let Some(title) = table.row_title(row, locale) else {
                debug!(table = %table.id, row = index, "reference row without a name, skipped");
                continue;
            };

            let keywords = table.row_keywords(row, locale);
            let search_text = build_search_text(
                [title.as_str(), table_title]
                    .into_iter()
                    .chain(keywords.iter().map(String::as_str)),
            );

            items.push(SearchIndexItem {
                id: format!("reference:{}:{title}", table.id),
                item_type: ItemType::Reference,
                title,
                description: Some(table_title.to_string()),
                href: href.clone(),
                search_text,
                tags: Vec::new(),
                keywords,
                locale_titles: table.row_locale_titles(row),
            });
        }
    }

    debug!(count = items.len(), "reference items built");
    items
}

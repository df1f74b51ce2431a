//! Data tables shared by the standards registry and the reference pages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sitesearch_shared::{CellValue, Locale, LocalizedText};

use crate::normalize::dedupe;

/// A loosely-typed row keyed by column `key`.
pub type Row = BTreeMap<String, CellValue>;

/// `tableId → table`, as loaded from `data/standards/tables.json`.
pub type TableRegistry = BTreeMap<String, StandardsTable>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub key: String,
    pub label: LocalizedText,
}

/// A titled table of rows, rendered on a standards or reference page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardsTable {
    pub id: String,
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CellValue>,
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<CellValue>,
}

impl StandardsTable {
    /// The row's first-column value, which names the row.
    pub fn row_title(&self, row: &Row, locale: Locale) -> Option<String> {
        self.first_cell(row)?.resolve(locale)
    }

    /// Both locales' names for the row, when the first column is localized.
    pub fn row_locale_titles(&self, row: &Row) -> BTreeMap<Locale, String> {
        self.first_cell(row)
            .and_then(CellValue::localized)
            .map(LocalizedText::to_map)
            .unwrap_or_default()
    }

    /// Every human-visible string tied to a row: the table title, the row
    /// name, every other column value, then the table description and note.
    pub fn row_keywords(&self, row: &Row, locale: Locale) -> Vec<String> {
        let mut keywords = vec![self.title.get(locale).to_string()];
        keywords.extend(
            self.columns
                .iter()
                .filter_map(|column| row.get(&column.key)?.resolve(locale)),
        );
        keywords.extend(self.description.as_ref().and_then(|d| d.resolve(locale)));
        keywords.extend(self.note.as_ref().and_then(|n| n.resolve(locale)));
        dedupe(keywords)
    }

    fn first_cell<'a>(&self, row: &'a Row) -> Option<&'a CellValue> {
        let first = self.columns.first()?;
        row.get(&first.key)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// ISO 898-1 property classes, trimmed to two rows.
    pub(crate) fn property_classes() -> StandardsTable {
        serde_json::from_str(
            r#"{
                "id": "iso-898-1-property-classes",
                "title": { "tr": "Cıvata Mukavemet Sınıfları", "en": "Bolt Property Classes" },
                "description": { "tr": "Çekme ve akma dayanımları", "en": "Tensile and yield strengths" },
                "columns": [
                    { "key": "class", "label": { "tr": "Sınıf", "en": "Class" } },
                    { "key": "rm", "label": { "tr": "Rm (MPa)", "en": "Rm (MPa)" } },
                    { "key": "use", "label": { "tr": "Kullanım", "en": "Use" } }
                ],
                "rows": [
                    { "class": "8.8", "rm": 800, "use": { "tr": "Genel makine", "en": "General machinery" } },
                    { "class": "10.9", "rm": 1000, "use": { "tr": "Yüksek yük", "en": "High load" } }
                ],
                "note": "ISO 898-1:2013"
            }"#,
        )
        .expect("valid table fixture")
    }
}

//! Core domain types for the search index.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchIndexError;

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

/// A site locale. Every locale gets its own independent index file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Tr,
    En,
}

impl Locale {
    /// Every locale the site ships, in build order.
    pub const ALL: [Locale; 2] = [Locale::Tr, Locale::En];

    /// The lowercase locale code used in paths and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tr => "tr",
            Self::En => "en",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = SearchIndexError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tr" => Ok(Self::Tr),
            "en" => Ok(Self::En),
            other => Err(SearchIndexError::config(format!(
                "unsupported locale '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// LocalizedText / CellValue
// ---------------------------------------------------------------------------

/// A string authored once per locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub tr: String,
    pub en: String,
}

impl LocalizedText {
    pub fn new(tr: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            tr: tr.into(),
            en: en.into(),
        }
    }

    /// The text for `locale`.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Tr => &self.tr,
            Locale::En => &self.en,
        }
    }

    /// Per-locale map, used for `localeTitles`.
    pub fn to_map(&self) -> BTreeMap<Locale, String> {
        Locale::ALL
            .iter()
            .map(|&locale| (locale, self.get(locale).to_string()))
            .collect()
    }
}

/// A single value in a data-table row.
///
/// Rows are loosely typed: a cell is either authored per locale or is a plain
/// scalar. Resolve it with [`CellValue::resolve`] rather than inspecting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Localized(LocalizedText),
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

impl CellValue {
    /// Human-visible text for `locale`. Blank values and `null` resolve to `None`.
    pub fn resolve(&self, locale: Locale) -> Option<String> {
        let text = match self {
            Self::Localized(text) => text.get(locale).to_string(),
            Self::Text(text) => text.clone(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Null => return None,
        };
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// The per-locale text, if this cell was authored per locale.
    pub fn localized(&self) -> Option<&LocalizedText> {
        match self {
            Self::Localized(text) => Some(text),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Search index
// ---------------------------------------------------------------------------

/// The kind of entity an index item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Tool,
    Standard,
    Reference,
    Blog,
    Guide,
    Glossary,
}

/// One searchable entity in a locale's index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexItem {
    /// Source-namespaced identifier, unique within one index (`tool:<id>`, `blog:<slug>`, ...).
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Site-relative, locale-prefixed link.
    pub href: String,
    /// Normalized text the client-side search matches against.
    pub search_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub locale_titles: BTreeMap<Locale, String>,
}

/// Root structure of `search-index.<locale>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexData {
    pub locale: Locale,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<SearchIndexItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_roundtrip() {
        for locale in Locale::ALL {
            let parsed: Locale = locale.to_string().parse().expect("parse locale");
            assert_eq!(parsed, locale);
        }
        assert!("de".parse::<Locale>().is_err());
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
    }

    #[test]
    fn cell_value_variants_deserialize() {
        let row: BTreeMap<String, CellValue> = serde_json::from_str(
            r#"{
                "name": { "tr": "Çelik", "en": "Steel" },
                "grade": "S235",
                "modulus": 210,
                "magnetic": true,
                "note": null
            }"#,
        )
        .expect("deserialize row");

        assert_eq!(row["name"].resolve(Locale::Tr).as_deref(), Some("Çelik"));
        assert_eq!(row["name"].resolve(Locale::En).as_deref(), Some("Steel"));
        assert_eq!(row["grade"].resolve(Locale::En).as_deref(), Some("S235"));
        assert_eq!(row["modulus"].resolve(Locale::En).as_deref(), Some("210"));
        assert_eq!(row["magnetic"].resolve(Locale::Tr).as_deref(), Some("true"));
        assert_eq!(row["note"].resolve(Locale::Tr), None);
        assert!(row["name"].localized().is_some());
        assert!(row["grade"].localized().is_none());
    }

    #[test]
    fn blank_cells_resolve_to_none() {
        assert_eq!(CellValue::Text("   ".into()).resolve(Locale::En), None);
        let half = CellValue::Localized(LocalizedText::new("Somun", ""));
        assert_eq!(half.resolve(Locale::En), None);
        assert_eq!(half.resolve(Locale::Tr).as_deref(), Some("Somun"));
    }

    #[test]
    fn item_serializes_camel_case_and_skips_empty() {
        let item = SearchIndexItem {
            id: "tool:bolt-calculator".into(),
            item_type: ItemType::Tool,
            title: "Bolt Calculator".into(),
            description: None,
            href: "/en/tools/bolt-calculator".into(),
            search_text: "bolt calculator".into(),
            tags: vec![],
            keywords: vec![],
            locale_titles: BTreeMap::new(),
        };

        let value = serde_json::to_value(&item).expect("serialize");
        assert_eq!(value["type"], "tool");
        assert_eq!(value["searchText"], "bolt calculator");
        assert!(value.get("description").is_none());
        assert!(value.get("tags").is_none());
        assert!(value.get("localeTitles").is_none());
    }

    #[test]
    fn index_data_roundtrip() {
        let data = SearchIndexData {
            locale: Locale::Tr,
            updated_at: Utc::now(),
            items: vec![SearchIndexItem {
                id: "blog:civata-secimi".into(),
                item_type: ItemType::Blog,
                title: "Cıvata Seçimi".into(),
                description: Some("Doğru cıvata nasıl seçilir".into()),
                href: "/tr/blog/civata-secimi".into(),
                search_text: "civata secimi".into(),
                tags: vec!["civata".into()],
                keywords: vec![],
                locale_titles: LocalizedText::new("Cıvata Seçimi", "Bolt Selection").to_map(),
            }],
        };

        let json = serde_json::to_string_pretty(&data).expect("serialize");
        assert!(json.contains("\"updatedAt\""));
        assert!(json.contains("\"localeTitles\""));
        let parsed: SearchIndexData = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, data);
    }
}

//! Tool catalog and its index adapter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use sitesearch_shared::{ItemType, Locale, LocalizedText, SearchIndexItem};

use crate::normalize::{build_search_text, dedupe, localize_href};

/// One tool page as listed in `data/catalog.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: String,
    /// Site route without locale prefix (`/tools/bolt-calculator`).
    pub href: String,
    /// Tool family: calculator, converter, panel, form...
    #[serde(rename = "type")]
    pub kind: String,
    /// Canonical (Turkish) title.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Root of `data/catalog.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCatalog {
    pub tools: Vec<Tool>,
}

/// One locale's i18n message catalog: an opaque key → string table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages(BTreeMap<String, String>);

impl Messages {
    pub const fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Non-blank message for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Localized copy shown for a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCopy {
    pub title: String,
    pub description: Option<String>,
}

/// Resolve a tool's title and description for `locale`.
///
/// Messages (`tools.<id>.title`, `tools.<id>.description`) win; otherwise the
/// catalog title is used (`titleEn` for English when present).
pub fn get_tool_copy(tool: &Tool, locale: Locale, messages: &Messages) -> ToolCopy {
    let title = messages
        .get(&format!("tools.{}.title", tool.id))
        .map(String::from)
        .unwrap_or_else(|| match (locale, &tool.title_en) {
            (Locale::En, Some(en)) if !en.trim().is_empty() => en.clone(),
            _ => tool.title.clone(),
        });

    let description = messages
        .get(&format!("tools.{}.description", tool.id))
        .map(String::from);

    ToolCopy { title, description }
}

/// One index item per tool.
#[instrument(skip_all, fields(locale = %locale, tools = catalog.tools.len()))]
pub fn tool_items(catalog: &ToolCatalog, messages: &Messages, locale: Locale) -> Vec<SearchIndexItem> {
    let items: Vec<SearchIndexItem> = catalog
        .tools
        .iter()
        .map(|tool| tool_item(tool, messages, locale))
        .collect();

    debug!(count = items.len(), "tool items built");
    items
}

fn tool_item(tool: &Tool, messages: &Messages, locale: Locale) -> SearchIndexItem {
    let copy = get_tool_copy(tool, locale, messages);
    let tags = dedupe(&tool.tags);

    let mut keywords = vec![tool.kind.clone(), tool.title.clone()];
    keywords.extend(tool.category.clone());
    keywords.extend(tool.title_en.clone());
    let keywords = dedupe(keywords);

    let search_text = build_search_text(
        [copy.title.as_str(), copy.description.as_deref().unwrap_or_default()]
            .into_iter()
            .chain(tags.iter().map(String::as_str))
            .chain(keywords.iter().map(String::as_str)),
    );

    let locale_titles = tool
        .title_en
        .as_ref()
        .map(|en| LocalizedText::new(tool.title.clone(), en.clone()).to_map())
        .unwrap_or_default();

    SearchIndexItem {
        id: format!("tool:{}", tool.id),
        item_type: ItemType::Tool,
        title: copy.title,
        description: copy.description,
        href: localize_href(locale, &tool.href),
        search_text,
        tags,
        keywords,
        locale_titles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bolt_tool() -> Tool {
        Tool {
            id: "bolt-calculator".into(),
            href: "/tools/bolt-calculator".into(),
            kind: "calculator".into(),
            title: "Cıvata Hesaplayıcı".into(),
            title_en: Some("Bolt Calculator".into()),
            tags: vec!["bolt".into(), "torque".into(), "bolt".into()],
            category: Some("fasteners".into()),
        }
    }

    #[test]
    fn english_bolt_calculator_item() {
        let catalog = ToolCatalog {
            tools: vec![bolt_tool()],
        };
        let items = tool_items(&catalog, &Messages::default(), Locale::En);

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.id, "tool:bolt-calculator");
        assert_eq!(item.item_type, ItemType::Tool);
        assert_eq!(item.href, "/en/tools/bolt-calculator");
        assert_eq!(item.title, "Bolt Calculator");
        assert_eq!(item.tags, vec!["bolt", "torque"]);
        assert!(item.search_text.contains("bolt"));
        assert!(item.search_text.contains("torque"));
        // Turkish title stays searchable from the English index.
        assert!(item.search_text.contains("civata hesaplayici"));
        assert_eq!(item.locale_titles.get(&Locale::Tr).map(String::as_str), Some("Cıvata Hesaplayıcı"));
    }

    #[test]
    fn messages_override_catalog_title() {
        let messages = Messages::from_pairs([
            ("tools.bolt-calculator.title", "Cıvata Ön Yük Hesabı"),
            ("tools.bolt-calculator.description", "M3–M36 cıvatalar için tork"),
        ]);
        let copy = get_tool_copy(&bolt_tool(), Locale::Tr, &messages);
        assert_eq!(copy.title, "Cıvata Ön Yük Hesabı");
        assert_eq!(copy.description.as_deref(), Some("M3–M36 cıvatalar için tork"));
    }

    #[test]
    fn turkish_falls_back_to_canonical_title() {
        let copy = get_tool_copy(&bolt_tool(), Locale::Tr, &Messages::default());
        assert_eq!(copy.title, "Cıvata Hesaplayıcı");
        assert!(copy.description.is_none());

        let mut tool = bolt_tool();
        tool.title_en = None;
        let copy = get_tool_copy(&tool, Locale::En, &Messages::default());
        assert_eq!(copy.title, "Cıvata Hesaplayıcı");
    }

    #[test]
    fn blank_message_ignored() {
        let messages = Messages::from_pairs([("tools.bolt-calculator.title", "  ")]);
        assert!(messages.get("tools.bolt-calculator.title").is_none());
        let copy = get_tool_copy(&bolt_tool(), Locale::En, &messages);
        assert_eq!(copy.title, "Bolt Calculator");
    }

    #[test]
    fn catalog_deserializes() {
        let catalog: ToolCatalog = serde_json::from_str(
            r#"{ "tools": [
                { "id": "unit-converter", "href": "/tools/unit-converter", "type": "converter", "title": "Birim Çevirici" }
            ] }"#,
        )
        .expect("parse catalog");
        assert_eq!(catalog.tools[0].kind, "converter");
        assert!(catalog.tools[0].tags.is_empty());
    }
}

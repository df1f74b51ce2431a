//! Standards manifest and its index adapter.
//!
//! The standards section is a hub page, one page per category, and the rows
//! of every table those categories include. All three tiers are indexed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use sitesearch_shared::{ItemType, Locale, LocalizedText, SearchIndexItem};

use crate::normalize::{build_search_text, dedupe, localize_href};
use crate::tables::TableRegistry;

/// Route of the standards hub page, before locale prefixing.
pub const STANDARDS_ROUTE: &str = "/standards";

/// Copy for the standards landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardsHub {
    pub title: LocalizedText,
    pub description: LocalizedText,
}

/// One standards category page and the tables it includes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardsCategory {
    pub id: String,
    pub slug: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    /// Keys into the table registry, in display order.
    pub tables: Vec<String>,
    /// Standards documents the category draws on (`ISO 898-1`, `DIN 912`...).
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Root of `data/standards/manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardsManifest {
    pub version: u32,
    pub hub: StandardsHub,
    pub categories: Vec<StandardsCategory>,
}

/// Words users type when they mean "standard(s)", per locale.
///
/// Both vocabularies are attached in both locales so a Turkish user typing the
/// English term (and the reverse) still lands on standards pages.
pub fn standard_synonyms(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::Tr => &["standart", "standartlar", "norm", "normlar", "standard", "standards"],
        Locale::En => &["standard", "standards", "norm", "specification", "standart", "standartlar"],
    }
}

/// Standards output, split so the assembler can interleave reference rows
/// between the overview pages and the table rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardsItems {
    /// Hub item followed by one item per category.
    pub overview: Vec<SearchIndexItem>,
    /// One item per row of every referenced table.
    pub rows: Vec<SearchIndexItem>,
}

/// Build all standards-tier items for `locale`.
///
/// A table included by several categories is emitted once, under the first
/// category that includes it.
#[instrument(skip_all, fields(locale = %locale, categories = manifest.categories.len()))]
pub fn standards_items(
    manifest: &StandardsManifest,
    registry: &TableRegistry,
    locale: Locale,
) -> StandardsItems {
    let tags = synonym_tags(locale);

    let mut overview = vec![hub_item(manifest, locale, &tags)];
    overview.extend(
        manifest
            .categories
            .iter()
            .map(|category| category_item(category, registry, locale, &tags)),
    );

    let mut rows = Vec::new();
    let mut emitted: HashSet<&str> = HashSet::new();

    for category in &manifest.categories {
        let category_title = category.title.get(locale);
        let href = localize_href(locale, &format!("{STANDARDS_ROUTE}/{}", category.slug));

        for table_id in &category.tables {
            if !emitted.insert(table_id.as_str()) {
                debug!(table = %table_id, category = %category.slug, "table already indexed");
                continue;
            }
            let Some(table) = registry.get(table_id) else {
                warn!(table = %table_id, category = %category.slug, "table missing from registry");
                continue;
            };
            let table_title = table.title.get(locale);

            for (index, row) in table.rows.iter().enumerate() {
                let Some(title) = table.row_title(row, locale) else {
                    debug!(table = %table_id, row = index, "standards row without a name, skipped");
                    continue;
                };

                let mut keywords = table.row_keywords(row, locale);
                keywords.push(category_title.to_string());
                keywords.extend(category.sources.iter().cloned());
                let keywords = dedupe(keywords);

                let description = format!("{table_title} · {category_title}");
                let search_text = build_search_text(
                    [title.as_str(), description.as_str()]
                        .into_iter()
                        .chain(tags.iter().map(String::as_str))
                        .chain(keywords.iter().map(String::as_str)),
                );

                rows.push(SearchIndexItem {
                    id: format!("standards:{table_id}:{title}"),
                    item_type: ItemType::Standard,
                    title,
                    description: Some(description),
                    href: format!("{href}#{table_id}"),
                    search_text,
                    tags: tags.clone(),
                    keywords,
                    locale_titles: table.row_locale_titles(row),
                });
            }
        }
    }

    debug!(overview = overview.len(), rows = rows.len(), "standards items built");
    StandardsItems { overview, rows }
}

fn synonym_tags(locale: Locale) -> Vec<String> {
    standard_synonyms(locale).iter().map(|s| s.to_string()).collect()
}

fn hub_item(manifest: &StandardsManifest, locale: Locale, tags: &[String]) -> SearchIndexItem {
    let title = manifest.hub.title.get(locale).to_string();
    let description = manifest.hub.description.get(locale).to_string();
    let keywords = dedupe(manifest.categories.iter().map(|c| c.title.get(locale)));

    let search_text = build_search_text(
        [title.as_str(), description.as_str()]
            .into_iter()
            .chain(tags.iter().map(String::as_str))
            .chain(keywords.iter().map(String::as_str)),
    );

    SearchIndexItem {
        id: "standards:hub".to_string(),
        item_type: ItemType::Standard,
        title,
        description: Some(description).filter(|d| !d.trim().is_empty()),
        href: localize_href(locale, STANDARDS_ROUTE),
        search_text,
        tags: tags.to_vec(),
        keywords,
        locale_titles: manifest.hub.title.to_map(),
    }
}

fn category_item(
    category: &StandardsCategory,
    registry: &TableRegistry,
    locale: Locale,
    tags: &[String],
) -> SearchIndexItem {
    let title = category.title.get(locale).to_string();
    let description = category.description.get(locale).to_string();

    let table_titles = category
        .tables
        .iter()
        .filter_map(|id| registry.get(id))
        .map(|table| table.title.get(locale).to_string());
    let keywords = dedupe(category.sources.iter().cloned().chain(table_titles));

    let search_text = build_search_text(
        [title.as_str(), description.as_str()]
            .into_iter()
            .chain(tags.iter().map(String::as_str))
            .chain(keywords.iter().map(String::as_str)),
    );

    SearchIndexItem {
        id: format!("standards:category:{}", category.slug),
        item_type: ItemType::Standard,
        title,
        description: Some(description).filter(|d| !d.trim().is_empty()),
        href: localize_href(locale, &format!("{STANDARDS_ROUTE}/{}", category.slug)),
        search_text,
        tags: tags.to_vec(),
        keywords,
        locale_titles: category.title.to_map(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::tables::fixtures::property_classes;

    pub(crate) fn manifest() -> StandardsManifest {
        serde_json::from_str(
            r#"{
                "version": 1,
                "hub": {
                    "title": { "tr": "Standartlar", "en": "Standards" },
                    "description": { "tr": "Mühendislik standart tabloları", "en": "Engineering standards tables" }
                },
                "categories": [
                    {
                        "id": "fasteners",
                        "slug": "baglanti-elemanlari",
                        "title": { "tr": "Bağlantı Elemanları", "en": "Fasteners" },
                        "description": { "tr": "Cıvata ve somunlar", "en": "Bolts and nuts" },
                        "tables": ["iso-898-1-property-classes"],
                        "sources": ["ISO 898-1"]
                    },
                    {
                        "id": "materials",
                        "slug": "malzemeler",
                        "title": { "tr": "Malzemeler", "en": "Materials" },
                        "description": { "tr": "Malzeme standartları", "en": "Material standards" },
                        "tables": ["iso-898-1-property-classes"],
                        "sources": []
                    }
                ]
            }"#,
        )
        .expect("valid manifest fixture")
    }

    pub(crate) fn registry() -> TableRegistry {
        let table = property_classes();
        [(table.id.clone(), table)].into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{manifest, registry};
    use super::*;

    #[test]
    fn hub_and_categories_come_first() {
        let items = standards_items(&manifest(), &registry(), Locale::En);

        let ids: Vec<&str> = items.overview.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "standards:hub",
                "standards:category:baglanti-elemanlari",
                "standards:category:malzemeler",
            ]
        );
        assert_eq!(items.overview[0].href, "/en/standards");
        assert_eq!(items.overview[1].href, "/en/standards/baglanti-elemanlari");
        assert!(items.overview[1].keywords.contains(&"ISO 898-1".to_string()));
        assert!(items.overview[1].keywords.contains(&"Bolt Property Classes".to_string()));
    }

    #[test]
    fn shared_table_rows_emitted_once_under_first_category() {
        let items = standards_items(&manifest(), &registry(), Locale::En);

        assert_eq!(items.rows.len(), 2);
        let row = &items.rows[0];
        assert_eq!(row.id, "standards:iso-898-1-property-classes:8.8");
        assert_eq!(
            row.description.as_deref(),
            Some("Bolt Property Classes · Fasteners")
        );
        assert_eq!(
            row.href,
            "/en/standards/baglanti-elemanlari#iso-898-1-property-classes"
        );
        assert!(row.search_text.contains("general machinery"));
        assert!(row.search_text.contains("iso 898-1"));
    }

    #[test]
    fn every_item_carries_synonyms() {
        for locale in Locale::ALL {
            let items = standards_items(&manifest(), &registry(), locale);
            for item in items.overview.iter().chain(items.rows.iter()) {
                assert_eq!(item.item_type, ItemType::Standard);
                for synonym in standard_synonyms(locale) {
                    assert!(item.tags.iter().any(|t| t == synonym), "{} lacks {synonym}", item.id);
                    assert!(item.search_text.contains(synonym));
                }
            }
        }
    }

    #[test]
    fn turkish_row_mentions_owning_category() {
        let items = standards_items(&manifest(), &registry(), Locale::Tr);
        let row = &items.rows[1];
        assert_eq!(row.title, "10.9");
        assert!(row.search_text.contains("baglanti elemanlari"));
        assert!(row.search_text.contains("yuksek yuk"));
    }

    #[test]
    fn missing_table_is_skipped_by_the_adapter() {
        let mut manifest = manifest();
        manifest.categories[0].tables = vec!["does-not-exist".into()];
        manifest.categories[1].tables.clear();
        let items = standards_items(&manifest, &registry(), Locale::En);
        assert_eq!(items.overview.len(), 3);
        assert!(items.rows.is_empty());
    }
}

//! Index items for blog posts, guides, and glossary entries.

use sitesearch_content::{ContentKind, ContentSummary};
use sitesearch_shared::{Locale, SearchIndexItem};

use crate::normalize::{build_search_text, dedupe, localize_href};

/// One index item per publishable content entry.
pub fn content_items(
    kind: ContentKind,
    locale: Locale,
    summaries: &[ContentSummary],
) -> Vec<SearchIndexItem> {
    summaries
        .iter()
        .map(|summary| content_item(kind, locale, summary))
        .collect()
}

fn content_item(kind: ContentKind, locale: Locale, summary: &ContentSummary) -> SearchIndexItem {
    let tags = dedupe(&summary.tags);
    let keywords = dedupe(summary.category.iter());

    let search_text = build_search_text(
        [summary.title.as_str(), summary.description.as_str()]
            .into_iter()
            .chain(tags.iter().map(String::as_str))
            .chain(keywords.iter().map(String::as_str)),
    );

    SearchIndexItem {
        id: format!("{}:{}", kind.id_prefix(), summary.slug),
        item_type: kind.item_type(),
        title: summary.title.clone(),
        description: Some(summary.description.clone()),
        href: localize_href(locale, &kind.route(&summary.slug)),
        search_text,
        tags,
        keywords,
        locale_titles: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use sitesearch_shared::ItemType;

    use super::*;

    #[test]
    fn guide_item_shape() {
        let summary = ContentSummary {
            slug: "disli-oranlari".into(),
            title: "Dişli Oranları".into(),
            description: "Doğru oranı seçmek".into(),
            tags: vec!["dişli".into(), "dişli".into(), "güç aktarımı".into()],
            category: Some("Tahrik".into()),
        };

        let items = content_items(ContentKind::Guides, Locale::Tr, &[summary]);
        let item = &items[0];
        assert_eq!(item.id, "guide:disli-oranlari");
        assert_eq!(item.item_type, ItemType::Guide);
        assert_eq!(item.href, "/tr/guides/disli-oranlari");
        assert_eq!(item.tags, vec!["dişli", "güç aktarımı"]);
        assert_eq!(item.keywords, vec!["Tahrik"]);
        assert_eq!(
            item.search_text,
            "disli oranlari dogru orani secmek disli guc aktarimi tahrik"
        );
    }
}

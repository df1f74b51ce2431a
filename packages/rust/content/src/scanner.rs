//! Content directory scanner.
//!
//! Lists one content kind for one locale and turns every publishable file into
//! a [`ContentSummary`].

use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use sitesearch_shared::{ItemType, Locale, Result, SearchIndexError};

use crate::frontmatter::parse_frontmatter;
use crate::repository::ContentRepository;

/// The frontmatter-driven content collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Blog,
    Guides,
    Glossary,
}

impl ContentKind {
    /// Every kind, in index order.
    pub const ALL: [ContentKind; 3] = [ContentKind::Blog, ContentKind::Guides, ContentKind::Glossary];

    /// Directory name under the content root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Guides => "guides",
            Self::Glossary => "glossary",
        }
    }

    /// Namespace used in index item ids (`guide:<slug>`).
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Guides => "guide",
            Self::Glossary => "glossary",
        }
    }

    /// Site route for an entry, before locale prefixing.
    pub fn route(&self, slug: &str) -> String {
        format!("/{}/{slug}", self.dir_name())
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Blog => ItemType::Blog,
            Self::Guides => ItemType::Guide,
            Self::Glossary => ItemType::Glossary,
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Publishable metadata of one content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
}

/// `<slug>.<locale>.md` or `<slug>.<locale>.mdx`.
static CONTENT_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<slug>.+)\.(?P<locale>[a-z]{2})\.mdx?$").expect("valid regex")
});

/// List the publishable entries of `kind` for `locale`.
///
/// A missing kind directory yields an empty list. Files without a title or
/// description, with unreadable frontmatter, or marked `draft` are skipped.
/// Other I/O errors propagate.
#[instrument(skip_all, fields(kind = %kind, locale = %locale))]
pub async fn list_content<R: ContentRepository>(
    repo: &R,
    content_root: &Path,
    kind: ContentKind,
    locale: Locale,
) -> Result<Vec<ContentSummary>> {
    let dir = content_root.join(kind.dir_name());

    let Some(mut names) = repo.list_files(&dir).await? else {
        debug!(dir = %dir.display(), "content directory absent, no entries");
        return Ok(Vec::new());
    };
    names.sort();

    let mut summaries = Vec::new();
    for name in names {
        let Some(caps) = CONTENT_FILE_RE.captures(&name) else {
            continue;
        };
        if &caps["locale"] != locale.as_str() {
            continue;
        }
        let slug = caps["slug"].to_string();

        let path = dir.join(&name);
        let source = match repo.read_to_string(&path).await {
            Ok(Some(source)) => source,
            // Vanished between listing and reading: nothing to index.
            Ok(None) => continue,
            Err(SearchIndexError::Io { source, .. }) if source.kind() == ErrorKind::InvalidData => {
                debug!(file = %name, "skipping content file that is not UTF-8");
                continue;
            }
            Err(e) => return Err(e),
        };

        if let Some(summary) = summarize(slug, &source, &name) {
            summaries.push(summary);
        }
    }

    debug!(count = summaries.len(), "content listed");
    Ok(summaries)
}

fn summarize(slug: String, source: &str, file: &str) -> Option<ContentSummary> {
    let fm = match parse_frontmatter(source) {
        Ok(fm) => fm,
        Err(e) => {
            debug!(file, error = %e, "skipping content file");
            return None;
        }
    };

    if fm.draft {
        debug!(file, "skipping draft");
        return None;
    }

    let title = non_empty(fm.title);
    let description = non_empty(fm.description);
    let (Some(title), Some(description)) = (title, description) else {
        debug!(file, "skipping content file without title or description");
        return None;
    };

    Some(ContentSummary {
        slug,
        title,
        description,
        tags: fm
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        category: non_empty(fm.category),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

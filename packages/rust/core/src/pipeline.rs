//! End-to-end build: validate → assemble every locale → write every locale.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use sitesearch_content::{ContentKind, ContentRepository, list_content};
use sitesearch_shared::{BuildConfig, Locale, Result, SearchIndexData};

use crate::assembler::{self, IndexParts};
use crate::catalog::tool_items;
use crate::content_items::content_items;
use crate::data::SiteData;
use crate::reference::reference_items;
use crate::standards::standards_items;
use crate::validator::{validate_manifest, validate_tool_docs};

/// Outcome for one locale's index file.
#[derive(Debug, Clone)]
pub struct LocaleReport {
    pub locale: Locale,
    pub path: PathBuf,
    pub item_count: usize,
}

/// Result of a full [`build`].
#[derive(Debug)]
pub struct BuildReport {
    /// One entry per configured locale, in config order.
    pub locales: Vec<LocaleReport>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

impl BuildReport {
    pub fn total_items(&self) -> usize {
        self.locales.iter().map(|l| l.item_count).sum()
    }
}

/// Progress callback for reporting build status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when a locale's index has been assembled in memory.
    fn locale_assembled(&self, locale: Locale, item_count: usize);
    /// Called when a locale's index file has been written.
    fn index_written(&self, locale: Locale, path: &Path);
    /// Called when the build completes.
    fn done(&self, report: &BuildReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn locale_assembled(&self, _locale: Locale, _item_count: usize) {}
    fn index_written(&self, _locale: Locale, _path: &Path) {}
    fn done(&self, _report: &BuildReport) {}
}

/// Gather every source for `locale` and assemble its index.
#[instrument(skip_all, fields(locale = %locale))]
pub async fn build_search_index_data<R: ContentRepository>(
    locale: Locale,
    data: &SiteData,
    repo: &R,
    content_root: &Path,
) -> Result<SearchIndexData> {
    let (blog, guides, glossary) = tokio::try_join!(
        list_content(repo, content_root, ContentKind::Blog, locale),
        list_content(repo, content_root, ContentKind::Guides, locale),
        list_content(repo, content_root, ContentKind::Glossary, locale),
    )?;

    let parts = IndexParts {
        tools: tool_items(&data.catalog, data.messages(locale), locale),
        standards: standards_items(&data.manifest, &data.tables, locale),
        reference: reference_items(&data.reference, locale),
        blog: content_items(ContentKind::Blog, locale, &blog),
        guides: content_items(ContentKind::Guides, locale, &guides),
        glossary: content_items(ContentKind::Glossary, locale, &glossary),
    };

    Ok(assembler::assemble(locale, parts))
}

/// Run the contract checks without building anything.
#[instrument(skip_all, fields(locales = config.locales.len()))]
pub async fn check<R: ContentRepository>(
    config: &BuildConfig,
    data: &SiteData,
    repo: &R,
) -> Result<()> {
    validate_manifest(&data.manifest, &data.tables)?;
    validate_tool_docs(
        repo,
        &config.content_dir,
        &config.active_tool_docs,
        &config.locales,
    )
    .await?;
    Ok(())
}

/// Run the full build.
///
/// 1. Validate the standards manifest and active tool docs
/// 2. Assemble every configured locale in memory
/// 3. Write every locale's index file
///
/// Nothing is written unless steps 1 and 2 succeed for every locale.
#[instrument(skip_all, fields(output_dir = %config.output_dir.display()))]
pub async fn build<R: ContentRepository>(
    config: &BuildConfig,
    data: &SiteData,
    repo: &R,
    progress: &dyn ProgressReporter,
) -> Result<BuildReport> {
    let start = Instant::now();

    progress.phase("Validating");
    check(config, data, repo).await?;

    let mut indexes = Vec::with_capacity(config.locales.len());
    for &locale in &config.locales {
        progress.phase(&format!("Assembling {locale} index"));
        let index = build_search_index_data(locale, data, repo, &config.content_dir).await?;
        progress.locale_assembled(locale, index.items.len());
        indexes.push(index);
    }

    progress.phase("Writing");
    let mut locales = Vec::with_capacity(indexes.len());
    for index in &indexes {
        let path = assembler::write_index(index, &config.output_dir).await?;
        progress.index_written(index.locale, &path);
        locales.push(LocaleReport {
            locale: index.locale,
            path,
            item_count: index.items.len(),
        });
    }

    let report = BuildReport {
        locales,
        elapsed: start.elapsed(),
    };

    info!(
        locales = report.locales.len(),
        items = report.total_items(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "search index build complete"
    );

    progress.done(&report);
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

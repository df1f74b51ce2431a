//! CLI definition, tracing setup, and the build command.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use sitesearch_content::FsRepository;
use sitesearch_core::data::load_site_data;
use sitesearch_core::pipeline::{self, BuildReport, ProgressReporter};
use sitesearch_shared::{BuildConfig, Locale, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Build the localized site search indexes.
#[derive(Parser)]
#[command(
    name = "build-search-index",
    version,
    about = "Build public/search-index.<locale>.json from site data and content.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Project root; data, content and output paths resolve against it.
    #[arg(long, default_value = ".", env = "SITESEARCH_ROOT")]
    pub root: PathBuf,

    /// Config file (defaults to <root>/sitesearch.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Validate the standards manifest and tool docs without writing.
    #[arg(long)]
    pub check: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "sitesearch=info",
        1 => "sitesearch=debug",
        _ => "sitesearch=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Load config and data, then validate or build.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli.root, cli.config.as_deref())?;

    info!(
        root = %cli.root.display(),
        locales = ?config.locales,
        check_only = cli.check,
        "starting search index build"
    );

    let data = load_site_data(&config.data_dir, &config.locales)
        .await
        .wrap_err("failed to load site data")?;
    let repo = FsRepository;

    if cli.check {
        pipeline::check(&config, &data, &repo).await?;
        println!(
            "  Checks passed: standards manifest and {} tool doc(s) across {} locale(s).",
            config.active_tool_docs.len(),
            config.locales.len()
        );
        return Ok(());
    }

    let reporter = CliProgress::new()?;
    let result = pipeline::build(&config, &data, &repo, &reporter).await;
    reporter.clear();
    let report = result?;

    print_summary(&report);
    Ok(())
}

fn resolve_config(root: &Path, explicit: Option<&Path>) -> Result<BuildConfig> {
    let site = match explicit {
        Some(path) => load_config_from(path)?,
        None => load_config(root)?,
    };
    Ok(BuildConfig::resolve(&site, root)?)
}

fn print_summary(report: &BuildReport) {
    println!();
    println!("  Search index built.");
    for entry in &report.locales {
        println!(
            "  {:<4}{:>6} items  {}",
            entry.locale,
            entry.item_count,
            entry.path.display()
        );
    }
    println!("  Time: {:.2}s", report.elapsed.as_secs_f64());
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Result<Self> {
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .map_err(|e| eyre!("invalid progress template: {e}"))?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Ok(Self { spinner })
    }

    fn clear(&self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn locale_assembled(&self, locale: Locale, item_count: usize) {
        self.spinner
            .set_message(format!("Assembled {locale} index ({item_count} items)"));
    }

    fn index_written(&self, _locale: Locale, path: &Path) {
        self.spinner.set_message(format!("Wrote {}", path.display()));
    }

    fn done(&self, _report: &BuildReport) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_needed() {
        let cli = Cli::try_parse_from(["build-search-index"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.config.is_none());
        assert!(!cli.check);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "build-search-index",
            "--root",
            "site",
            "--check",
            "-vv",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.root, PathBuf::from("site"));
        assert!(cli.check);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.log_format, LogFormat::Json));
    }

    #[test]
    fn missing_config_file_means_defaults() {
        let tmp = std::env::temp_dir().join(format!("sitesearch-cli-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&tmp).unwrap();

        let config = resolve_config(&tmp, None).unwrap();
        assert_eq!(config.data_dir, tmp.join("data"));
        assert_eq!(config.output_dir, tmp.join("public"));
        assert_eq!(config.locales, Locale::ALL.to_vec());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn explicit_config_file_is_used() {
        let tmp = std::env::temp_dir().join(format!("sitesearch-cli-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&tmp).unwrap();
        let path = tmp.join("custom.toml");
        std::fs::write(&path, "[paths]\noutput_dir = \"dist\"\n\n[build]\nlocales = [\"en\"]\n").unwrap();

        let config = resolve_config(&tmp, Some(&path)).unwrap();
        assert_eq!(config.output_dir, tmp.join("dist"));
        assert_eq!(config.locales, vec![Locale::En]);

        let _ = std::fs::remove_dir_all(&tmp);
    }
}

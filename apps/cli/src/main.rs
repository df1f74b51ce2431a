//! `build-search-index`: offline builder for the site's localized search
//! indexes.
//!
//! Reads the tool catalog, standards and reference data, and the content tree,
//! then writes one `search-index.<locale>.json` per locale.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}

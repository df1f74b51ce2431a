//! Content-tree access for the search-index builder.
//!
//! Reads `content/{blog,guides,glossary}/<slug>.<locale>.(md|mdx)` files through a
//! [`ContentRepository`], parses their YAML frontmatter, and produces
//! [`ContentSummary`] records for indexing. Malformed or draft entries are
//! excluded here; they never fail a build.

mod frontmatter;
mod repository;
mod scanner;

pub use frontmatter::{Frontmatter, FrontmatterError, parse_frontmatter, split_frontmatter};
pub use repository::{ContentRepository, FsRepository, MemoryRepository};
pub use scanner::{ContentKind, ContentSummary, list_content};

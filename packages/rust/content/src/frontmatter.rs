//! YAML frontmatter extraction for markdown/MDX content files.

use serde::{Deserialize, Deserializer};

/// Why a file's frontmatter could not be read.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("no frontmatter block")]
    Missing,

    #[error("invalid frontmatter: {0}")]
    Invalid(String),
}

/// Fields the index cares about. Anything else in the block is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Frontmatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Only a YAML boolean `true` marks a draft.
    #[serde(default, deserialize_with = "draft_flag")]
    pub draft: bool,
}

/// Split `---`-delimited frontmatter from the body.
///
/// Returns `(yaml, body)`, or `None` when the file does not open with a
/// complete frontmatter block.
pub fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse the frontmatter block of a content file.
pub fn parse_frontmatter(source: &str) -> Result<Frontmatter, FrontmatterError> {
    let (yaml, _body) = split_frontmatter(source).ok_or(FrontmatterError::Missing)?;
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::Invalid(e.to_string()))
}

/// Accept `tags: [a, b]`, `tags: a`, or `tags:` (null). Scalars become strings.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    let items = match value {
        None | Some(serde_yaml::Value::Null) => Vec::new(),
        Some(serde_yaml::Value::Sequence(seq)) => seq,
        Some(other) => vec![other],
    };

    Ok(items.into_iter().filter_map(scalar_to_string).collect())
}

/// Any value other than boolean `true` (including `"true"`) leaves the entry
/// publishable.
fn draft_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(serde_yaml::Value::Bool(true))))
}

fn scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

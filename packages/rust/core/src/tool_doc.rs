//! Shape of the per-tool explanation documents (`content/tools/<id>.<locale>.json`).
//!
//! The builder checks presence and shape only; the prose is never inspected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Schema version every tool doc must declare.
pub const TOOL_DOC_VERSION: u32 = 1;

pub const MIN_EXAMPLES: usize = 2;
pub const MIN_REFERENCES: usize = 1;
pub const MIN_COMMON_MISTAKES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDocStandard {
    pub version: u32,
    pub how_to: Vec<String>,
    pub formula: ToolDocFormula,
    pub examples: Vec<ToolDocExample>,
    pub references: Vec<ToolDocReference>,
    pub common_mistakes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDocFormula {
    pub expression: String,
    #[serde(default)]
    pub variables: Vec<FormulaVariable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaVariable {
    pub symbol: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDocExample {
    pub title: String,
    #[serde(default)]
    pub inputs: BTreeMap<String, serde_json::Value>,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDocReference {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ToolDocStandard {
    /// Parse and shape-check a doc. The error is a human-readable reason.
    pub fn parse(source: &str) -> Result<Self, String> {
        let doc: Self = serde_json::from_str(source).map_err(|e| e.to_string())?;
        doc.validate()?;
        Ok(doc)
    }

    /// Check the shape constraints serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.version != TOOL_DOC_VERSION {
            return Err(format!(
                "version {} not supported (expected {TOOL_DOC_VERSION})",
                self.version
            ));
        }
        if !self.how_to.iter().any(|step| !step.trim().is_empty()) {
            return Err("howTo has no steps".into());
        }
        if self.formula.expression.trim().is_empty() {
            return Err("formula.expression is empty".into());
        }
        if self.examples.len() < MIN_EXAMPLES {
            return Err(format!(
                "{} examples, at least {MIN_EXAMPLES} required",
                self.examples.len()
            ));
        }
        if self.references.len() < MIN_REFERENCES {
            return Err(format!(
                "{} references, at least {MIN_REFERENCES} required",
                self.references.len()
            ));
        }
        if self.common_mistakes.len() < MIN_COMMON_MISTAKES {
            return Err(format!(
                "{} commonMistakes, at least {MIN_COMMON_MISTAKES} required",
                self.common_mistakes.len()
            ));
        }
        Ok(())
    }
}

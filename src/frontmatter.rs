//! Frontmatter Splitting
//!
//! A manifesto opens with a `---` line, a YAML header, and a closing `---`
//! line. Everything after the closing delimiter is the body.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

const DELIMITER: &str = "---";

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("No frontmatter block: file must start with a `---` line")]
    Missing,

    #[error("Unterminated frontmatter: no closing `---` line")]
    Unterminated,

    #[error("Invalid frontmatter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Frontmatter must be a key/value mapping, got {0}")]
    NotAMapping(&'static str),
}

/// A manifesto split into its header mapping and body text.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub header: Mapping,
    pub body: String,
}

/// Split `text` into header and body.
pub fn split(text: &str) -> Result<Document, FrontmatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');

    let opening = match lines.next() {
        Some(line) if is_delimiter(line) => line,
        _ => return Err(FrontmatterError::Missing),
    };

    let mut offset = opening.len();
    for line in lines {
        if is_delimiter(line) {
            let header = parse_header(&text[opening.len()..offset])?;
            let body = text[offset + line.len()..].to_string();
            return Ok(Document { header, body });
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}

/// Three or more dashes, nothing else.
fn is_delimiter(line: &str) -> bool {
    let line = line.trim_end();
    line.len() >= DELIMITER.len() && line.bytes().all(|b| b == b'-')
}

fn parse_header(raw: &str) -> Result<Mapping, FrontmatterError> {
    if raw.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(raw)? {
        Value::Mapping(mapping) => Ok(mapping),
        // A header holding only comments
        Value::Null => Ok(Mapping::new()),
        other => Err(FrontmatterError::NotAMapping(yaml_kind(&other))),
    }
}

/// Human name of a YAML value's kind, for error messages.
pub fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

//! Metadata Schema - Strict Frontmatter Contract
//!
//! Rules produce structured violations.
//! The schema collects every violation of a header before failing.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::frontmatter::yaml_kind;

/// Required frontmatter keys, in declaration order.
pub const REQUIRED_FIELDS: [&str; 5] = ["title", "tagline", "version", "theme", "description"];

/// Validated header of one manifesto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestoMetadata {
    pub title: String,
    pub tagline: String,
    pub version: String,
    pub theme: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl FieldViolation {
    fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: "field required".to_string(),
            expected: Some("text".to_string()),
            actual: None,
        }
    }

    fn wrong_type(field: &str, value: &Value) -> Self {
        Self {
            field: field.to_string(),
            message: format!("expected text, got {}", yaml_kind(value)),
            expected: Some("text".to_string()),
            actual: Some(yaml_kind(value).to_string()),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found in one header. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaError {
    pub violations: Vec<FieldViolation>,
}

impl SchemaError {
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s) for manifesto metadata", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaError {}

/// Field rule trait - checks one text value, produces a violation
pub trait FieldRule {
    fn field(&self) -> &'static str;
    fn check(&self, value: &str) -> Option<FieldViolation>;
}

// --- Concrete Rules ---

pub struct NonEmptyRule {
    field: &'static str,
}

impl NonEmptyRule {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl FieldRule for NonEmptyRule {
    fn field(&self) -> &'static str { self.field }

    fn check(&self, value: &str) -> Option<FieldViolation> {
        if !value.trim().is_empty() {
            return None;
        }
        Some(FieldViolation {
            field: self.field.to_string(),
            message: "must not be empty".to_string(),
            expected: Some("non-empty text".to_string()),
            actual: Some(format!("{:?}", value)),
        })
    }
}

pub struct SemverRule;

impl FieldRule for SemverRule {
    fn field(&self) -> &'static str { "version" }

    fn check(&self, value: &str) -> Option<FieldViolation> {
        if is_semver(value) {
            return None;
        }
        Some(FieldViolation {
            field: self.field().to_string(),
            message: format!("version must be semver (e.g., 1.0.0), got: {}", value),
            expected: Some("MAJOR.MINOR.PATCH".to_string()),
            actual: Some(value.to_string()),
        })
    }
}

/// `MAJOR.MINOR.PATCH` with ASCII digits only; no pre-release or build suffix.
pub fn is_semver(value: &str) -> bool {
    static SEMVER: OnceLock<Regex> = OnceLock::new();
    SEMVER
        .get_or_init(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("semver pattern compiles"))
        .is_match(value)
}

/// Schema orchestrates presence/type checks and field rules
pub struct MetadataSchema {
    rules: Vec<Box<dyn FieldRule>>,
}

impl MetadataSchema {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(NonEmptyRule::new("title")),
                Box::new(SemverRule),
            ],
        }
    }

    /// Validate a raw header mapping. Extra keys are ignored.
    pub fn validate(&self, header: &Mapping) -> Result<ManifestoMetadata, SchemaError> {
        let mut values: HashMap<&'static str, String> = HashMap::new();
        let mut violations = vec![];

        for field in REQUIRED_FIELDS {
            let text = match header.get(field) {
                None => {
                    violations.push(FieldViolation::missing(field));
                    continue;
                }
                Some(Value::String(text)) => text,
                Some(other) => {
                    violations.push(FieldViolation::wrong_type(field, other));
                    continue;
                }
            };

            violations.extend(
                self.rules
                    .iter()
                    .filter(|rule| rule.field() == field)
                    .filter_map(|rule| rule.check(text)),
            );
            values.insert(field, text.clone());
        }

        if !violations.is_empty() {
            return Err(SchemaError { violations });
        }

        let mut take = |field: &str| values.remove(field).unwrap_or_default();
        Ok(ManifestoMetadata {
            title: take("title"),
            tagline: take("tagline"),
            version: take("version"),
            theme: take("theme"),
            description: take("description"),
        })
    }
}

impl Default for MetadataSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a header against the default schema.
pub fn validate(header: &Mapping) -> Result<ManifestoMetadata, SchemaError> {
    MetadataSchema::new().validate(header)
}

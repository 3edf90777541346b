//! Configuration - Project Data and Theme Lookup
//!
//! Both files are YAML. Project config passes through to the template
//! untouched; theme config also drives the console breakdown.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Icon shown for a theme that `themes.yaml` does not declare.
pub const DEFAULT_THEME_ICON: &str = "📄";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid YAML in {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Display attributes of one theme. Unknown keys are kept for the template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

/// Theme key -> display attributes, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeConfig(IndexMap<String, ThemeEntry>);

impl ThemeConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_yaml(path)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        parse_yaml(text)
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: ThemeEntry) {
        self.0.insert(key.into(), entry);
    }

    pub fn get(&self, key: &str) -> Option<&ThemeEntry> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Declared name, or the raw key.
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key)
            .and_then(|t| t.name.as_deref())
            .unwrap_or(key)
    }

    /// Declared icon, or the generic document icon.
    pub fn icon<'a>(&'a self, key: &str) -> &'a str {
        self.get(key)
            .and_then(|t| t.icon.as_deref())
            .unwrap_or(DEFAULT_THEME_ICON)
    }
}

/// Arbitrary project data, exposed to the template as `project`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectConfig(serde_yaml::Value);

impl ProjectConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_yaml(path)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        parse_yaml(text)
    }

    pub fn value(&self) -> &serde_yaml::Value {
        &self.0
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self(serde_yaml::Value::Mapping(serde_yaml::Mapping::new()))
    }
}

fn load_yaml<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_yaml(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// An empty or comment-only document is the default value.
fn parse_yaml<T: DeserializeOwned + Default>(text: &str) -> Result<T, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(serde_yaml::from_str::<Option<T>>(text)?.unwrap_or_default())
}

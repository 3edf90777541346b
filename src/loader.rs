//! Manifesto Loader - Scan, Parse, Validate
//!
//! Per-file failures are collected, never propagated. Only a missing or
//! unlistable directory stops the scan.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::frontmatter::{self, FrontmatterError};
use crate::schema::{self, ManifestoMetadata, SchemaError};

const FILE_PREFIX: &str = "Manifesto";
const FILE_SUFFIX: &str = ".md";

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("{} directory not found", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Failed to list {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A validated manifesto plus the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestoRecord {
    pub path: PathBuf,
    #[serde(flatten)]
    pub metadata: ManifestoMetadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum LoadErrorKind {
    SchemaValidation(SchemaError),
    MissingFrontmatter(String),
    ParseError(String),
}

impl LoadErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SchemaValidation(_) => "Schema Validation",
            Self::MissingFrontmatter(_) => "Missing Frontmatter",
            Self::ParseError(_) => "Parse Error",
        }
    }

    /// Detail lines, one per schema violation.
    pub fn detail_lines(&self) -> Vec<String> {
        match self {
            Self::SchemaValidation(err) => err.violations.iter().map(|v| v.to_string()).collect(),
            Self::MissingFrontmatter(detail) | Self::ParseError(detail) => vec![detail.clone()],
        }
    }
}

impl From<FrontmatterError> for LoadErrorKind {
    fn from(err: FrontmatterError) -> Self {
        match err {
            FrontmatterError::Missing => Self::MissingFrontmatter(err.to_string()),
            other => Self::ParseError(other.to_string()),
        }
    }
}

/// A file that was skipped, and why.
#[derive(Debug, Clone, Serialize)]
pub struct LoadError {
    pub path: PathBuf,
    #[serde(flatten)]
    pub kind: LoadErrorKind,
}

impl LoadError {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Records and errors, each in file name order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadOutcome {
    pub records: Vec<ManifestoRecord>,
    pub errors: Vec<LoadError>,
}

/// `Manifesto*.md`, case-sensitive.
pub fn is_candidate(file_name: &str) -> bool {
    file_name.len() >= FILE_PREFIX.len() + FILE_SUFFIX.len()
        && file_name.starts_with(FILE_PREFIX)
        && file_name.ends_with(FILE_SUFFIX)
}

/// Load every manifesto directly inside `dir`.
pub fn load(dir: &Path) -> Result<LoadOutcome, LoaderError> {
    if !dir.is_dir() {
        return Err(LoaderError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut outcome = LoadOutcome::default();

    for path in candidate_files(dir)? {
        match load_file(&path) {
            Ok(metadata) => {
                debug!(path = %path.display(), theme = %metadata.theme, "loaded manifesto");
                outcome.records.push(ManifestoRecord { path, metadata });
            }
            Err(kind) => {
                warn!(path = %path.display(), kind = kind.label(), "skipping manifesto");
                outcome.errors.push(LoadError { path, kind });
            }
        }
    }

    Ok(outcome)
}

fn candidate_files(dir: &Path) -> Result<Vec<PathBuf>, LoaderError> {
    let io_err = |source| LoaderError::Io { path: dir.to_path_buf(), source };

    let mut names = vec![];
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let name = entry.file_name();
        let matches = name.to_str().map_or(false, is_candidate);
        // Dangling symlinks stay in so the failed read is reported
        if matches && !entry.path().is_dir() {
            names.push(name);
        }
    }
    names.sort();

    Ok(names.into_iter().map(|name| dir.join(name)).collect())
}

fn load_file(path: &Path) -> Result<ManifestoMetadata, LoadErrorKind> {
    let bytes = fs::read(path).map_err(|e| LoadErrorKind::ParseError(e.to_string()))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| LoadErrorKind::ParseError(format!("File is not valid UTF-8: {}", e)))?;

    let document = frontmatter::split(&text)?;
    schema::validate(&document.header).map_err(LoadErrorKind::SchemaValidation)
}

//! Generation Pipeline - Single Pass
//!
//! `scan` loads and reconciles; `generate` renders and writes. A run is
//! strictly scan-then-generate and never re-enters scanning.
//!
//! CRITICAL: generate refuses to run with zero records. Nothing is written
//! on any failure before the render succeeds.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, ProjectConfig, ThemeConfig};
use crate::hashing::{matches_digest, sha256_hex};
use crate::loader::{self, LoadOutcome, LoaderError};
use crate::reconcile::{reconcile, theme_breakdown, ThemeCount};
use crate::render::{render, RenderError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No valid manifestos found. Exiting.")]
    NoValidManifestos,

    #[error("Failed to read template {}: {}", .path.display(), .source)]
    Template {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to read {}: {}", .path.display(), .source)]
    ReadOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Input and output locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub manifestos: PathBuf,
    pub config: PathBuf,
    pub themes: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
}

impl Paths {
    /// Default file names, resolved under `root`.
    pub fn in_root(root: &Path) -> Self {
        let defaults = Self::default();
        Self {
            manifestos: root.join(defaults.manifestos),
            config: root.join(defaults.config),
            themes: root.join(defaults.themes),
            template: root.join(defaults.template),
            output: root.join(defaults.output),
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            manifestos: PathBuf::from("manifestos"),
            config: PathBuf::from("config.yaml"),
            themes: PathBuf::from("themes.yaml"),
            template: PathBuf::from("README.template.md"),
            output: PathBuf::from("README.md"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Overwrite the output file.
    #[default]
    Write,
    /// Render only; compare against the existing output.
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStatus {
    Written,
    UpToDate,
    Stale,
}

/// Result of the scanning half of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Scan {
    #[serde(flatten)]
    pub outcome: LoadOutcome,
    #[serde(skip)]
    pub themes: ThemeConfig,
    pub undeclared_themes: BTreeSet<String>,
}

impl Scan {
    /// Every candidate validated and at least one exists.
    pub fn is_clean(&self) -> bool {
        self.outcome.errors.is_empty() && !self.outcome.records.is_empty()
    }
}

/// Result of the rendering half of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Generated {
    pub output: PathBuf,
    pub manifesto_count: usize,
    pub breakdown: Vec<ThemeCount>,
    pub digest: String,
    pub status: OutputStatus,
}

/// The generation pipeline - one scan, one render, one write
pub struct Pipeline {
    paths: Paths,
}

impl Pipeline {
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }

    /// Load every manifesto and check theme coverage.
    ///
    /// Per-file failures land in `Scan::outcome.errors`; only a missing
    /// directory or an unreadable theme config fails the scan.
    pub fn scan(&self) -> Result<Scan, PipelineError> {
        let outcome = loader::load(&self.paths.manifestos)?;
        debug!(
            records = outcome.records.len(),
            errors = outcome.errors.len(),
            "scanned manifestos"
        );

        let themes = ThemeConfig::load(&self.paths.themes)?;
        let undeclared_themes = reconcile(&outcome.records, &themes);

        Ok(Scan {
            outcome,
            themes,
            undeclared_themes,
        })
    }

    /// Render the scanned records and write (or compare) the output.
    pub fn generate(&self, scan: &Scan, mode: WriteMode) -> Result<Generated, PipelineError> {
        let records = &scan.outcome.records;
        if records.is_empty() {
            return Err(PipelineError::NoValidManifestos);
        }

        let project = ProjectConfig::load(&self.paths.config)?;
        let template = fs::read_to_string(&self.paths.template).map_err(|source| {
            PipelineError::Template {
                path: self.paths.template.clone(),
                source,
            }
        })?;

        let rendered = render(&project, records, &scan.themes, &template)?;
        let digest = sha256_hex(rendered.as_bytes());
        let output = self.paths.output.clone();

        let status = match mode {
            WriteMode::Write => {
                fs::write(&output, &rendered).map_err(|source| PipelineError::Write {
                    path: output.clone(),
                    source,
                })?;
                info!(path = %output.display(), %digest, "wrote output");
                OutputStatus::Written
            }
            WriteMode::Check => match fs::read(&output) {
                Ok(existing) if matches_digest(&existing, &digest) => OutputStatus::UpToDate,
                Ok(_) => OutputStatus::Stale,
                Err(e) if e.kind() == io::ErrorKind::NotFound => OutputStatus::Stale,
                Err(source) => return Err(PipelineError::ReadOutput { path: output, source }),
            },
        };

        Ok(Generated {
            output,
            manifesto_count: records.len(),
            breakdown: theme_breakdown(records, &scan.themes),
            digest,
            status,
        })
    }
}

//! Manifesto README - Document Compiler
//!
//! Scans `Manifesto*.md` files, validates their frontmatter against a strict
//! schema and renders the surviving records into a single README.
//!
//! # Guarantees
//! 1. One malformed file never blocks the others
//! 2. Every invalid field of a file is reported, not just the first
//! 3. Same inputs produce byte-identical output
//! 4. Nothing is written when the run aborts before rendering

pub mod frontmatter;
pub mod schema;
pub mod loader;
pub mod config;
pub mod reconcile;
pub mod render;
pub mod hashing;
pub mod pipeline;
pub mod report;

pub use schema::{FieldViolation, ManifestoMetadata, MetadataSchema, SchemaError};
pub use loader::{LoadError, LoadErrorKind, LoadOutcome, LoaderError, ManifestoRecord};
pub use config::{ConfigError, ProjectConfig, ThemeConfig, ThemeEntry};
pub use reconcile::{reconcile, theme_breakdown, ThemeCount};
pub use render::{render, RenderError};
pub use hashing::sha256_hex;
pub use pipeline::{Generated, OutputStatus, Paths, Pipeline, PipelineError, Scan, WriteMode};
pub use report::{Output, Report, TerminalOutput};

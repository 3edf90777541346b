//! Theme Reconciliation
//!
//! Themes referenced by manifestos but missing from the theme config are a
//! warning, not an error: rendering falls back to the raw key and a default
//! icon.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::config::ThemeConfig;
use crate::loader::ManifestoRecord;

/// Referenced theme keys that `themes` does not declare.
pub fn reconcile(records: &[ManifestoRecord], themes: &ThemeConfig) -> BTreeSet<String> {
    records
        .iter()
        .map(|r| r.metadata.theme.as_str())
        .filter(|theme| !themes.contains(theme))
        .map(str::to_string)
        .collect()
}

/// One row of the per-theme summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeCount {
    pub key: String,
    pub name: String,
    pub icon: String,
    pub count: usize,
}

/// Manifesto count per theme, sorted by theme key.
pub fn theme_breakdown(records: &[ManifestoRecord], themes: &ThemeConfig) -> Vec<ThemeCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.metadata.theme.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(key, count)| ThemeCount {
            key: key.to_string(),
            name: themes.display_name(key).to_string(),
            icon: themes.icon(key).to_string(),
            count,
        })
        .collect()
}

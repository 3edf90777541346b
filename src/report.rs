//! Console Reports
//!
//! Reports describe *what* to show through the semantic `Output` methods.
//! Implementations decide *how* it looks. The pipeline never prints.

use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::loader::LoadError;
use crate::pipeline::{Generated, OutputStatus};

/// Target output for reports.
pub trait Output {
    /// A titled block of detail lines.
    fn panel(&mut self, title: &str, lines: &[String]);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    fn error(&mut self, msg: &str);

    /// De-emphasized advice.
    fn hint(&mut self, msg: &str);

    /// Two aligned columns.
    fn table(&mut self, rows: &[(String, String)]);

    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Plain text output over any writer. Write failures are ignored.
pub struct TerminalOutput<W: Write = io::Stdout> {
    writer: W,
}

impl TerminalOutput<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.writer, "{}", text);
    }
}

impl<W: Write> Output for TerminalOutput<W> {
    fn panel(&mut self, title: &str, lines: &[String]) {
        self.line(&format!("╭─ {}", title));
        for line in lines {
            if line.is_empty() {
                self.line("│");
            }
            for part in line.lines() {
                self.line(&format!("│ {}", part));
            }
        }
        self.line("╰─");
    }

    fn success(&mut self, msg: &str) {
        self.line(&format!("✓ {}", msg));
    }

    fn warning(&mut self, msg: &str) {
        self.line(&format!("⚠  {}", msg));
    }

    fn error(&mut self, msg: &str) {
        self.line(&format!("✗ {}", msg));
    }

    fn hint(&mut self, msg: &str) {
        self.line(&format!("  {}", msg));
    }

    fn table(&mut self, rows: &[(String, String)]) {
        let width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        for (label, value) in rows {
            let pad = width - label.chars().count();
            self.line(&format!("  {}{}  {}", label, " ".repeat(pad), value));
        }
    }

    fn newline(&mut self) {
        self.line("");
    }
}

/// Per-file errors plus the skipped-file count.
pub struct LoadErrorsReport<'a> {
    pub errors: &'a [LoadError],
}

impl Report for LoadErrorsReport<'_> {
    fn render(&self, out: &mut dyn Output) {
        if self.errors.is_empty() {
            return;
        }

        out.newline();
        for error in self.errors {
            let title = format!("❌ {}: {}", error.kind.label(), error.file_name());
            out.panel(&title, &error.kind.detail_lines());
        }

        out.newline();
        out.warning(&format!("Skipped {} file(s) due to errors", self.errors.len()));
        out.hint("Fix frontmatter and re-run the generator");
        out.newline();
    }
}

/// Themes referenced by manifestos but absent from the theme config.
pub struct ThemeDiscrepancyReport<'a> {
    pub undeclared: &'a BTreeSet<String>,
}

impl Report for ThemeDiscrepancyReport<'_> {
    fn render(&self, out: &mut dyn Output) {
        if self.undeclared.is_empty() {
            return;
        }

        let mut lines = vec!["Themes in frontmatter but not in themes.yaml:".to_string()];
        lines.extend(self.undeclared.iter().map(|t| format!("  • {}", t)));
        lines.push(String::new());
        lines.push("Add these to themes.yaml or they'll render without icons/names".to_string());

        out.newline();
        out.panel("⚠️  Theme Discrepancy", &lines);
    }
}

/// Success line and per-theme breakdown.
pub struct SummaryReport<'a> {
    pub generated: &'a Generated,
}

impl Report for SummaryReport<'_> {
    fn render(&self, out: &mut dyn Output) {
        let generated = self.generated;
        let file = generated
            .output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| generated.output.display().to_string());

        out.newline();
        match generated.status {
            OutputStatus::Written => out.success(&format!(
                "Generated {} from {} manifesto(s)",
                file, generated.manifesto_count
            )),
            OutputStatus::UpToDate => out.success(&format!(
                "{} is up to date ({} manifesto(s))",
                file, generated.manifesto_count
            )),
            OutputStatus::Stale => {
                out.error(&format!("{} is out of date", file));
                out.hint("Re-run without --check to regenerate it");
            }
        }

        let rows: Vec<(String, String)> = generated
            .breakdown
            .iter()
            .map(|row| {
                (
                    format!("{} {}", row.icon, row.name),
                    format!("{} manifesto(s)", row.count),
                )
            })
            .collect();
        out.table(&rows);
        out.newline();
    }
}

/// Validation-only summary for the `check` command.
pub struct CheckReport {
    pub valid: usize,
    pub skipped: usize,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        if self.valid == 0 {
            out.error("No valid manifestos found");
        } else if self.skipped == 0 {
            out.success(&format!("{} manifesto(s) valid", self.valid));
        } else {
            out.warning(&format!(
                "{} manifesto(s) valid, {} skipped",
                self.valid, self.skipped
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadErrorKind;
    use crate::reconcile::ThemeCount;

    fn rendered(report: &dyn Report) -> String {
        let mut out = TerminalOutput::new(Vec::new());
        report.render(&mut out);
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_no_errors_prints_nothing() {
        assert!(rendered(&LoadErrorsReport { errors: &[] }).is_empty());
        let empty = BTreeSet::new();
        assert!(rendered(&ThemeDiscrepancyReport { undeclared: &empty }).is_empty());
    }

    #[test]
    fn test_error_panel_names_file_and_kind() {
        let errors = vec![LoadError {
            path: "manifestos/Manifesto-Bad.md".into(),
            kind: LoadErrorKind::ParseError("Unterminated frontmatter".to_string()),
        }];
        let text = rendered(&LoadErrorsReport { errors: &errors });
        assert!(text.contains("╭─ ❌ Parse Error: Manifesto-Bad.md"));
        assert!(text.contains("│ Unterminated frontmatter"));
        assert!(text.contains("Skipped 1 file(s) due to errors"));
    }

    #[test]
    fn test_theme_warning_lists_keys() {
        let undeclared: BTreeSet<String> = ["rebel".to_string(), "alpha".to_string()].into();
        let text = rendered(&ThemeDiscrepancyReport { undeclared: &undeclared });
        let alpha = text.find("• alpha").unwrap();
        let rebel = text.find("• rebel").unwrap();
        assert!(alpha < rebel);
        assert!(text.contains("Add these to themes.yaml"));
    }

    #[test]
    fn test_summary_table_aligned() {
        let generated = Generated {
            output: "out/README.md".into(),
            manifesto_count: 3,
            breakdown: vec![
                ThemeCount { key: "a".into(), name: "Alpha".into(), icon: "*".into(), count: 2 },
                ThemeCount { key: "b".into(), name: "b".into(), icon: "*".into(), count: 1 },
            ],
            digest: String::new(),
            status: OutputStatus::Written,
        };
        let text = rendered(&SummaryReport { generated: &generated });
        assert!(text.contains("✓ Generated README.md from 3 manifesto(s)"));
        assert!(text.contains("  * Alpha  2 manifesto(s)\n"));
        assert!(text.contains("  * b      1 manifesto(s)\n"));
    }
}

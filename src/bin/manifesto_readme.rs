//! Manifesto README CLI
//!
//! Commands: generate (default), check
//! Returns 1 on fatal errors, 2 when `check` finds invalid manifestos

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use manifesto_readme::{
    report::{CheckReport, LoadErrorsReport, SummaryReport, ThemeDiscrepancyReport},
    OutputStatus, Output, Paths, Pipeline, Report, Scan, TerminalOutput, WriteMode,
};

#[derive(Parser)]
#[command(name = "manifesto-readme")]
#[command(about = "Generate README.md from manifesto frontmatter with strict validation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding Manifesto*.md files
    #[arg(long, default_value = "manifestos", global = true)]
    manifestos: PathBuf,

    /// Project config passed to the template as `project`
    #[arg(long, default_value = "config.yaml", global = true)]
    config: PathBuf,

    /// Theme config (theme key -> name, icon)
    #[arg(long, default_value = "themes.yaml", global = true)]
    themes: PathBuf,

    /// Template rendered with project, manifestos and themes
    #[arg(long, default_value = "README.template.md", global = true)]
    template: PathBuf,

    /// Output file, overwritten on success
    #[arg(short, long, default_value = "README.md", global = true)]
    output: PathBuf,

    /// Log pipeline progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate manifestos and render the README (default)
    Generate {
        /// Render without writing; fail if the output is out of date
        #[arg(long)]
        check: bool,
    },

    /// Validate manifestos and theme coverage without rendering
    Check {
        /// Print the scan result as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn paths(&self) -> Paths {
        Paths {
            manifestos: self.manifestos.clone(),
            config: self.config.clone(),
            themes: self.themes.clone(),
            template: self.template.clone(),
            output: self.output.clone(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "manifesto_readme=debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let pipeline = Pipeline::new(cli.paths());
    let mut out = TerminalOutput::stdout();

    match cli.command.unwrap_or(Commands::Generate { check: false }) {
        Commands::Generate { check } => {
            let mode = if check { WriteMode::Check } else { WriteMode::Write };
            generate(&pipeline, mode, &mut out)
        }
        Commands::Check { json } => check(&pipeline, json, &mut out),
    }
}

fn generate(pipeline: &Pipeline, mode: WriteMode, out: &mut dyn Output) -> ExitCode {
    let scan = match pipeline.scan() {
        Ok(scan) => scan,
        Err(e) => {
            out.error(&format!("Error: {}", e));
            return ExitCode::FAILURE;
        }
    };

    report_scan(&scan, out);

    match pipeline.generate(&scan, mode) {
        Ok(generated) => {
            SummaryReport { generated: &generated }.render(out);
            if generated.status == OutputStatus::Stale {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            out.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn check(pipeline: &Pipeline, json: bool, out: &mut dyn Output) -> ExitCode {
    let scan = match pipeline.scan() {
        Ok(scan) => scan,
        Err(e) => {
            if json {
                println!("{}", serde_json::json!({ "error": e.to_string() }));
            } else {
                out.error(&format!("Error: {}", e));
            }
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&scan) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!(r#"{{"error": "Failed to encode report: {}"}}"#, e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        report_scan(&scan, out);
        out.newline();
        CheckReport {
            valid: scan.outcome.records.len(),
            skipped: scan.outcome.errors.len(),
        }
        .render(out);
    }

    if scan.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2) // Validation failure
    }
}

fn report_scan(scan: &Scan, out: &mut dyn Output) {
    LoadErrorsReport { errors: &scan.outcome.errors }.render(out);
    ThemeDiscrepancyReport { undeclared: &scan.undeclared_themes }.render(out);
}

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use map_transform::config::parse_vector;
use map_transform::{
    DocumentStatus, ErrorKind, OutputFormat, RunConfig, RunReport, Transform, TransformError,
    TransformPlan,
};
use mapdoc::Point3;

#[derive(Parser)]
#[command(name = "map-transform")]
#[command(about = "Apply coordinate transforms to XML level maps", long_about = None)]
#[command(version)]
struct Cli {
    /// Map files to process, in order
    #[arg(value_name = "INPUT_FILES", value_hint = clap::ValueHint::FilePath)]
    inputs: Vec<PathBuf>,

    /// File to write for the input at the same position; repeat once per input
    #[arg(
        short = 'o',
        long = "output-files",
        value_name = "FILE",
        value_hint = clap::ValueHint::FilePath
    )]
    outputs: Vec<PathBuf>,

    /// Translate every item by X[,Y[,Z]]; repeatable, applied in order
    #[arg(
        short,
        long,
        value_name = "X,Y,Z",
        value_parser = parse_vector,
        allow_hyphen_values = true
    )]
    translate: Vec<Point3>,

    /// Find the center of each map and make all coordinates relative to it
    #[arg(short = 'r', long)]
    make_relative: bool,

    /// TOML transform plan; its transforms run before command-line ones
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    plan: Option<PathBuf>,

    /// Output format for the run summary
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Log each map's bounds and center
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", hide = true)]
    debug: bool,
}

impl Cli {
    fn to_config(&self) -> Result<RunConfig, TransformError> {
        let config = RunConfig {
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            make_relative: self.make_relative,
            transforms: self
                .translate
                .iter()
                .copied()
                .map(Transform::Translate)
                .collect(),
        };

        match &self.plan {
            Some(path) => config.with_plan(TransformPlan::load(path)?),
            None => Ok(config),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Honour NO_COLOR for everything written to stderr
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        colored::control::set_override(false);
    }

    // Initialize logger with default level (overridden by RUST_LOG)
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let report = match cli.to_config().and_then(|config| map_transform::run(&config)) {
        Ok(report) => report,
        Err(e) => {
            print_error_banner(&e, None);
            return exit_code(e.kind());
        }
    };

    if let Err(e) = print_report(&report, cli.format) {
        eprintln!("{} {e}", "Error:".red());
        return ExitCode::FAILURE;
    }

    exit_code(report.exit_kind())
}

fn exit_code(kind: ErrorKind) -> ExitCode {
    ExitCode::from(kind.code())
}

fn print_report(report: &RunReport, format: OutputFormat) -> anyhow::Result<()> {
    for doc in &report.documents {
        match &doc.status {
            DocumentStatus::Transformed { items, .. } => {
                if matches!(format, OutputFormat::Text) {
                    eprintln!(
                        "{} {} → {} ({items} items)",
                        "✓".green(),
                        doc.input.display(),
                        doc.output.display()
                    );
                }
            }
            DocumentStatus::Failed { error, .. } => {
                print_error_banner(error, Some(doc.input.as_path()))
            }
        }
    }

    let failed = report.failure_count();
    if failed > 0 {
        eprintln!(
            "{}",
            format!("{failed} of {} maps failed", report.documents.len())
                .red()
                .bold()
        );
    }

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(report)?);
    }

    Ok(())
}

fn print_error_banner(error: &TransformError, input: Option<&Path>) {
    let kind = error.kind();
    let rule = "*".repeat(44);
    eprintln!("{}", rule.red());
    eprintln!(
        "{}",
        format!("Error {}: {}", kind.code(), kind.description())
            .red()
            .bold()
    );
    match input {
        Some(path) => eprintln!("  {}: {error}", path.display()),
        None => eprintln!("  {error}"),
    }
    eprintln!("{}", rule.red());
}

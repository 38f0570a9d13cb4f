use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nominal_roll_to_csv::{
    ExtractOptions, ExtractionReport, extract_batch, write_csv, write_json,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "roll2csv",
    version,
    about = "Normalize exam nominal-roll PDFs into a sorted candidate CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract candidate records from one or more nominal-roll PDFs.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Input nominal-roll PDF. Repeatable; all inputs merge into one output.
    #[arg(short, long, required = true)]
    input: Vec<PathBuf>,

    /// Output CSV path.
    #[arg(short, long)]
    output: PathBuf,

    /// Also write the records as a JSON array to this path.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Output delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Minimum register-number length; shorter values drop the row.
    #[arg(long, default_value_t = 4)]
    min_register_len: usize,

    /// Omit the Source File column from the output.
    #[arg(long)]
    no_source_file: bool,

    /// Enable verbose warning output.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_options(args: &ExtractArgs) -> Result<ExtractOptions> {
    if !args.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }

    Ok(ExtractOptions {
        delimiter: args.delimiter as u8,
        min_register_len: args.min_register_len,
        include_source_file: !args.no_source_file,
    })
}

fn log_report(report: &ExtractionReport, verbose: bool) {
    eprintln!(
        "extracted {} candidate(s) from {} table(s) across {} document(s)",
        report.record_count, report.table_count, report.document_count
    );
    if report.warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", report.warnings.len());
    if verbose {
        for warning in &report.warnings {
            eprintln!(
                "  - {:?} source={:?} page={:?}: {}",
                warning.code, warning.source, warning.page, warning.message
            );
        }
    }
}

fn run_extract(args: &ExtractArgs) -> Result<ExtractionReport> {
    let options = parse_options(args)?;
    let batch = extract_batch(&args.input, &options).context("failed to extract nominal rolls")?;

    write_csv(
        &args.output,
        &batch.records,
        options.delimiter,
        options.include_source_file,
    )
    .with_context(|| format!("failed to write CSV to '{}'", args.output.display()))?;

    if let Some(json_path) = &args.json {
        write_json(json_path, &batch.records)
            .with_context(|| format!("failed to write JSON to '{}'", json_path.display()))?;
    }

    Ok(batch.report)
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("nominal_roll_to_csv=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => match run_extract(&args) {
            Ok(report) => {
                log_report(&report, args.verbose);
                if report.record_count > 0 {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(2)
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}

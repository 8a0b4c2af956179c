use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use mapcheck::points::utils::default_data_path;
use mapcheck::points::validate::validate_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

/// Integrity check for the campus map point data.
///
/// Verifies required fields, coordinate types and id uniqueness. Exits with
/// status 1 when the file is missing, malformed, or has any error.
#[derive(Parser, Debug)]
#[command(name = "mapcheck", version, about)]
struct Cli {
    /// Point data file [default: data/campus_points.json next to the tool]
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Only print the summary in text mode
    #[arg(short, long)]
    quiet: bool,
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let path = cli.file.clone().unwrap_or_else(default_data_path);
    let mut out = std::io::stdout().lock();

    if cli.format == Format::Text {
        writeln!(out, "--- CAMPUS MAP DATA VALIDATOR ---\n")?;
        writeln!(out, "Inspecting data file: {}", path.display())?;
    }

    let report = validate_file(&path)?;
    match cli.format {
        Format::Text => report.write_text(&mut out, cli.quiet)?,
        Format::Json => report.write_json(&mut out)?,
        Format::Csv => report.write_csv(&mut out)?,
    }
    Ok(report.passed())
}

/// Fatal diagnostic line; a closed stdout is ignored.
fn write_fatal<W: Write>(mut out: W, err: &anyhow::Error) {
    let _ = writeln!(out, "error: {err}");
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            write_fatal(std::io::stdout(), &err);
            ExitCode::FAILURE
        }
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use log::debug;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use ruuvitag_core::{Reading, decode_hex, parse_payload};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("RUUVITAG_BUILD_COMMIT"),
    " ",
    env!("RUUVITAG_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "ruuvitag")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for RuuviTag BLE manufacturer data (data formats 3 and 5).",
    long_about = None,
    after_help = "Examples:\n  ruuvitag decode 9904034d1701c1870008ffd5041a0c1f\n  ruuvitag capture analyse capture.txt -o report.json\n  ruuvitag capture analyze capture.txt --stdout --pretty"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode hex payloads given on the command line, one JSON line each.
    Decode {
        /// Manufacturer data payloads as hex (separators ' ', ':' and '-' allowed)
        #[arg(required = true)]
        payloads: Vec<String>,

        /// Exit with a non-zero code if any payload is rejected
        #[arg(long)]
        strict: bool,
    },
    /// Operations on text captures of hex payloads (offline-first).
    Capture {
        #[command(subcommand)]
        command: CaptureCommands,
    },
}

#[derive(Subcommand, Debug)]
enum CaptureCommands {
    /// Decode a capture file and generate a versioned JSON report.
    #[command(alias = "analyze")]
    #[command(
        after_help = "Examples:\n  ruuvitag capture analyse capture.txt -o report.json\n  ruuvitag capture analyze 'captures/*.txt' --stdout"
    )]
    Analyse {
        /// Path to a capture file (one hex payload per line)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any payload is rejected
        #[arg(long)]
        strict: bool,

        /// List rejection ids after decoding
        #[arg(long)]
        list_rejections: bool,

        /// Stamp the report with the current UTC time instead of the fixed default
        #[arg(long)]
        timestamp: bool,
    },
}

struct AnalyseOptions {
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_rejections: bool,
    timestamp: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode { payloads, strict } => cmd_decode(&payloads, strict),
        Commands::Capture { command } => match command {
            CaptureCommands::Analyse {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_rejections,
                timestamp,
            } => cmd_capture_analyse(AnalyseOptions {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_rejections,
                timestamp,
            }),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum DecodeLine {
    Reading { reading: Reading },
    Rejected { id: &'static str, error: String },
}

fn cmd_decode(payloads: &[String], strict: bool) -> Result<(), CliError> {
    let mut rejected = 0usize;
    for payload in payloads {
        let bytes = decode_hex(payload).map_err(|err| {
            CliError::new(
                format!("invalid hex payload '{}': {}", payload, err),
                Some("pass payload bytes as hex, e.g. 9904034d17...".to_string()),
            )
        })?;
        let line = match parse_payload(&bytes) {
            Ok(reading) => DecodeLine::Reading { reading },
            Err(err) => {
                rejected += 1;
                debug!("rejected payload {}: {}", payload, err);
                DecodeLine::Rejected {
                    id: err.id(),
                    error: err.to_string(),
                }
            }
        };
        let json = serde_json::to_string(&line).context("JSON serialization failed")?;
        println!("{}", json);
    }

    if strict && rejected > 0 {
        return Err(CliError::new(
            format!("{} of {} payloads rejected", rejected, payloads.len()),
            Some("drop --strict to only report rejections".to_string()),
        ));
    }
    Ok(())
}

fn cmd_capture_analyse(opts: AnalyseOptions) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&opts.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report = if opts.stdout {
        None
    } else {
        Some(opts.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        if let Some(report_target) = resolve_report_target(report_path)? {
            if report_target == input_abs {
                return Err(CliError::new(
                    format!(
                        "report path must differ from input: {}",
                        report_path.display()
                    ),
                    Some("choose a different output path".to_string()),
                ));
            }
        }
    }

    let mut rep = ruuvitag_core::analyze_capture_file(&resolved_input)
        .context("capture decoding failed")?;
    if opts.timestamp {
        rep.generated_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("timestamp formatting failed")?;
    }
    let json = serialize_report(&rep, opts.pretty, opts.compact)?;

    match report {
        None => {
            print!("{}", json);
        }
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            if !opts.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if opts.list_rejections && !opts.quiet {
        print_rejections(&rep);
    }
    if opts.strict && has_rejections(&rep) {
        return Err(CliError::new(
            "rejected payloads detected",
            Some("use --list-rejections to inspect".to_string()),
        ));
    }
    Ok(())
}

/// Absolute report path, or `None` while its directory does not exist yet
/// (it is created on write and cannot hold the input).
fn resolve_report_target(report_path: &Path) -> Result<Option<PathBuf>, CliError> {
    let parent = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Ok(None);
    }
    let report_dir = fs::canonicalize(parent)
        .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?;
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?;
    Ok(Some(report_dir.join(file_name)))
}

fn serialize_report(
    rep: &ruuvitag_core::Report,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn has_rejections(rep: &ruuvitag_core::Report) -> bool {
    rep.rejections.iter().any(|entry| entry.count > 0)
}

fn print_rejections(rep: &ruuvitag_core::Report) {
    eprintln!("Rejected payloads:");
    for rejection in &rep.rejections {
        eprintln!("  {} ({})", rejection.id, rejection.count);
        for example in &rejection.examples {
            eprintln!("    {}", example);
        }
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a text capture with one hex payload per line".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a text capture with one hex payload per line".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single capture file, or run once per file".to_string();
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        let message = format!(
            "multiple files match pattern '{}' ({} matches); matches: {}{}",
            pattern,
            matches.len(),
            listed,
            more
        );
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

//! Rewrites `tests/golden/<case>/expected_report.json` from each `input.txt`.
//!
//! Run from the repository root. `--check` compares instead of writing and
//! fails when any expected report is stale.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::ExitCode;

use ruuvitag_core::{Report, analyze_capture_file};

const GOLDEN_DIR: &str = "tests/golden";
const INPUT_FILE: &str = "input.txt";
const EXPECTED_FILE: &str = "expected_report.json";

enum Mode {
    Write,
    Check,
}

fn main() -> ExitCode {
    let mode = match std::env::args().nth(1).as_deref() {
        None => Mode::Write,
        Some("--check") => Mode::Check,
        Some(other) => {
            eprintln!("error: unknown argument '{}'", other);
            eprintln!("hint: run without arguments, or with --check");
            return ExitCode::from(2);
        }
    };

    match run(&mode) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(stale) => {
            eprintln!("error: {} golden report(s) out of date", stale);
            eprintln!("hint: run regenerate_golden without --check");
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(1)
        }
    }
}

fn run(mode: &Mode) -> Result<usize, String> {
    let root = Path::new(GOLDEN_DIR);
    let mut cases = golden_cases(root)?;
    cases.sort();

    let mut stale = 0;
    for case in cases {
        let input = case.join(INPUT_FILE);
        if !input.is_file() {
            eprintln!("skip: {} has no {}", case.display(), INPUT_FILE);
            continue;
        }
        let output = case.join(EXPECTED_FILE);
        let json = render_report(&input)?;
        match mode {
            Mode::Write => {
                fs::write(&output, &json)
                    .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
                eprintln!("OK: {}", output.display());
            }
            Mode::Check => {
                let current = fs::read_to_string(&output).unwrap_or_default();
                if current != json {
                    eprintln!("stale: {}", output.display());
                    stale += 1;
                }
            }
        }
    }
    Ok(stale)
}

fn golden_cases(root: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;
    let mut cases = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| format!("failed to read entry: {}", err))?
            .path();
        if path.is_dir() {
            cases.push(path);
        }
    }
    Ok(cases)
}

fn render_report(input: &Path) -> Result<String, String> {
    let mut report: Report = analyze_capture_file(input)
        .map_err(|err| format!("decoding failed for {}: {}", input.display(), err))?;
    report.input.path = portable_path(input);
    serde_json::to_string(&report).map_err(|err| format!("JSON serialization failed: {}", err))
}

/// Forward-slash form of a relative path, so reports match across platforms.
fn portable_path(path: &Path) -> String {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, trace};
use thiserror::Error;

use crate::capture::{HexLineSource, PayloadEvent, PayloadSource, SourceError};
use crate::protocols::{Reading, parse_payload};
use crate::{DecodeSummary, ReadingEntry, Report, make_stub_report};

mod rejections;

use rejections::{RejectionStats, add_rejection, build_rejection_summaries};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

pub fn analyze_capture_file(path: &Path) -> Result<Report, AnalysisError> {
    let input_bytes = path.metadata()?.len();
    let source = HexLineSource::open(path)?;
    analyze_source(path, input_bytes, source)
}

/// Decode every payload of `source` into a report.
///
/// `path` and `input_bytes` only label the report; the source need not be
/// backed by a file.
pub fn analyze_source<S: PayloadSource>(
    path: &Path,
    input_bytes: u64,
    mut source: S,
) -> Result<Report, AnalysisError> {
    let mut summary = DecodeSummary::default();
    let mut readings = Vec::new();
    let mut rejection_stats: HashMap<&'static str, RejectionStats> = HashMap::new();

    while let Some(PayloadEvent { line, data }) = source.next_payload()? {
        summary.payloads_total += 1;
        match parse_payload(&data) {
            Ok(reading) => {
                trace!("line {line}: decoded data format {}", reading.data_format());
                summary.decoded += 1;
                match reading {
                    Reading::RawV1(_) => summary.rawv1 += 1,
                    Reading::RawV2(_) => summary.rawv2 += 1,
                }
                readings.push(ReadingEntry { line, reading });
            }
            Err(err) => {
                debug!("line {line}: rejected payload ({} bytes): {err}", data.len());
                summary.rejected += 1;
                add_rejection(&mut rejection_stats, line, &err);
            }
        }
    }

    info!(
        "decoded {} of {} payloads from {}",
        summary.decoded,
        summary.payloads_total,
        path.display()
    );

    let mut report = make_stub_report(&path.display().to_string(), input_bytes);
    report.summary = summary;
    report.readings = readings;
    report.rejections = build_rejection_summaries(rejection_stats);
    Ok(report)
}

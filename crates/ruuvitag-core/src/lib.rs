//! RuuviTag core library for decoding sensor beacon manufacturer data.
//!
//! The decoders turn the manufacturer-specific data of a BLE advertisement
//! into readings with physical units. Two layouts are supported: data format
//! 3 (RAWv1, 16 bytes) and data format 5 (RAWv2, 26 bytes). Each exposes a
//! prefix test, a parser and a validity check; all are pure functions of the
//! input bytes and safe to call from any thread.
//!
//! Around the decoders sits an offline pipeline used by the CLI: payload
//! sources feed the analysis layer, which decodes every payload and
//! aggregates results into a deterministic report. All I/O is isolated in
//! `capture`.
//!
//! Invariants:
//! - A payload is rejected on length before prefix, and on prefix before any
//!   field is read.
//! - Format 5 readings carrying sentinel values are returned inside the error
//!   and never reported as decoded.
//! - Report outputs are deterministic and stable across runs.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use ruuvitag_core::analyze_capture_file;
//!
//! let report = analyze_capture_file(Path::new("capture.txt"))?;
//! println!("decoded: {}", report.summary.decoded);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
mod capture;
pub mod protocols;

pub use analysis::{AnalysisError, analyze_capture_file, analyze_source};
pub use capture::{HexLineSource, PayloadEvent, PayloadSource, SourceError, decode_hex};
pub use protocols::common::error::DecodeError;
pub use protocols::common::layout::{MANUFACTURER_ID, VENDOR_PREFIX};
pub use protocols::common::types::{Acceleration, MacAddress, ParseMacError};
pub use protocols::rawv1::{RawV1, is_rawv1, parse_rawv1};
pub use protocols::rawv2::{RawV2, is_rawv2, parse_rawv2};
pub use protocols::{Reading, parse_payload};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no generation time is supplied.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Decoding report for one capture, in input order.
///
/// # Examples
/// ```
/// use ruuvitag_core::make_stub_report;
///
/// let report = make_stub_report("capture.txt", 123);
/// assert_eq!(report.report_version, ruuvitag_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,

    /// Input capture metadata.
    pub input: InputInfo,

    /// Payload counters.
    pub summary: DecodeSummary,
    /// Decoded readings in capture order.
    pub readings: Vec<ReadingEntry>,
    /// Rejected payloads grouped by error id, sorted by id.
    pub rejections: Vec<RejectionSummary>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "ruuvitag").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input capture metadata embedded in reports.
///
/// # Examples
/// ```
/// use ruuvitag_core::InputInfo;
///
/// let input = InputInfo {
///     path: "capture.txt".to_string(),
///     bytes: 1024,
/// };
/// assert_eq!(input.bytes, 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Payload counters for a capture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeSummary {
    pub payloads_total: u64,
    pub decoded: u64,
    pub rejected: u64,
    pub rawv1: u64,
    pub rawv2: u64,
}

/// A decoded reading and the capture line it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingEntry {
    pub line: u64,
    pub reading: Reading,
}

/// Rejected payloads sharing one error id.
///
/// # Examples
/// ```
/// use ruuvitag_core::RejectionSummary;
///
/// let summary = RejectionSummary {
///     id: "RUUVI-INVALID-LENGTH".to_string(),
///     message: "Payload length does not match its data format".to_string(),
///     count: 1,
///     examples: vec!["line 3: invalid payload length: expected 26 bytes, got 4".to_string()],
/// };
/// assert_eq!(summary.count, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionSummary {
    /// Stable error identifier (e.g., `RUUVI-SENTINEL-VALUES`).
    pub id: String,
    /// Human-readable description of the rejection.
    pub message: String,
    /// Number of payloads rejected with this id.
    pub count: u64,
    /// At most three examples, formatted as `line N: <error>`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Build a stub report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use ruuvitag_core::make_stub_report;
///
/// let report = make_stub_report("capture.txt", 123);
/// assert_eq!(report.generated_at, ruuvitag_core::DEFAULT_GENERATED_AT);
/// assert!(report.readings.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "ruuvitag".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: DecodeSummary::default(),
        readings: vec![],
        rejections: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_empty_examples() {
        let mut report = make_stub_report("capture.txt", 1);
        report.rejections.push(RejectionSummary {
            id: "RUUVI-UNRECOGNIZED-PREFIX".to_string(),
            message: "Payload is not a supported manufacturer data format".to_string(),
            count: 0,
            examples: vec![],
        });

        let value = serde_json::to_value(&report).expect("report json");
        let rejection = &value["rejections"][0];
        assert!(rejection.get("examples").is_none());
        assert_eq!(value["summary"]["payloads_total"], 0);
        assert_eq!(value["tool"]["name"], "ruuvitag");
    }

    #[test]
    fn reading_entry_embeds_tagged_reading() {
        let reading = parse_rawv1(&[
            0x99, 0x04, 0x03, 0x60, 0x0F, 0x06, 0xC1, 0xC9, 0xFF, 0xF4, 0xFF, 0xD0, 0x04, 0x1C,
            0x0C, 0x13,
        ])
        .expect("rawv1");
        let entry = ReadingEntry {
            line: 7,
            reading: Reading::RawV1(reading),
        };
        let value = serde_json::to_value(&entry).expect("entry json");
        assert_eq!(value["line"], 7);
        assert_eq!(value["reading"]["format"], "rawv1");
        assert_eq!(value["reading"]["humidity"], 48.0);
    }
}

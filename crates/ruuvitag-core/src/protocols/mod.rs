//! Manufacturer data decoding.
//!
//! Each data format follows a layered structure:
//! - `layout`: prefix, lengths and scaling constants (source of truth)
//! - `reader`: raw field struct read through the shared byte-layout reader,
//!   plus format conventions (sign-magnitude, packed bits, sentinels)
//! - `parser`: domain-level readings and the public entry points
//!
//! `common` holds the byte-layout reader, shared types and `DecodeError`.
//! Parsers are pure and contain no I/O.

use serde::{Deserialize, Serialize};

pub mod common;
pub mod rawv1;
pub mod rawv2;

use common::error::DecodeError;
use rawv1::{RawV1, is_rawv1, parse_rawv1};
use rawv2::{RawV2, is_rawv2, parse_rawv2};

/// A decoded reading of either supported data format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum Reading {
    RawV1(RawV1),
    RawV2(RawV2),
}

impl Reading {
    pub fn data_format(&self) -> u8 {
        match self {
            Reading::RawV1(reading) => reading.data_format,
            Reading::RawV2(reading) => reading.data_format,
        }
    }
}

/// Route a manufacturer data payload to the decoder matching its prefix.
///
/// # Examples
/// ```
/// use ruuvitag_core::{DecodeError, Reading, parse_payload};
///
/// let payload = [
///     0x99, 0x04, 0x03, 0x49, 0x82, 0x01, 0xC1, 0x82,
///     0xFF, 0xF9, 0xFF, 0xD4, 0x04, 0x24, 0x0C, 0x13,
/// ];
/// let reading = parse_payload(&payload)?;
/// assert!(matches!(reading, Reading::RawV1(r) if r.temperature == -2.01));
///
/// assert_eq!(parse_payload(&[0x99, 0x04, 0x07]), Err(DecodeError::UnrecognizedPrefix));
/// # Ok::<(), DecodeError>(())
/// ```
///
/// # Errors
/// `UnrecognizedPrefix` when neither format identifier matches, otherwise the
/// error of the selected decoder.
pub fn parse_payload(payload: &[u8]) -> Result<Reading, DecodeError> {
    if is_rawv2(payload) {
        return parse_rawv2(payload).map(Reading::RawV2);
    }
    if is_rawv1(payload) {
        return parse_rawv1(payload).map(Reading::RawV1);
    }
    Err(DecodeError::UnrecognizedPrefix)
}

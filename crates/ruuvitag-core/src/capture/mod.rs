//! Payload sources for offline decoding.
//!
//! A source yields raw manufacturer data payloads one at a time, tagged with
//! their position in the capture. Sources perform all I/O; decoding stays in
//! `protocols`.

mod hex_lines;

pub use hex_lines::{HexLineSource, decode_hex};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadEvent {
    /// 1-based line of the payload in the capture.
    pub line: u64,
    pub data: Vec<u8>,
}

pub trait PayloadSource {
    fn next_payload(&mut self) -> Result<Option<PayloadEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex payload on line {line}: {message}")]
    Hex { line: u64, message: String },
}

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{PayloadEvent, PayloadSource, SourceError};

const COMMENT_PREFIX: char = '#';

/// Text capture with one hex-encoded payload per line.
///
/// Blank lines and `#` comments are skipped. Whitespace, `:` and `-` between
/// digits are ignored, so `99 04 03`, `99:04:03` and `990403` are the same
/// payload.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use ruuvitag_core::{HexLineSource, PayloadSource};
///
/// let capture = "# kitchen\n99 04 03 4d\n\n990405\n";
/// let mut source = HexLineSource::new(Cursor::new(capture));
///
/// let first = source.next_payload()?.unwrap();
/// assert_eq!((first.line, first.data), (2, vec![0x99, 0x04, 0x03, 0x4d]));
/// let second = source.next_payload()?.unwrap();
/// assert_eq!(second.line, 4);
/// assert!(source.next_payload()?.is_none());
/// # Ok::<(), ruuvitag_core::SourceError>(())
/// ```
pub struct HexLineSource<R> {
    reader: R,
    line: u64,
    buf: String,
}

impl HexLineSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> HexLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> PayloadSource for HexLineSource<R> {
    fn next_payload(&mut self) -> Result<Option<PayloadEvent>, SourceError> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() || text.starts_with(COMMENT_PREFIX) {
                continue;
            }
            let data = decode_hex(text).map_err(|err| SourceError::Hex {
                line: self.line,
                message: err.to_string(),
            })?;
            return Ok(Some(PayloadEvent {
                line: self.line,
                data,
            }));
        }
    }
}

/// Decode a hex payload, ignoring whitespace and `:`/`-` separators.
///
/// # Errors
/// Returns the `hex` error for odd digit counts or non-hex characters.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits: String = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != ':' && *c != '-')
        .collect();
    hex::decode(digits)
}

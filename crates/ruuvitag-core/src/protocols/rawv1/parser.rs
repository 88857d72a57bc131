use serde::{Deserialize, Serialize};

use crate::protocols::common::error::DecodeError;
use crate::protocols::common::layout::VENDOR_PREFIX;
use crate::protocols::common::reader::read_layout;
use crate::protocols::common::types::Acceleration;

use super::layout;
use super::reader::DataFormat3;

/// Decoded data format 3 (RAWv1) reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawV1 {
    /// Always 3.
    pub data_format: u8,
    /// Relative humidity in percent, 0.5 % steps.
    pub humidity: f64,
    /// Temperature in °C, 0.01 °C steps.
    pub temperature: f64,
    /// Pressure in Pa.
    pub pressure: u32,
    /// Acceleration in milli-g.
    pub acceleration: Acceleration,
    /// Battery voltage in mV.
    pub battery: u16,
}

impl From<DataFormat3> for RawV1 {
    fn from(fields: DataFormat3) -> Self {
        Self {
            data_format: fields.data_format,
            humidity: fields.humidity(),
            temperature: fields.temperature(),
            pressure: fields.pressure(),
            acceleration: fields.acceleration(),
            battery: fields.battery,
        }
    }
}

/// Whether `payload` starts with the format 3 identifier `99 04 03`.
pub fn is_rawv1(payload: &[u8]) -> bool {
    payload.starts_with(&layout::PREFIX)
}

/// Decode a format 3 manufacturer data payload.
///
/// Only the length and the two-byte vendor prefix are checked; the data
/// format byte is reported as-is.
///
/// # Examples
/// ```
/// use ruuvitag_core::protocols::rawv1::parse_rawv1;
///
/// let payload = [
///     0x99, 0x04, 0x03, 0x4D, 0x17, 0x01, 0xC1, 0x87,
///     0x00, 0x08, 0xFF, 0xD5, 0x04, 0x1A, 0x0C, 0x1F,
/// ];
/// let reading = parse_rawv1(&payload)?;
/// assert_eq!(reading.temperature, 23.01);
/// assert_eq!(reading.pressure, 99_543);
/// # Ok::<(), ruuvitag_core::DecodeError>(())
/// ```
///
/// # Errors
/// `InvalidLength` unless the payload is exactly 16 bytes, then
/// `UnrecognizedPrefix` when it does not start with `99 04`.
pub fn parse_rawv1(payload: &[u8]) -> Result<RawV1, DecodeError> {
    if payload.len() != layout::PAYLOAD_LEN {
        return Err(DecodeError::InvalidLength {
            expected: layout::PAYLOAD_LEN,
            actual: payload.len(),
        });
    }
    if !payload.starts_with(&VENDOR_PREFIX) {
        return Err(DecodeError::UnrecognizedPrefix);
    }

    let fields: DataFormat3 = read_layout(&payload[layout::FIELDS_RANGE])?;
    fields.validate()?;
    Ok(fields.into())
}

use serde::{Deserialize, Serialize};

use crate::protocols::common::error::DecodeError;
use crate::protocols::common::layout::VENDOR_PREFIX;
use crate::protocols::common::reader::read_layout;
use crate::protocols::common::types::{Acceleration, MacAddress};

use super::layout;
use super::reader::DataFormat5;

/// Decoded data format 5 (RAWv2) reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawV2 {
    /// Always 5.
    pub data_format: u8,
    /// Temperature in °C, 0.005 °C steps.
    pub temperature: f64,
    /// Relative humidity in percent, 0.0025 % steps (0..=163.835).
    pub humidity: f64,
    /// Pressure in Pa.
    pub pressure: u32,
    /// Acceleration in milli-g.
    pub acceleration: Acceleration,
    /// Battery voltage in mV.
    pub battery: u16,
    /// Transmit power in dBm.
    pub tx_power: i8,
    /// Motion interrupt counter.
    pub movement: u8,
    /// Measurement sequence number.
    pub sequence: u16,
    pub mac: MacAddress,
}

impl From<DataFormat5> for RawV2 {
    fn from(fields: DataFormat5) -> Self {
        Self {
            data_format: fields.data_format,
            temperature: fields.temperature(),
            humidity: fields.humidity(),
            pressure: fields.pressure(),
            acceleration: fields.acceleration(),
            battery: fields.battery(),
            tx_power: fields.tx_power(),
            movement: fields.movement,
            sequence: fields.sequence,
            mac: fields.mac(),
        }
    }
}

/// Whether `payload` starts with the format 5 identifier `99 04 05`.
pub fn is_rawv2(payload: &[u8]) -> bool {
    payload.starts_with(&layout::PREFIX)
}

/// Decode a format 5 manufacturer data payload.
///
/// The reading is always built once the length and vendor prefix check out.
/// When a field holds its "not available" value the reading is returned
/// inside `DecodeError::SentinelValues` instead of `Ok`, and callers must not
/// publish it.
///
/// # Examples
/// ```
/// use ruuvitag_core::DecodeError;
/// use ruuvitag_core::protocols::rawv2::parse_rawv2;
///
/// let mut payload = [
///     0x99, 0x04, 0x05, 0x12, 0xFC, 0x53, 0x94, 0xC3, 0x7C, 0x00, 0x04, 0xFF, 0xFC,
///     0x04, 0x0C, 0xAC, 0x36, 0x42, 0x00, 0xCD, 0xCB, 0xB8, 0x33, 0x4C, 0x88, 0x4F,
/// ];
/// let reading = parse_rawv2(&payload)?;
/// assert_eq!(reading.battery, 2977);
///
/// payload[5] = 0xFF;
/// payload[6] = 0xFF;
/// let err = parse_rawv2(&payload).unwrap_err();
/// assert!(matches!(err, DecodeError::SentinelValues { .. }));
/// assert_eq!(err.sentinel_reading().map(|r| r.sequence), Some(205));
/// # Ok::<(), DecodeError>(())
/// ```
///
/// # Errors
/// `InvalidLength` unless the payload is exactly 26 bytes, then
/// `UnrecognizedPrefix` when it does not start with `99 04`, then
/// `SentinelValues` carrying the decoded reading.
pub fn parse_rawv2(payload: &[u8]) -> Result<RawV2, DecodeError> {
    if payload.len() != layout::PAYLOAD_LEN {
        return Err(DecodeError::InvalidLength {
            expected: layout::PAYLOAD_LEN,
            actual: payload.len(),
        });
    }
    if !payload.starts_with(&VENDOR_PREFIX) {
        return Err(DecodeError::UnrecognizedPrefix);
    }

    let fields: DataFormat5 = read_layout(&payload[layout::FIELDS_RANGE])?;
    fields.validate()?;
    Ok(fields.into())
}

#[cfg(test)]
mod tests {
    use super::{RawV2, is_rawv2, parse_rawv2};
    use crate::protocols::common::error::DecodeError;
    use crate::protocols::common::types::{Acceleration, MacAddress};

    const VALID: [u8; 26] = [
        0x99, 0x04, 0x05, 0x12, 0xFC, 0x53, 0x94, 0xC3, 0x7C, 0x00, 0x04, 0xFF, 0xFC, 0x04, 0x0C,
        0xAC, 0x36, 0x42, 0x00, 0xCD, 0xCB, 0xB8, 0x33, 0x4C, 0x88, 0x4F,
    ];
    const MAC: MacAddress = MacAddress([0xCB, 0xB8, 0x33, 0x4C, 0x88, 0x4F]);

    #[test]
    fn detects_prefix() {
        assert!(is_rawv2(&VALID));
        let rawv1 = [
            0x99, 0x04, 0x03, 0x4D, 0x17, 0x01, 0xC1, 0x87, 0x00, 0x08, 0xFF, 0xD5, 0x04, 0x1A,
            0x0C, 0x1F,
        ];
        assert!(!is_rawv2(&rawv1));
        assert!(!is_rawv2(&[0x99, 0x04]));
    }

    #[test]
    fn parse_valid_payload() {
        let reading = parse_rawv2(&VALID).unwrap();
        assert_eq!(
            reading,
            RawV2 {
                data_format: 5,
                temperature: 24.3,
                humidity: 53.49,
                pressure: 100_044,
                acceleration: Acceleration {
                    x: 4,
                    y: -4,
                    z: 1036
                },
                battery: 2977,
                tx_power: 4,
                movement: 66,
                sequence: 205,
                mac: MAC,
            }
        );
    }

    #[test]
    fn parse_maximum_values() {
        let payload = [
            0x99, 0x04, 0x05, 0x7F, 0xFF, 0xFF, 0xFE, 0xFF, 0xFE, 0x7F, 0xFF, 0x7F, 0xFF, 0x7F,
            0xFF, 0xFF, 0xDE, 0xFE, 0xFF, 0xFE, 0xCB, 0xB8, 0x33, 0x4C, 0x88, 0x4F,
        ];
        let reading = parse_rawv2(&payload).unwrap();
        assert_eq!(
            reading,
            RawV2 {
                data_format: 5,
                temperature: 163.835,
                humidity: 163.835,
                pressure: 115_534,
                acceleration: Acceleration {
                    x: 32767,
                    y: 32767,
                    z: 32767
                },
                battery: 3646,
                tx_power: 20,
                movement: 254,
                sequence: 65534,
                mac: MAC,
            }
        );
    }

    #[test]
    fn parse_minimum_values() {
        let payload = [
            0x99, 0x04, 0x05, 0x80, 0x01, 0x00, 0x00, 0x00, 0x00, 0x80, 0x01, 0x80, 0x01, 0x80,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0xCB, 0xB8, 0x33, 0x4C, 0x88, 0x4F,
        ];
        let reading = parse_rawv2(&payload).unwrap();
        assert_eq!(reading.temperature, -163.835);
        assert_eq!(reading.humidity, 0.0);
        assert_eq!(reading.pressure, 50_000);
        assert_eq!(
            reading.acceleration,
            Acceleration {
                x: -32767,
                y: -32767,
                z: -32767
            }
        );
        assert_eq!(reading.battery, 1600);
        assert_eq!(reading.tx_power, -40);
        assert_eq!((reading.movement, reading.sequence), (0, 0));
    }

    #[test]
    fn parse_all_sentinels_still_decodes() {
        let payload = [
            0x99, 0x04, 0x05, 0x80, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x80, 0x00, 0x80, 0x00, 0x80,
            0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        ];
        let err = parse_rawv2(&payload).unwrap_err();
        let DecodeError::SentinelValues { fields, reading } = err else {
            panic!("expected sentinel error");
        };
        assert_eq!(
            fields,
            vec![
                "humidity", "pressure", "movement", "sequence", "battery", "tx_power"
            ]
        );
        assert_eq!(
            *reading,
            RawV2 {
                data_format: 5,
                temperature: -163.84,
                humidity: 163.8375,
                pressure: 115_535,
                acceleration: Acceleration {
                    x: -32768,
                    y: -32768,
                    z: -32768
                },
                battery: 3647,
                tx_power: 22,
                movement: 255,
                sequence: 65535,
                mac: MacAddress([0xFF; 6]),
            }
        );
    }

    #[test]
    fn parse_humidity_sentinel_only() {
        let mut payload = VALID;
        payload[5] = 0xFF;
        payload[6] = 0xFF;
        let err = parse_rawv2(&payload).unwrap_err();
        assert_eq!(err.id(), "RUUVI-SENTINEL-VALUES");
        let reading = err.sentinel_reading().expect("reading attached");
        assert_eq!(reading.temperature, 24.3);
        assert_eq!(reading.humidity, 163.8375);
    }

    #[test]
    fn parse_wrong_length() {
        for len in [0, 2, 16, 25, 27] {
            let payload = vec![0u8; len];
            assert_eq!(
                parse_rawv2(&payload),
                Err(DecodeError::InvalidLength {
                    expected: 26,
                    actual: len
                })
            );
        }
    }

    #[test]
    fn parse_unknown_vendor() {
        let payload = [0u8; 26];
        assert_eq!(parse_rawv2(&payload), Err(DecodeError::UnrecognizedPrefix));
    }

    #[test]
    fn parse_is_idempotent() {
        assert_eq!(parse_rawv2(&VALID), parse_rawv2(&VALID));
    }
}

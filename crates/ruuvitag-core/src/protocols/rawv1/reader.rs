use crate::protocols::common::error::DecodeError;
use crate::protocols::common::reader::{FieldLayout, FieldReader};
use crate::protocols::common::types::Acceleration;

use super::layout;

/// Raw format 3 fields, in wire order, following the vendor prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataFormat3 {
    pub data_format: u8,
    pub humidity: u8,
    pub temperature: u8,
    pub temperature_fraction: u8,
    pub pressure: u16,
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub battery: u16,
}

impl FieldLayout for DataFormat3 {
    const SIZE: usize = 14;

    fn read_fields(reader: &mut FieldReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            data_format: reader.read_u8()?,
            humidity: reader.read_u8()?,
            temperature: reader.read_u8()?,
            temperature_fraction: reader.read_u8()?,
            pressure: reader.read_u16_be()?,
            x: reader.read_i16_be()?,
            y: reader.read_i16_be()?,
            z: reader.read_i16_be()?,
            battery: reader.read_u16_be()?,
        })
    }
}

impl DataFormat3 {
    /// Format 3 defines no sentinel values; every bit pattern is a reading.
    pub fn validate(&self) -> Result<(), DecodeError> {
        Ok(())
    }

    pub fn humidity(&self) -> f64 {
        f64::from(self.humidity) * layout::HUMIDITY_STEP
    }

    /// Sign-magnitude temperature: bit 7 is the sign, bits 0..7 the integer
    /// part, the second byte hundredths.
    pub fn temperature(&self) -> f64 {
        sign_magnitude_temperature(self.temperature, self.temperature_fraction)
    }

    pub fn pressure(&self) -> u32 {
        u32::from(self.pressure) + layout::PRESSURE_OFFSET_PA
    }

    pub fn acceleration(&self) -> Acceleration {
        Acceleration {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

pub fn sign_magnitude_temperature(integer: u8, fraction: u8) -> f64 {
    let magnitude = f64::from(integer & layout::TEMPERATURE_MAGNITUDE_MASK)
        + f64::from(fraction) * layout::TEMPERATURE_FRACTION_STEP;
    if integer & layout::TEMPERATURE_SIGN_BIT == 0 {
        magnitude
    } else {
        -magnitude
    }
}

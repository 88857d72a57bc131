use crate::protocols::common::error::DecodeError;
use crate::protocols::common::reader::{FieldLayout, FieldReader};
use crate::protocols::common::types::{Acceleration, MacAddress};

use super::layout;

/// Raw format 5 fields, in wire order, following the vendor prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataFormat5 {
    pub data_format: u8,
    pub temperature: i16,
    pub humidity: u16,
    pub pressure: u16,
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub power_info: u16,
    pub movement: u8,
    pub sequence: u16,
    pub mac: [u8; 6],
}

impl FieldLayout for DataFormat5 {
    const SIZE: usize = 24;

    fn read_fields(reader: &mut FieldReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            data_format: reader.read_u8()?,
            temperature: reader.read_i16_be()?,
            humidity: reader.read_u16_be()?,
            pressure: reader.read_u16_be()?,
            x: reader.read_i16_be()?,
            y: reader.read_i16_be()?,
            z: reader.read_i16_be()?,
            power_info: reader.read_u16_be()?,
            movement: reader.read_u8()?,
            sequence: reader.read_u16_be()?,
            mac: reader.read_array()?,
        })
    }
}

impl DataFormat5 {
    pub fn temperature(&self) -> f64 {
        f64::from(self.temperature) * layout::TEMPERATURE_STEP
    }

    pub fn humidity(&self) -> f64 {
        f64::from(self.humidity) * layout::HUMIDITY_STEP
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

    pub fn battery(&self) -> u16 {
        battery_bits(self.power_info) + layout::BATTERY_OFFSET_MV
    }

    pub fn tx_power(&self) -> i8 {
        let steps = tx_power_bits(self.power_info) as i16;
        // 5 bits: -40..=22 dBm, always fits
        (steps * layout::TX_POWER_STEP_DBM + layout::TX_POWER_OFFSET_DBM) as i8
    }

    pub fn mac(&self) -> MacAddress {
        MacAddress(self.mac)
    }

    /// Names of the fields holding their "not available" value.
    pub fn sentinel_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("humidity", self.humidity == layout::HUMIDITY_INVALID),
            ("pressure", self.pressure == layout::PRESSURE_INVALID),
            ("movement", self.movement == layout::MOVEMENT_INVALID),
            ("sequence", self.sequence == layout::SEQUENCE_INVALID),
            (
                "battery",
                battery_bits(self.power_info) == layout::BATTERY_INVALID,
            ),
            (
                "tx_power",
                tx_power_bits(self.power_info) == layout::TX_POWER_INVALID,
            ),
        ];
        checks
            .into_iter()
            .filter_map(|(name, invalid)| invalid.then_some(name))
            .collect()
    }

    /// Check the sentinel-bearing fields.
    ///
    /// # Errors
    /// `DecodeError::SentinelValues` with the decoded reading attached when
    /// any field holds its sentinel.
    pub fn validate(&self) -> Result<(), DecodeError> {
        let fields = self.sentinel_fields();
        if fields.is_empty() {
            return Ok(());
        }
        Err(DecodeError::SentinelValues {
            fields,
            reading: Box::new((*self).into()),
        })
    }
}

/// Upper 11 bits of the power info field.
pub fn battery_bits(power_info: u16) -> u16 {
    power_info >> layout::TX_POWER_BITS
}

/// Lower 5 bits of the power info field.
pub fn tx_power_bits(power_info: u16) -> u16 {
    power_info & layout::TX_POWER_MASK
}

#[cfg(test)]
mod tests {
    use super::{DataFormat5, battery_bits, tx_power_bits};
    use crate::protocols::common::error::DecodeError;
    use crate::protocols::common::reader::FieldLayout;
    use crate::protocols::rawv2::layout;

    fn valid_fields() -> DataFormat5 {
        DataFormat5 {
            data_format: 5,
            temperature: 0x12FC,
            humidity: 0x5394,
            pressure: 0xC37C,
            x: 4,
            y: -4,
            z: 1036,
            power_info: 0xAC36,
            movement: 0x42,
            sequence: 0x00CD,
            mac: [0xCB, 0xB8, 0x33, 0x4C, 0x88, 0x4F],
        }
    }

    #[test]
    fn layout_size_matches_field_range() {
        assert_eq!(DataFormat5::SIZE, layout::FIELDS_RANGE.len());
    }

    #[test]
    fn power_info_bit_fields() {
        assert_eq!(battery_bits(0xAC36), 1377);
        assert_eq!(tx_power_bits(0xAC36), 22);
        assert_eq!(battery_bits(0xFFFF), 0x07FF);
        assert_eq!(tx_power_bits(0xFFFF), 0x1F);
        assert_eq!(battery_bits(0x001F), 0);
    }

    #[test]
    fn battery_and_tx_power() {
        let fields = valid_fields();
        assert_eq!(fields.battery(), 2977);
        assert_eq!(fields.tx_power(), 4);

        let low = DataFormat5 {
            power_info: 0x0000,
            ..valid_fields()
        };
        assert_eq!(low.battery(), 1600);
        assert_eq!(low.tx_power(), -40);

        let high = DataFormat5 {
            power_info: 0xFFDE,
            ..valid_fields()
        };
        assert_eq!(high.battery(), 3646);
        assert_eq!(high.tx_power(), 20);
    }

    #[test]
    fn scaled_values() {
        let fields = valid_fields();
        assert_eq!(fields.temperature(), 24.3);
        assert_eq!(fields.humidity(), 53.49);
        assert_eq!(fields.pressure(), 100_044);
        assert_eq!(fields.mac().to_string(), "CB:B8:33:4C:88:4F");
    }

    #[test]
    fn valid_fields_have_no_sentinels() {
        assert!(valid_fields().sentinel_fields().is_empty());
        assert!(valid_fields().validate().is_ok());
    }

    #[test]
    fn each_sentinel_is_reported() {
        let cases = [
            (
                DataFormat5 {
                    humidity: 0xFFFF,
                    ..valid_fields()
                },
                "humidity",
            ),
            (
                DataFormat5 {
                    pressure: 0xFFFF,
                    ..valid_fields()
                },
                "pressure",
            ),
            (
                DataFormat5 {
                    movement: 0xFF,
                    ..valid_fields()
                },
                "movement",
            ),
            (
                DataFormat5 {
                    sequence: 0xFFFF,
                    ..valid_fields()
                },
                "sequence",
            ),
            (
                DataFormat5 {
                    power_info: 0xFFE0,
                    ..valid_fields()
                },
                "battery",
            ),
            (
                DataFormat5 {
                    power_info: 0x001F,
                    ..valid_fields()
                },
                "tx_power",
            ),
        ];
        for (fields, name) in cases {
            assert_eq!(fields.sentinel_fields(), vec![name]);
        }
    }

    #[test]
    fn validate_attaches_reading() {
        let fields = DataFormat5 {
            humidity: 0xFFFF,
            ..valid_fields()
        };
        match fields.validate() {
            Err(DecodeError::SentinelValues { fields, reading }) => {
                assert_eq!(fields, vec!["humidity"]);
                assert_eq!(reading.humidity, 163.8375);
                assert_eq!(reading.sequence, 205);
            }
            other => panic!("expected sentinel error, got {other:?}"),
        }
    }
}

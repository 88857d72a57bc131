use crate::protocols::common::layout::{FORMAT_PREFIX_LEN, VENDOR_PREFIX, format_prefix};

pub const DATA_FORMAT: u8 = 3;
pub const PREFIX: [u8; FORMAT_PREFIX_LEN] = format_prefix(DATA_FORMAT);

pub const PAYLOAD_LEN: usize = 16;
pub const FIELDS_RANGE: std::ops::Range<usize> = VENDOR_PREFIX.len()..PAYLOAD_LEN;

pub const HUMIDITY_STEP: f64 = 0.5;
pub const TEMPERATURE_SIGN_BIT: u8 = 0x80;
pub const TEMPERATURE_MAGNITUDE_MASK: u8 = 0x7F;
pub const TEMPERATURE_FRACTION_STEP: f64 = 0.01;
pub const PRESSURE_OFFSET_PA: u32 = 50_000;

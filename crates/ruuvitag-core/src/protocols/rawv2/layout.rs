use crate::protocols::common::layout::{FORMAT_PREFIX_LEN, VENDOR_PREFIX, format_prefix};

pub const DATA_FORMAT: u8 = 5;
pub const PREFIX: [u8; FORMAT_PREFIX_LEN] = format_prefix(DATA_FORMAT);

pub const PAYLOAD_LEN: usize = 26;
pub const FIELDS_RANGE: std::ops::Range<usize> = VENDOR_PREFIX.len()..PAYLOAD_LEN;

pub const TEMPERATURE_STEP: f64 = 0.005;
pub const HUMIDITY_STEP: f64 = 0.0025;
pub const PRESSURE_OFFSET_PA: u32 = 50_000;

// power info: battery in the upper 11 bits, tx power in the lower 5
pub const TX_POWER_BITS: u32 = 5;
pub const TX_POWER_MASK: u16 = 0x1F;
pub const BATTERY_OFFSET_MV: u16 = 1600;
pub const TX_POWER_STEP_DBM: i16 = 2;
pub const TX_POWER_OFFSET_DBM: i16 = -40;

pub const HUMIDITY_INVALID: u16 = 0xFFFF;
pub const PRESSURE_INVALID: u16 = 0xFFFF;
pub const MOVEMENT_INVALID: u8 = 0xFF;
pub const SEQUENCE_INVALID: u16 = 0xFFFF;
pub const BATTERY_INVALID: u16 = 0x07FF;
pub const TX_POWER_INVALID: u16 = 0x1F;

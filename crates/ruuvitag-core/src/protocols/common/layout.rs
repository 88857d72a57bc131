/// Bluetooth SIG company identifier of the beacon vendor.
pub const MANUFACTURER_ID: u16 = 0x0499;

/// `MANUFACTURER_ID` as it appears on the wire (little-endian).
pub const VENDOR_PREFIX: [u8; 2] = MANUFACTURER_ID.to_le_bytes();

/// Length of a format identifier: vendor prefix plus data format byte.
pub const FORMAT_PREFIX_LEN: usize = VENDOR_PREFIX.len() + 1;

pub const fn format_prefix(data_format: u8) -> [u8; FORMAT_PREFIX_LEN] {
    [VENDOR_PREFIX[0], VENDOR_PREFIX[1], data_format]
}

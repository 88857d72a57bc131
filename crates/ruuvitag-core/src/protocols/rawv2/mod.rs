//! Data format 5 (RAWv2) decoding.
//!
//! A 26-byte manufacturer payload: vendor prefix `99 04`, the format byte,
//! temperature, humidity, pressure, acceleration, a packed power info field
//! (11 bits battery, 5 bits transmit power), movement counter, measurement
//! sequence and the 48-bit MAC address.
//!
//! Several fields reserve an all-ones value for "not available". Such
//! payloads still decode, but the reading comes back inside
//! `DecodeError::SentinelValues` so it cannot be mistaken for a valid one.

pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{RawV2, is_rawv2, parse_rawv2};
pub use reader::DataFormat5;

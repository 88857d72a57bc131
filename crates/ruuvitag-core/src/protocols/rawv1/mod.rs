//! Data format 3 (RAWv1) decoding.
//!
//! A 16-byte manufacturer payload: vendor prefix `99 04`, the format byte,
//! then humidity, sign-magnitude temperature, pressure, a three-axis
//! acceleration vector and battery voltage. The format carries no sentinel
//! values, so any payload with the right length and vendor prefix decodes.
//!
//! Offsets and scaling constants live in `layout`, the raw field struct and
//! its conversions in `reader`.

pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{RawV1, is_rawv1, parse_rawv1};
pub use reader::DataFormat3;

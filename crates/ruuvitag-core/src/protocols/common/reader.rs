//! Big-endian byte-layout reader shared by the data format decoders.
//!
//! A layout is a fixed sequence of integer and byte-array fields with no
//! padding. `FieldReader` walks a byte slice with a cursor, advancing by the
//! exact width of each field; `FieldLayout` types describe the field order.

use super::error::DecodeError;

pub struct FieldReader<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.cursor)
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.remaining() < needed {
            return Err(DecodeError::MalformedLayout {
                needed,
                actual: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let [value] = self.read_array::<1>()?;
        Ok(value)
    }

    pub fn read_u16_be(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_i16_be(&mut self) -> Result<i16, DecodeError> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn take(&mut self, width: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .cursor
            .checked_add(width)
            .ok_or(DecodeError::MalformedLayout {
                needed: width,
                actual: self.remaining(),
            })?;
        let bytes = self
            .bytes
            .get(self.cursor..end)
            .ok_or(DecodeError::MalformedLayout {
                needed: width,
                actual: self.remaining(),
            })?;
        self.cursor = end;
        Ok(bytes)
    }
}

/// A fixed field layout that can be filled from a [`FieldReader`].
///
/// `SIZE` is the sum of all field widths; `read_fields` must read the fields
/// in declaration order and nothing else.
pub trait FieldLayout: Sized {
    const SIZE: usize;

    fn read_fields(reader: &mut FieldReader<'_>) -> Result<Self, DecodeError>;
}

/// Fill a layout from the start of `bytes`.
///
/// # Errors
/// Returns `DecodeError::MalformedLayout` when `bytes` is shorter than
/// `T::SIZE`. Callers check the payload length beforehand, so this only fires
/// on an internal inconsistency.
pub fn read_layout<T: FieldLayout>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut reader = FieldReader::new(bytes);
    reader.require_len(T::SIZE)?;
    T::read_fields(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::{FieldLayout, FieldReader, read_layout};
    use crate::protocols::common::error::DecodeError;

    #[derive(Debug, PartialEq)]
    struct Sample {
        tag: u8,
        signed: i16,
        unsigned: u16,
        tail: [u8; 3],
    }

    impl FieldLayout for Sample {
        const SIZE: usize = 8;

        fn read_fields(reader: &mut FieldReader<'_>) -> Result<Self, DecodeError> {
            Ok(Self {
                tag: reader.read_u8()?,
                signed: reader.read_i16_be()?,
                unsigned: reader.read_u16_be()?,
                tail: reader.read_array()?,
            })
        }
    }

    #[test]
    fn reads_fields_in_order() {
        let bytes = [0x05, 0xFF, 0xD5, 0x04, 0x1A, 0xAA, 0xBB, 0xCC];
        let sample: Sample = read_layout(&bytes).unwrap();
        assert_eq!(
            sample,
            Sample {
                tag: 5,
                signed: -43,
                unsigned: 1050,
                tail: [0xAA, 0xBB, 0xCC],
            }
        );
    }

    #[test]
    fn cursor_advances_by_field_width() {
        let bytes = [0x00, 0x01, 0x02, 0x03];
        let mut reader = FieldReader::new(&bytes);
        reader.read_u8().unwrap();
        assert_eq!(reader.position(), 1);
        reader.read_u16_be().unwrap();
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn short_source_is_malformed_layout() {
        let bytes = [0x05, 0x00];
        let err = read_layout::<Sample>(&bytes).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MalformedLayout {
                needed: 8,
                actual: 2
            }
        );
    }

    #[test]
    fn read_past_end_does_not_advance() {
        let bytes = [0x01];
        let mut reader = FieldReader::new(&bytes);
        assert!(reader.read_u16_be().is_err());
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u8().unwrap(), 1);
    }

    #[test]
    fn empty_source() {
        let mut reader = FieldReader::new(&[]);
        assert!(matches!(
            reader.read_u8(),
            Err(DecodeError::MalformedLayout { needed: 1, actual: 0 })
        ));
    }
}

use thiserror::Error;

use crate::protocols::rawv2::RawV2;

/// Errors returned by payload decoding.
///
/// `InvalidLength` and `UnrecognizedPrefix` are checked before any field is
/// read and carry no record. `SentinelValues` is raised after a format 5
/// payload was fully decoded; the best-effort reading travels with the error
/// and must not be published.
///
/// # Examples
/// ```
/// use ruuvitag_core::DecodeError;
///
/// let err = DecodeError::InvalidLength { expected: 16, actual: 0 };
/// assert!(err.to_string().contains("invalid payload length"));
/// assert_eq!(err.id(), "RUUVI-INVALID-LENGTH");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("invalid payload length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("unrecognized payload prefix")]
    UnrecognizedPrefix,
    #[error("sentinel values in fields: {}", .fields.join(", "))]
    SentinelValues {
        fields: Vec<&'static str>,
        reading: Box<RawV2>,
    },
    #[error("malformed layout: need {needed} bytes, got {actual}")]
    MalformedLayout { needed: usize, actual: usize },
}

impl DecodeError {
    /// Stable identifier used to aggregate rejections in reports.
    pub fn id(&self) -> &'static str {
        match self {
            DecodeError::InvalidLength { .. } => "RUUVI-INVALID-LENGTH",
            DecodeError::UnrecognizedPrefix => "RUUVI-UNRECOGNIZED-PREFIX",
            DecodeError::SentinelValues { .. } => "RUUVI-SENTINEL-VALUES",
            DecodeError::MalformedLayout { .. } => "RUUVI-MALFORMED-LAYOUT",
        }
    }

    /// Best-effort reading attached to a sentinel rejection.
    pub fn sentinel_reading(&self) -> Option<&RawV2> {
        match self {
            DecodeError::SentinelValues { reading, .. } => Some(reading),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DecodeError;

    #[test]
    fn ids_are_distinct() {
        let ids = [
            DecodeError::InvalidLength {
                expected: 26,
                actual: 3,
            }
            .id(),
            DecodeError::UnrecognizedPrefix.id(),
            DecodeError::MalformedLayout {
                needed: 2,
                actual: 1,
            }
            .id(),
        ];
        assert_eq!(ids[0], "RUUVI-INVALID-LENGTH");
        assert_eq!(ids[1], "RUUVI-UNRECOGNIZED-PREFIX");
        assert_eq!(ids[2], "RUUVI-MALFORMED-LAYOUT");
    }

    #[test]
    fn structural_errors_carry_no_reading() {
        assert!(DecodeError::UnrecognizedPrefix.sentinel_reading().is_none());
    }

    #[test]
    fn malformed_layout_message() {
        let err = DecodeError::MalformedLayout {
            needed: 14,
            actual: 13,
        };
        assert_eq!(err.to_string(), "malformed layout: need 14 bytes, got 13");
    }
}

// Binary-Coded Decimal (BCD) error types, digit helpers and decoding
// Packed values are read most-significant digit first

use super::width::BcdWidth;
use crate::core::constants::{NIBBLE_BITS, NIBBLE_MASK};
use crate::core::validation::{validate_digits, validate_magnitude, validate_packed_field};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BcdError {
    #[error("Value {value} out of range for {bits}-bit input (expected 0..={max})")]
    ValueOutOfRange { value: i64, bits: u32, max: u64 },

    #[error("Packed BCD {packed:#x} does not fit the BCD field (largest field value {max:#x})")]
    PackedOutOfRange { packed: u64, max: u64 },

    #[error("Invalid BCD digit {digit:#x} at position {position} of {packed:#x}")]
    InvalidDigit { packed: u64, position: u32, digit: u8 },

    #[error("BCD {packed:#x} decodes to {value}, larger than {bits}-bit maximum {max}")]
    MagnitudeTooLarge {
        packed: u64,
        value: u64,
        bits: u32,
        max: u64,
    },

    #[error("Unsupported width: {0} bits (expected 1..=32)")]
    InvalidWidth(u32),

    #[error("Invalid number literal: {0:?}")]
    InvalidLiteral(String),

    #[error("Conversion record for {packed:#x} does not match its decimal value {decimal} or digits")]
    InvalidRecord { packed: u64, decimal: u64 },

    #[error("Internal consistency failure: {input} encoded as {packed:#x}, which reads back as {decoded}")]
    Consistency { input: u64, packed: u64, decoded: u64 },
}

pub type Result<T> = std::result::Result<T, BcdError>;

/// Broad classification of a [`BcdError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input outside the representable domain
    Range,
    /// A digit group above 9
    Digit,
    /// Legal digits whose value does not fit the binary width
    Magnitude,
    /// Unusable width configuration
    Config,
    /// Unparseable text input or a malformed serialized record
    Syntax,
    /// The encoder's post-condition failed; a defect, not a caller mistake
    Internal,
}

impl BcdError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BcdError::ValueOutOfRange { .. } | BcdError::PackedOutOfRange { .. } => {
                ErrorKind::Range
            }
            BcdError::InvalidDigit { .. } => ErrorKind::Digit,
            BcdError::MagnitudeTooLarge { .. } => ErrorKind::Magnitude,
            BcdError::InvalidWidth(_) => ErrorKind::Config,
            BcdError::InvalidLiteral(_) | BcdError::InvalidRecord { .. } => ErrorKind::Syntax,
            BcdError::Consistency { .. } => ErrorKind::Internal,
        }
    }

    /// True when the error signals a bug in the converter itself
    pub fn is_internal(&self) -> bool {
        self.kind() == ErrorKind::Internal
    }
}

/// Read the digit group at `position` (0 = units, 1 = tens, ...)
pub fn nibble(packed: u64, position: u32) -> u8 {
    ((packed >> (position * NIBBLE_BITS)) & NIBBLE_MASK) as u8
}

/// Split a packed value into `count` digit groups, most significant first.
/// Groups are returned as stored, without legality checks.
/// Example: (0x255, 3) -> [2, 5, 5]
pub fn split_digits(packed: u64, count: u32) -> Vec<u8> {
    (0..count).rev().map(|position| nibble(packed, position)).collect()
}

/// Sum positional weights of digits given most significant first
/// Example: [1, 2, 7] -> 127
pub fn digits_to_decimal(digits: &[u8]) -> u64 {
    digits
        .iter()
        .fold(0u64, |acc, &digit| acc * 10 + digit as u64)
}

/// Convert a packed BCD value to the binary value it encodes.
///
/// Validation runs in stages: the value must fit in the BCD field, every
/// digit group must be 0-9, and the decoded value must fit `width`.
/// Example: 0x127 -> 127
pub fn decode(width: BcdWidth, packed: u64) -> Result<u64> {
    validate_packed_field(width, packed)?;

    let digits = split_digits(packed, width.digits());
    validate_digits(packed, &digits)?;

    let value = digits_to_decimal(&digits);
    validate_magnitude(width, packed, value)?;

    tracing::trace!("Decoded BCD {:#x} -> {}", packed, value);
    Ok(value)
}

/// Decode a packed value using the default 8-bit width
pub fn bcd_to_binary(packed: u64) -> Result<u64> {
    decode(BcdWidth::default(), packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibble() {
        assert_eq!(nibble(0x255, 0), 5);
        assert_eq!(nibble(0x255, 1), 5);
        assert_eq!(nibble(0x255, 2), 2);
        assert_eq!(nibble(0x255, 3), 0);
        assert_eq!(nibble(0xA00, 2), 0xA);
    }

    #[test]
    fn test_split_digits() {
        assert_eq!(split_digits(0x255, 3), vec![2, 5, 5]);
        assert_eq!(split_digits(0x099, 3), vec![0, 9, 9]);
        assert_eq!(split_digits(0x7, 1), vec![7]);
        assert_eq!(split_digits(0x12345, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_digits_to_decimal() {
        assert_eq!(digits_to_decimal(&[1, 2, 7]), 127);
        assert_eq!(digits_to_decimal(&[0, 0, 0]), 0);
        assert_eq!(digits_to_decimal(&[]), 0);
        assert_eq!(digits_to_decimal(&[4, 2, 9, 4, 9, 6, 7, 2, 9, 5]), 4294967295);
    }

    #[test]
    fn test_decode_byte() {
        assert_eq!(bcd_to_binary(0x127).unwrap(), 127);
        assert_eq!(bcd_to_binary(0x099).unwrap(), 99);
        assert_eq!(bcd_to_binary(0x000).unwrap(), 0);
        assert_eq!(bcd_to_binary(0x255).unwrap(), 255);
    }

    #[test]
    fn test_decode_invalid_digit() {
        let err = bcd_to_binary(0xA00).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Digit);
        assert_eq!(
            err,
            BcdError::InvalidDigit {
                packed: 0xA00,
                position: 2,
                digit: 0xA
            }
        );

        assert_eq!(bcd_to_binary(0x00F).unwrap_err().kind(), ErrorKind::Digit);
        assert_eq!(bcd_to_binary(0x0B0).unwrap_err().kind(), ErrorKind::Digit);
        assert_eq!(bcd_to_binary(0xFFF).unwrap_err().kind(), ErrorKind::Digit);
    }

    #[test]
    fn test_decode_magnitude() {
        // Legal digits, but 300 does not fit in 8 bits
        let err = bcd_to_binary(0x300).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Magnitude);
        assert_eq!(bcd_to_binary(0x256).unwrap_err().kind(), ErrorKind::Magnitude);
        assert_eq!(bcd_to_binary(0x999).unwrap_err().kind(), ErrorKind::Magnitude);
    }

    #[test]
    fn test_decode_range() {
        let err = bcd_to_binary(0x1000).unwrap_err();
        assert_eq!(
            err,
            BcdError::PackedOutOfRange {
                packed: 0x1000,
                max: 0xFFF
            }
        );
        assert!(err.to_string().contains("largest field value 0xfff"));
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(bcd_to_binary(u64::MAX).unwrap_err().kind(), ErrorKind::Range);
    }

    #[test]
    fn test_decode_other_widths() {
        let word = BcdWidth::WORD;
        assert_eq!(decode(word, 0x65535).unwrap(), 65535);
        assert_eq!(decode(word, 0x65536).unwrap_err().kind(), ErrorKind::Magnitude);

        let nibble_width = BcdWidth::new(4).unwrap();
        assert_eq!(decode(nibble_width, 0x15).unwrap(), 15);
        assert_eq!(decode(nibble_width, 0x16).unwrap_err().kind(), ErrorKind::Magnitude);
        assert_eq!(decode(nibble_width, 0x100).unwrap_err().kind(), ErrorKind::Range);
    }

    #[test]
    fn test_error_classification() {
        assert!(!BcdError::InvalidWidth(0).is_internal());
        assert!(BcdError::Consistency {
            input: 1,
            packed: 0x2,
            decoded: 2
        }
        .is_internal());
        assert_eq!(
            BcdError::InvalidLiteral("x".to_string()).kind(),
            ErrorKind::Syntax
        );
        assert_eq!(
            BcdError::InvalidRecord {
                packed: 0x127,
                decimal: 7
            }
            .kind(),
            ErrorKind::Syntax
        );
    }
}

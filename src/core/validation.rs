// Input validation shared by the encoder and decoder

use crate::bitwise::bcd::{BcdError, Result};
use crate::bitwise::width::BcdWidth;
use crate::core::constants::MAX_DIGIT;

/// Check a binary input against the width's domain and return it unsigned
pub fn validate_binary(width: BcdWidth, value: i64) -> Result<u64> {
    match u64::try_from(value) {
        Ok(v) if v <= width.max_value() => Ok(v),
        _ => {
            tracing::debug!("Rejecting {} for {} input", value, width);
            Err(BcdError::ValueOutOfRange {
                value,
                bits: width.bits(),
                max: width.max_value(),
            })
        }
    }
}

/// Check that a packed value has no bits set above the BCD field.
///
/// A value above the legal ceiling (0x999 for 3 digits) that still fits in
/// the field necessarily carries an illegal digit, so it is left for
/// [`validate_digits`] to report.
pub fn validate_packed_field(width: BcdWidth, packed: u64) -> Result<()> {
    if packed > width.bcd_mask() {
        tracing::debug!("Rejecting packed BCD {:#x} for {}", packed, width);
        return Err(BcdError::PackedOutOfRange {
            packed,
            max: width.bcd_mask(),
        });
    }
    Ok(())
}

/// Check that every digit group (most significant first) is 0-9
pub fn validate_digits(packed: u64, digits: &[u8]) -> Result<()> {
    let count = digits.len() as u32;
    match digits.iter().position(|&d| d > MAX_DIGIT) {
        Some(index) => {
            let position = count - 1 - index as u32;
            tracing::debug!(
                "Packed BCD {:#x} has digit {:#x} at position {}",
                packed,
                digits[index],
                position
            );
            Err(BcdError::InvalidDigit {
                packed,
                position,
                digit: digits[index],
            })
        }
        None => Ok(()),
    }
}

/// Check that a decoded value fits the width
pub fn validate_magnitude(width: BcdWidth, packed: u64, value: u64) -> Result<()> {
    if value > width.max_value() {
        tracing::debug!("Packed BCD {:#x} decodes to {} beyond {}", packed, value, width);
        return Err(BcdError::MagnitudeTooLarge {
            packed,
            value,
            bits: width.bits(),
            max: width.max_value(),
        });
    }
    Ok(())
}

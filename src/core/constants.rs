// Constants used across the converter - widths, nibble layout, correction rule

/// Bits per BCD digit group
pub const NIBBLE_BITS: u32 = 4;

/// Mask selecting one digit group
pub const NIBBLE_MASK: u64 = 0xF;

/// Largest legal value of a digit group
pub const MAX_DIGIT: u8 = 9;

/// A digit group at or above this value is corrected before the next shift
pub const CORRECTION_THRESHOLD: u64 = 5;

/// Amount added to a digit group that reached the threshold
pub const CORRECTION_ADDEND: u64 = 3;

/// Default binary width (one byte, 0-255)
pub const DEFAULT_WIDTH_BITS: u32 = 8;

/// Widest supported binary input. The working register for this width is
/// 32 + 4 * 10 = 72 bits, which fits in a u128.
pub const MAX_WIDTH_BITS: u32 = 32;

/// Inputs run by the demonstration driver when none are given
pub const SAMPLE_VALUES: [i64; 9] = [0, 1, 9, 10, 25, 99, 100, 127, 255];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correction_rule() {
        // 5 + 3 = 8 shifts to 16 = 0x10, i.e. decimal "10" in BCD
        assert_eq!((CORRECTION_THRESHOLD + CORRECTION_ADDEND) << 1, 0x10);
        assert!(CORRECTION_THRESHOLD + CORRECTION_ADDEND <= NIBBLE_MASK);
    }

    #[test]
    fn test_samples_fit_default_width() {
        let max = (1i64 << DEFAULT_WIDTH_BITS) - 1;
        assert!(SAMPLE_VALUES.iter().all(|&v| (0..=max).contains(&v)));
    }
}

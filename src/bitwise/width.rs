// Bit-width configuration for the converter
// A width W fixes the binary domain and the number of decimal digits D

use super::bcd::{BcdError, Result};
use crate::core::constants::{DEFAULT_WIDTH_BITS, MAX_DIGIT, MAX_WIDTH_BITS, NIBBLE_BITS};
use serde::{Deserialize, Serialize};

/// Binary width `W` together with the digit count `D` it implies.
///
/// Serialized as the bare bit count; deserializing validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BcdWidth {
    bits: u32,
    digits: u32,
}

impl BcdWidth {
    /// 8-bit input, 3 decimal digits
    pub const BYTE: BcdWidth = BcdWidth { bits: 8, digits: 3 };

    /// 16-bit input, 5 decimal digits
    pub const WORD: BcdWidth = BcdWidth { bits: 16, digits: 5 };

    /// Create a width of `bits` bits (1..=32)
    pub fn new(bits: u32) -> Result<Self> {
        if bits == 0 || bits > MAX_WIDTH_BITS {
            return Err(BcdError::InvalidWidth(bits));
        }

        Ok(Self {
            bits,
            digits: decimal_digits((1u64 << bits) - 1),
        })
    }

    /// Number of input bits (`W`), also the number of Double Dabble passes
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of decimal digits (`D`)
    pub const fn digits(&self) -> u32 {
        self.digits
    }

    /// Largest binary value, `2^W - 1`
    pub const fn max_value(&self) -> u64 {
        (1u64 << self.bits) - 1
    }

    /// Width of the BCD field, `4 * D`
    pub const fn bcd_bits(&self) -> u32 {
        self.digits * NIBBLE_BITS
    }

    /// Width of the Double Dabble working register, `W + 4 * D`
    pub const fn register_bits(&self) -> u32 {
        self.bits + self.bcd_bits()
    }

    /// Mask covering every bit of the BCD field
    pub const fn bcd_mask(&self) -> u64 {
        (1u64 << self.bcd_bits()) - 1
    }

    /// Largest packed value with all digits legal, e.g. 0x999 for 3 digits
    pub fn max_packed(&self) -> u64 {
        (0..self.digits).fold(0u64, |acc, _| (acc << NIBBLE_BITS) | MAX_DIGIT as u64)
    }

    /// Number of bytes needed to hold the BCD field
    pub const fn packed_bytes(&self) -> usize {
        self.bcd_bits().div_ceil(8) as usize
    }
}

impl Default for BcdWidth {
    fn default() -> Self {
        Self::BYTE
    }
}

impl TryFrom<u32> for BcdWidth {
    type Error = BcdError;

    fn try_from(bits: u32) -> Result<Self> {
        Self::new(bits)
    }
}

impl From<BcdWidth> for u32 {
    fn from(width: BcdWidth) -> Self {
        width.bits
    }
}

impl std::fmt::Display for BcdWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-bit/{}-digit", self.bits, self.digits)
    }
}

/// Count decimal digits of `value` (0 has one digit)
fn decimal_digits(value: u64) -> u32 {
    let mut digits = 1;
    let mut rest = value / 10;
    while rest > 0 {
        digits += 1;
        rest /= 10;
    }
    digits
}

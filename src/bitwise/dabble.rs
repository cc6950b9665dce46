// Binary to BCD conversion using the Double Dabble (shift-and-add-3) algorithm
// The decoder lives in bcd.rs; this module owns the encoder and the codec type

use super::bcd::{self, digits_to_decimal, split_digits, BcdError, Result};
use super::width::BcdWidth;
use crate::core::constants::{
    CORRECTION_ADDEND, CORRECTION_THRESHOLD, MAX_DIGIT, NIBBLE_BITS, NIBBLE_MASK,
};
use crate::core::validation::validate_binary;
use serde::{Deserialize, Serialize};

/// Result of encoding one binary value.
///
/// Deserializing re-checks the record against its packed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConversion")]
pub struct BcdConversion {
    width: BcdWidth,
    packed: u64,
    bcd_bin: String,
    digits: Vec<u8>,
    decimal: u64,
}

impl BcdConversion {
    /// Width the value was encoded for
    pub fn width(&self) -> BcdWidth {
        self.width
    }

    /// Packed BCD value, e.g. 0x255 for 255
    pub fn packed(&self) -> u64 {
        self.packed
    }

    /// Packed value as a zero-padded bit string, 4 bits per digit
    pub fn bcd_bin(&self) -> &str {
        &self.bcd_bin
    }

    /// All digits, most significant first
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Digit at `position` (0 = units); positions past the width read as 0
    pub fn digit(&self, position: u32) -> u8 {
        let count = self.digits.len() as u32;
        if position >= count {
            return 0;
        }
        self.digits[(count - 1 - position) as usize]
    }

    pub fn hundreds(&self) -> u8 {
        self.digit(2)
    }

    pub fn tens(&self) -> u8 {
        self.digit(1)
    }

    pub fn units(&self) -> u8 {
        self.digit(0)
    }

    /// Decimal value rebuilt from the digits
    pub fn decimal(&self) -> u64 {
        self.decimal
    }

    /// Packed value as big-endian bytes, e.g. 0x255 -> [0x02, 0x55]
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let len = self.width.packed_bytes();
        self.packed.to_be_bytes()[8 - len..].to_vec()
    }

    /// Packed value as little-endian bytes, e.g. 0x255 -> [0x55, 0x02]
    pub fn to_bytes_le(&self) -> Vec<u8> {
        let len = self.width.packed_bytes();
        self.packed.to_le_bytes()[..len].to_vec()
    }
}

/// Unchecked wire form of [`BcdConversion`]
#[derive(Deserialize)]
struct RawConversion {
    width: BcdWidth,
    packed: u64,
    bcd_bin: String,
    digits: Vec<u8>,
    decimal: u64,
}

impl TryFrom<RawConversion> for BcdConversion {
    type Error = BcdError;

    fn try_from(raw: RawConversion) -> Result<Self> {
        let value = bcd::decode(raw.width, raw.packed)?;
        let conversion = finish(raw.width, value, raw.packed)?;

        if conversion.decimal != raw.decimal
            || conversion.digits != raw.digits
            || conversion.bcd_bin != raw.bcd_bin
        {
            return Err(BcdError::InvalidRecord {
                packed: raw.packed,
                decimal: raw.decimal,
            });
        }

        Ok(conversion)
    }
}

impl std::fmt::Display for BcdConversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.packed)
    }
}

/// Run `passes` rounds of correct-then-shift over a register holding
/// `input` in its low `width.bits()` bits, returning the BCD field.
fn shift_add_3(width: BcdWidth, input: u64, passes: u32) -> u64 {
    let bits = width.bits();
    let mut register = input as u128;

    for pass in 0..passes {
        for position in 0..width.digits() {
            let shift = bits + position * NIBBLE_BITS;
            let group = (register >> shift) as u64 & NIBBLE_MASK;
            if group >= CORRECTION_THRESHOLD {
                register += (CORRECTION_ADDEND as u128) << shift;
            }
        }
        register <<= 1;
        tracing::trace!(
            "Pass {}: register={:0w$b}",
            pass + 1,
            register,
            w = width.register_bits() as usize
        );
    }

    (register >> bits) as u64 & width.bcd_mask()
}

/// Build the result record, checking that the digits reproduce `input`
fn finish(width: BcdWidth, input: u64, packed: u64) -> Result<BcdConversion> {
    let digits = split_digits(packed, width.digits());
    let decimal = digits_to_decimal(&digits);

    if decimal != input || digits.iter().any(|&d| d > MAX_DIGIT) {
        tracing::error!(
            "Double Dabble produced {:#x} for {} ({}), reading back as {}",
            packed,
            input,
            width,
            decimal
        );
        return Err(BcdError::Consistency {
            input,
            packed,
            decoded: decimal,
        });
    }

    Ok(BcdConversion {
        width,
        packed,
        bcd_bin: format!("{:0w$b}", packed, w = width.bcd_bits() as usize),
        digits,
        decimal,
    })
}

/// Convert a binary value to BCD.
/// Example (8-bit): 255 -> packed 0x255, digits [2, 5, 5]
pub fn encode(width: BcdWidth, value: i64) -> Result<BcdConversion> {
    let input = validate_binary(width, value)?;
    let packed = shift_add_3(width, input, width.bits());
    let conversion = finish(width, input, packed)?;

    tracing::debug!("Encoded {} -> BCD {:#x} ({})", input, packed, width);
    Ok(conversion)
}

/// Encode a value using the default 8-bit width
pub fn binary_to_bcd(value: i64) -> Result<BcdConversion> {
    encode(BcdWidth::default(), value)
}

/// Encoder and decoder bound to one width
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dabble {
    width: BcdWidth,
}

impl Dabble {
    pub fn new(width: BcdWidth) -> Self {
        Self { width }
    }

    /// Create a codec for a `bits`-bit binary domain
    pub fn with_bits(bits: u32) -> Result<Self> {
        Ok(Self::new(BcdWidth::new(bits)?))
    }

    pub fn width(&self) -> BcdWidth {
        self.width
    }

    /// Binary -> BCD
    pub fn encode(&self, value: i64) -> Result<BcdConversion> {
        encode(self.width, value)
    }

    /// BCD -> binary
    pub fn decode(&self, packed: u64) -> Result<u64> {
        bcd::decode(self.width, packed)
    }
}

// Bit-level BCD conversion: Double Dabble encoder, packed BCD decoder
// and the parsers that feed them

pub mod bcd;
pub mod dabble;
pub mod parser;
pub mod width;

pub use bcd::{bcd_to_binary, decode, BcdError, ErrorKind};
pub use dabble::{binary_to_bcd, encode, BcdConversion, Dabble};
pub use parser::{parse_literal, parse_packed, parse_packed_be, parse_packed_le};
pub use width::BcdWidth;

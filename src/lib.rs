// DABBLE-RS: Binary <-> BCD conversion with the Double Dabble algorithm
// Copyright 2024 - Licensed under GPLv3

pub mod bitwise;
pub mod core;
pub mod formats;

// Re-export commonly used types
pub use bitwise::{
    bcd_to_binary, binary_to_bcd, parse_literal, BcdConversion, BcdError, BcdWidth, Dabble,
    ErrorKind,
};
pub use crate::core::constants::SAMPLE_VALUES;
pub use formats::{ConversionReport, DecodeReport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

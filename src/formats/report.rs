// Conversion reports rendered as text blocks or JSON

use crate::bitwise::bcd::Result;
use crate::bitwise::dabble::{BcdConversion, Dabble};
use serde::{Deserialize, Serialize};

/// One encode run: the input, its BCD record and the value decoded back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub input: i64,
    pub conversion: BcdConversion,
    pub round_trip: u64,
}

impl ConversionReport {
    /// Encode `value`, then decode the packed result back
    pub fn encode(codec: &Dabble, value: i64) -> Result<Self> {
        let conversion = codec.encode(value)?;
        let round_trip = codec.decode(conversion.packed())?;

        Ok(Self {
            input: value,
            conversion,
            round_trip,
        })
    }

    /// Whether decoding gave back the original input
    pub fn is_consistent(&self) -> bool {
        i64::try_from(self.round_trip).is_ok_and(|v| v == self.input)
    }

    /// Render as a human-readable block
    pub fn render_text(&self) -> String {
        let digits = self
            .conversion
            .digits()
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "--- Converting {input} ---\n\
             Binary {input} -> BCD: {packed} ({packed:#x})\n\
             BCD (binary): {bin}\n\
             Decomposed: {digits} -> {decimal}\n\
             BCD -> Binary: {back} (correct: {ok})\n",
            input = self.input,
            packed = self.conversion.packed(),
            bin = self.conversion.bcd_bin(),
            digits = digits,
            decimal = self.conversion.decimal(),
            back = self.round_trip,
            ok = self.is_consistent(),
        )
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One decode run: a packed BCD input and the binary value it encodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeReport {
    pub packed: u64,
    pub value: u64,
}

impl DecodeReport {
    pub fn decode(codec: &Dabble, packed: u64) -> Result<Self> {
        Ok(Self {
            packed,
            value: codec.decode(packed)?,
        })
    }

    pub fn render_text(&self) -> String {
        format!(
            "--- Decoding {:#x} ---\nBCD -> Binary: {}\n",
            self.packed, self.value
        )
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

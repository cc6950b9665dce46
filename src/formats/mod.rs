// Output formats for conversion results
pub mod report;

pub use report::{ConversionReport, DecodeReport};

// Core module containing the converter's constants and input validation
pub mod constants;
pub mod validation;

// Re-export commonly used items
pub use constants::*;

// ============================================================================
// Codec Module
// Binary, wire and JSON encodings for Decimal
// ============================================================================

mod binary;
#[cfg(feature = "serde")]
mod json;
mod wire;

#[cfg(feature = "serde")]
pub use json::JsonDecimal;
pub use wire::{NumberValue, DEFAULT_PRECISION, DEFAULT_SCALE};

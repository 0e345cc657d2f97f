// ============================================================================
// Float Module
// Exact binary-to-decimal digit reconstruction for IEEE754 values
// ============================================================================
//
// This module provides:
// - DigitBuffer: bounded ASCII digit string with base-2 shifts and rounding
// - FloatFormat: binary32/binary64 layout descriptors
// - FloatConverter: shortest round-trip and exact digit generation
//
// Only the float-constructing paths of Decimal go through here; all other
// decimal arithmetic works on the big-integer coefficient directly.

mod digit_buffer;
mod shortest;

pub use digit_buffer::{DigitBuffer, DIGIT_CAPACITY};
pub use shortest::{FloatConverter, FloatFormat};

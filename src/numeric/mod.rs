// ============================================================================
// Numeric Module
// Arbitrary-precision fixed-point decimals
// ============================================================================
//
// This module provides:
// - Decimal: BigInt coefficient scaled by a power of ten
// - NumericError: Error types for parsing, arithmetic and decoding
// - String parsing/rendering and rust_decimal interop
//
// Design principles:
// - Values are immutable; every operation returns a new Decimal
// - Equality and hashing ignore the representation (1.50 == 1.5)
// - Operator traits panic on fatal conditions; checked_* methods return Result

mod decimal;
mod errors;
mod format;
mod interop;
mod parse;

pub use decimal::{Decimal, DEFAULT_DIVISION_PRECISION};
pub use errors::{NumericError, NumericResult};

// ============================================================================
// Numeric Errors
// Error types for decimal construction, arithmetic and decoding
// ============================================================================

use std::fmt;

/// Errors that can occur while building, combining or decoding decimals.
///
/// Parse failures carry the offending input so the caller can report which
/// token was rejected. `ExponentOverflow`, `DivisionByZero` and
/// `InvalidFloat` are the conditions the non-`checked_*` API treats as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Value does not fit the target representation
    Overflow,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Attempted division by zero
    DivisionByZero,
    /// Result exponent left the i32 range
    ExponentOverflow(i64),
    /// NaN or infinite float given where a finite value is required
    InvalidFloat(String),
    /// Input string is not a decimal number
    InvalidFormat(String),
    /// Exponent token after `e`/`E` is not an integer
    NonNumericExponent(String),
    /// Exponent is an integer but falls outside the i32 range
    FractionalPartTooLong(String),
    /// More than one `.` in the input
    TooManyDecimalPoints(String),
    /// `pow` called with an exponent that has a fractional part
    NonIntegerExponent(String),
    /// Binary or wire data is truncated or malformed
    InvalidEncoding(String),
    /// Configuration value out of range
    InvalidConfig(String),
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: value does not fit the target type")
            },
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::DivisionByZero => write!(f, "decimal division by 0"),
            NumericError::ExponentOverflow(exp) => {
                write!(f, "exponent {} overflows an i32", exp)
            },
            NumericError::InvalidFloat(value) => {
                write!(f, "cannot create a decimal from {}", value)
            },
            NumericError::InvalidFormat(input) => {
                write!(f, "unable to convert '{}' to decimal", input)
            },
            NumericError::NonNumericExponent(input) => write!(
                f,
                "unable to convert '{}' to decimal as the exponent is not numeric",
                input
            ),
            NumericError::FractionalPartTooLong(input) => write!(
                f,
                "unable to convert '{}' to decimal as the fractional part seems too long",
                input
            ),
            NumericError::TooManyDecimalPoints(input) => write!(
                f,
                "unable to convert '{}' to decimal as it has too many decimal points",
                input
            ),
            NumericError::NonIntegerExponent(exp) => {
                write!(f, "power is only defined for integer exponents, got {}", exp)
            },
            NumericError::InvalidEncoding(reason) => {
                write!(f, "invalid encoded decimal: {}", reason)
            },
            NumericError::InvalidConfig(reason) => {
                write!(f, "invalid decimal configuration: {}", reason)
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

/// Log and abort on a condition the unchecked API refuses to clamp.
#[cold]
#[track_caller]
pub(crate) fn fatal(err: NumericError) -> ! {
    tracing::error!(error = %err, "fatal decimal error");
    panic!("{}", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::ExponentOverflow(2_147_483_648).to_string(),
            "exponent 2147483648 overflows an i32"
        );
        assert_eq!(
            NumericError::DivisionByZero.to_string(),
            "decimal division by 0"
        );
        assert_eq!(
            NumericError::TooManyDecimalPoints("1.2.3".to_string()).to_string(),
            "unable to convert '1.2.3' to decimal as it has too many decimal points"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(
            NumericError::NonNumericExponent("1ex".to_string()),
            NumericError::FractionalPartTooLong("1ex".to_string())
        );
    }

    #[test]
    #[should_panic(expected = "decimal division by 0")]
    fn test_fatal_panics_with_message() {
        fatal(NumericError::DivisionByZero);
    }
}

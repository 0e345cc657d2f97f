// ============================================================================
// Conversion to and from rust_decimal (for API boundaries)
// ============================================================================

use super::decimal::{pow10, Decimal};
use super::errors::{NumericError, NumericResult};
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

/// Largest scale a `rust_decimal::Decimal` can carry.
const RUST_DECIMAL_MAX_SCALE: i64 = 28;

impl From<rust_decimal::Decimal> for Decimal {
    /// Exact: the 96-bit mantissa becomes the coefficient and the scale the
    /// negated exponent.
    fn from(value: rust_decimal::Decimal) -> Self {
        Decimal::from_parts(BigInt::from(value.mantissa()), -(value.scale() as i32))
    }
}

impl TryFrom<&Decimal> for rust_decimal::Decimal {
    type Error = NumericError;

    /// Convert after stripping trailing zeros.
    ///
    /// # Errors
    /// - `PrecisionLoss` if more than 28 fractional digits are significant
    /// - `Overflow` if the value exceeds the 96-bit mantissa
    fn try_from(value: &Decimal) -> NumericResult<Self> {
        let (coefficient, exponent) = value.normalized();
        if coefficient.is_zero() {
            return Ok(rust_decimal::Decimal::ZERO);
        }
        if exponent < -RUST_DECIMAL_MAX_SCALE {
            return Err(NumericError::PrecisionLoss);
        }
        if exponent > RUST_DECIMAL_MAX_SCALE + 1 {
            return Err(NumericError::Overflow);
        }

        let (mantissa, scale) = if exponent > 0 {
            (coefficient * pow10(exponent as u32), 0)
        } else {
            (coefficient, exponent.unsigned_abs() as u32)
        };
        let mantissa = mantissa.to_i128().ok_or(NumericError::Overflow)?;

        rust_decimal::Decimal::try_from_i128_with_scale(mantissa, scale)
            .map_err(|_| NumericError::Overflow)
    }
}

impl TryFrom<Decimal> for rust_decimal::Decimal {
    type Error = NumericError;

    #[inline]
    fn try_from(value: Decimal) -> NumericResult<Self> {
        rust_decimal::Decimal::try_from(&value)
    }
}

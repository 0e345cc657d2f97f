// ============================================================================
// Arbitrary-Precision Decimal
// Immutable coefficient * 10^exponent value type
// ============================================================================

use super::errors::{fatal, NumericError, NumericResult};
use crate::float::{DigitBuffer, FloatConverter};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// Fractional digits produced by `/` and `Decimal::checked_div` when the quotient
/// does not terminate.
pub const DEFAULT_DIVISION_PRECISION: i32 = 16;

/// Fixed-point decimal number: `coefficient × 10^exponent`.
///
/// The coefficient is an arbitrary-precision integer, so values never lose
/// digits to a fixed width. Every operation returns a new value.
///
/// The exponent is kept as given: `1.50` (150 × 10^-2) and `1.5`
/// (15 × 10^-1) compare equal and hash equally, but `exponent()` and
/// `coefficient()` still report the representation they were built with.
///
/// # Example
/// ```
/// use exact_decimal::numeric::Decimal;
///
/// let price: Decimal = "123.450".parse().unwrap();
/// assert_eq!(price.exponent(), -2);
/// assert_eq!(price.to_string(), "123.45");
///
/// let half = Decimal::new(5, 0) / Decimal::new(2, 0);
/// assert_eq!(half.to_string(), "2.5");
/// ```
#[derive(Clone, Default)]
pub struct Decimal {
    coefficient: BigInt,
    exponent: i32,
}

/// 10^n as a big integer.
pub(crate) fn pow10(n: u32) -> BigInt {
    BigInt::from(10u8).pow(n)
}

impl Decimal {
    /// Zero (0 × 10^0)
    pub const ZERO: Decimal = Decimal {
        coefficient: BigInt::ZERO,
        exponent: 0,
    };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create `value × 10^exponent`.
    #[inline]
    pub fn new(value: i64, exponent: i32) -> Self {
        Self {
            coefficient: BigInt::from(value),
            exponent,
        }
    }

    /// Create `value × 10^exponent` from a borrowed big integer (copied).
    #[inline]
    pub fn from_bigint(value: &BigInt, exponent: i32) -> Self {
        Self::from_parts(value.clone(), exponent)
    }

    /// Create from an owned coefficient and exponent.
    #[inline]
    pub fn from_parts(coefficient: BigInt, exponent: i32) -> Self {
        Self {
            coefficient,
            exponent,
        }
    }

    /// Shortest decimal that converts back to exactly `value`.
    ///
    /// # Panics
    /// Panics on NaN or infinity. Use [`Decimal::try_from_f64`] to get an
    /// error instead.
    pub fn from_f64(value: f64) -> Self {
        Self::try_from_f64(value).unwrap_or_else(|err| fatal(err))
    }

    /// Checked form of [`Decimal::from_f64`].
    pub fn try_from_f64(value: f64) -> NumericResult<Self> {
        if value == 0.0 {
            return Ok(Self::ZERO);
        }
        let converter = FloatConverter::from_f64(value)?;
        Ok(Self::from_digit_buffer(&converter.shortest_digits()))
    }

    /// Shortest decimal that converts back to exactly the binary32 `value`.
    ///
    /// # Panics
    /// Panics on NaN or infinity.
    pub fn from_f32(value: f32) -> Self {
        Self::try_from_f32(value).unwrap_or_else(|err| fatal(err))
    }

    /// Checked form of [`Decimal::from_f32`].
    pub fn try_from_f32(value: f32) -> NumericResult<Self> {
        if value == 0.0 {
            return Ok(Self::ZERO);
        }
        let converter = FloatConverter::from_f32(value)?;
        Ok(Self::from_digit_buffer(&converter.shortest_digits()))
    }

    /// The exact binary value of `value`, every digit kept.
    ///
    /// `from_f64_exact(0.1)` is
    /// `0.1000000000000000055511151231257827021181583404541015625`.
    ///
    /// # Panics
    /// Panics on NaN or infinity.
    pub fn from_f64_exact(value: f64) -> Self {
        Self::try_from_f64_exact(value).unwrap_or_else(|err| fatal(err))
    }

    /// Checked form of [`Decimal::from_f64_exact`].
    pub fn try_from_f64_exact(value: f64) -> NumericResult<Self> {
        if value == 0.0 {
            return Ok(Self::ZERO);
        }
        let converter = FloatConverter::from_f64(value)?;
        Ok(Self::from_digit_buffer(&converter.exact_digits()))
    }

    /// Convert `value` to a decimal with `exponent` as the target scale.
    ///
    /// A negative `exponent` asks for that many fractional digits; it is
    /// capped at the number the binary value actually has. The last kept
    /// digit is rounded half up.
    ///
    /// # Panics
    /// Panics on NaN or infinity.
    pub fn from_f64_with_exponent(value: f64, exponent: i32) -> Self {
        Self::try_from_f64_with_exponent(value, exponent).unwrap_or_else(|err| fatal(err))
    }

    /// Checked form of [`Decimal::from_f64_with_exponent`].
    pub fn try_from_f64_with_exponent(value: f64, exponent: i32) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidFloat(value.to_string()));
        }

        let bits = value.to_bits();
        let mut mantissa = bits & ((1u64 << 52) - 1);
        let biased = ((bits >> 52) & 0x7ff) as i64;
        let negative = bits >> 63 != 0;

        let mut exp2 = if biased == 0 {
            if mantissa == 0 {
                return Ok(Self::ZERO);
            }
            1
        } else {
            mantissa |= 1u64 << 52;
            biased
        };
        exp2 -= 1023 + 52;

        // value = mantissa * 2^exp2 with an odd mantissa
        let zeros = mantissa.trailing_zeros();
        mantissa >>= zeros;
        exp2 += i64::from(zeros);

        // A binary fraction 2^-N never needs more than N decimal places.
        let mut exp10 = i64::from(exponent);
        if exp10 < 0 && exp10 < exp2 {
            exp10 = exp2.min(0);
        }

        // 10^M * 2^N = 5^M * 2^(M+N)
        exp2 -= exp10;

        let mut scaled = BigInt::from(mantissa);
        let mut divisor = BigInt::one();
        if exp10 > 0 {
            divisor = BigInt::from(5u8).pow(exp10 as u32);
        } else if exp10 < 0 {
            scaled *= BigInt::from(5u8).pow((-exp10) as u32);
        }
        if exp2 > 0 {
            scaled <<= exp2 as usize;
        } else if exp2 < 0 {
            divisor <<= (-exp2) as usize;
        }

        if exp10 > 0 || exp2 < 0 {
            let half = &divisor >> 1usize;
            scaled = (scaled + half) / &divisor;
        }
        if negative {
            scaled = -scaled;
        }

        Ok(Self::from_parts(scaled, exp10 as i32))
    }

    fn from_digit_buffer(buffer: &DigitBuffer) -> Self {
        let magnitude = BigInt::parse_bytes(buffer.digits(), 10).unwrap_or_default();
        let coefficient = if buffer.is_negative() {
            -magnitude
        } else {
            magnitude
        };
        Self::from_parts(coefficient, buffer.exponent())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Power-of-ten scale of the coefficient.
    #[inline]
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Unscaled integer value.
    #[inline]
    pub fn coefficient(&self) -> &BigInt {
        &self.coefficient
    }

    /// Split into (coefficient, exponent).
    #[inline]
    pub fn into_parts(self) -> (BigInt, i32) {
        (self.coefficient, self.exponent)
    }

    /// -1, 0 or 1 according to the sign of the value.
    #[inline]
    pub fn signum(&self) -> i32 {
        if self.coefficient.is_positive() {
            1
        } else if self.coefficient.is_negative() {
            -1
        } else {
            0
        }
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.coefficient.is_positive()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.coefficient.is_negative()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// Integer part (truncated toward zero), if it fits an i64.
    pub fn integer_part(&self) -> Option<i64> {
        self.rescale(0).coefficient.to_i64()
    }

    /// Exact rational value.
    pub fn to_rational(&self) -> BigRational {
        if self.exponent <= 0 {
            BigRational::new(
                self.coefficient.clone(),
                pow10(self.exponent.unsigned_abs()),
            )
        } else {
            BigRational::from_integer(&self.coefficient * pow10(self.exponent as u32))
        }
    }

    /// Nearest f64, and whether that f64 equals the decimal exactly.
    pub fn to_f64(&self) -> (f64, bool) {
        let value: f64 = format!("{}e{}", self.coefficient, self.exponent)
            .parse()
            .unwrap_or(f64::NAN);
        let exact = value.is_finite()
            && Self::try_from_f64_exact(value).is_ok_and(|binary| binary == *self);
        (value, exact)
    }

    // ========================================================================
    // Scaling
    // ========================================================================

    /// Re-express the value with `exponent`.
    ///
    /// Moving to a smaller exponent is exact. Moving to a larger one drops
    /// digits by truncation, never rounding.
    pub(crate) fn rescale(&self, exponent: i32) -> Decimal {
        let diff = (i64::from(exponent) - i64::from(self.exponent)).unsigned_abs() as u32;
        let coefficient = match exponent.cmp(&self.exponent) {
            Ordering::Greater => &self.coefficient / pow10(diff),
            Ordering::Less => &self.coefficient * pow10(diff),
            Ordering::Equal => self.coefficient.clone(),
        };
        Decimal {
            coefficient,
            exponent,
        }
    }

    /// Coefficient stripped of trailing zeros, with the matching exponent.
    pub(crate) fn normalized(&self) -> (BigInt, i64) {
        if self.coefficient.is_zero() {
            return (BigInt::zero(), 0);
        }
        let ten = BigInt::from(10u8);
        let mut coefficient = self.coefficient.clone();
        let mut exponent = i64::from(self.exponent);
        loop {
            let (quo, rem) = coefficient.div_rem(&ten);
            if !rem.is_zero() {
                break;
            }
            coefficient = quo;
            exponent += 1;
        }
        (coefficient, exponent)
    }

    /// Multiply by 10^shift by moving the exponent; the coefficient is
    /// untouched.
    ///
    /// # Panics
    /// Panics if the exponent leaves the i32 range.
    pub fn shift(&self, shift: i32) -> Decimal {
        self.checked_shift(shift).unwrap_or_else(|err| fatal(err))
    }

    /// Checked form of [`Decimal::shift`].
    pub fn checked_shift(&self, shift: i32) -> NumericResult<Decimal> {
        let exponent = checked_exponent(i64::from(self.exponent) + i64::from(shift))?;
        Ok(Decimal {
            coefficient: self.coefficient.clone(),
            exponent,
        })
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Absolute value.
    pub fn abs(&self) -> Decimal {
        Decimal {
            coefficient: self.coefficient.abs(),
            exponent: self.exponent,
        }
    }

    fn sum(&self, rhs: &Decimal, subtract: bool) -> Decimal {
        let base = self.exponent.min(rhs.exponent);
        let left = self.rescale(base).coefficient;
        let right = rhs.rescale(base).coefficient;
        Decimal {
            coefficient: if subtract { left - right } else { left + right },
            exponent: base,
        }
    }

    /// Product; exponents add.
    ///
    /// # Errors
    /// Returns `ExponentOverflow` if the summed exponent leaves the i32 range.
    pub fn checked_mul(&self, rhs: &Decimal) -> NumericResult<Decimal> {
        let exponent = checked_exponent(i64::from(self.exponent) + i64::from(rhs.exponent))?;
        Ok(Decimal {
            coefficient: &self.coefficient * &rhs.coefficient,
            exponent,
        })
    }

    /// Quotient `q` and remainder `r` with `self = divisor * q + r`, where
    /// `q` is an integer multiple of 10^-precision and `r` carries the sign
    /// of `self` with `|r| < |divisor| * 10^-precision`.
    ///
    /// # Panics
    /// Panics if `divisor` is zero or a result exponent overflows.
    pub fn quo_rem(&self, divisor: &Decimal, precision: i32) -> (Decimal, Decimal) {
        self.checked_quo_rem(divisor, precision)
            .unwrap_or_else(|err| fatal(err))
    }

    /// Checked form of [`Decimal::quo_rem`].
    pub fn checked_quo_rem(
        &self,
        divisor: &Decimal,
        precision: i32,
    ) -> NumericResult<(Decimal, Decimal)> {
        if divisor.is_zero() {
            return Err(NumericError::DivisionByZero);
        }

        let scale = -i64::from(precision);
        let quotient_exponent = checked_exponent(scale)?;
        let exp_scale = checked_exponent(
            i64::from(self.exponent) - i64::from(divisor.exponent) - scale,
        )?;

        let (numerator, denominator, remainder_exponent) = if exp_scale < 0 {
            (
                self.coefficient.clone(),
                &divisor.coefficient * pow10(exp_scale.unsigned_abs()),
                self.exponent,
            )
        } else {
            (
                &self.coefficient * pow10(exp_scale as u32),
                divisor.coefficient.clone(),
                checked_exponent(scale + i64::from(divisor.exponent))?,
            )
        };

        let (quotient, remainder) = numerator.div_rem(&denominator);
        Ok((
            Decimal::from_parts(quotient, quotient_exponent),
            Decimal::from_parts(remainder, remainder_exponent),
        ))
    }

    /// Divide and round to `precision` fractional digits, half away from
    /// zero.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    pub fn div_round(&self, divisor: &Decimal, precision: i32) -> Decimal {
        self.checked_div_round(divisor, precision)
            .unwrap_or_else(|err| fatal(err))
    }

    /// Checked form of [`Decimal::div_round`].
    pub fn checked_div_round(&self, divisor: &Decimal, precision: i32) -> NumericResult<Decimal> {
        let (quotient, remainder) = self.checked_quo_rem(divisor, precision)?;

        // Compare 2 * |r| * 10^precision against |divisor|.
        let doubled = Decimal {
            coefficient: remainder.coefficient.abs() << 1usize,
            exponent: checked_exponent(i64::from(remainder.exponent) + i64::from(precision))?,
        };
        if doubled.cmp(&divisor.abs()) == Ordering::Less {
            return Ok(quotient);
        }

        let unit = Decimal::new(1, quotient.exponent);
        if self.signum() * divisor.signum() < 0 {
            Ok(quotient.sum(&unit, true))
        } else {
            Ok(quotient.sum(&unit, false))
        }
    }

    /// `self / divisor` at [`DEFAULT_DIVISION_PRECISION`].
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `divisor` is zero.
    pub fn checked_div(&self, divisor: &Decimal) -> NumericResult<Decimal> {
        self.checked_div_round(divisor, DEFAULT_DIVISION_PRECISION)
    }

    /// `self - divisor * trunc(self / divisor)`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `divisor` is zero.
    pub fn checked_rem(&self, divisor: &Decimal) -> NumericResult<Decimal> {
        let quotient = self.checked_div(divisor)?.truncate(0);
        Ok(self.sum(&divisor.checked_mul(&quotient)?, true))
    }

    /// `self` raised to an integer-valued `exponent`.
    ///
    /// Negative exponents divide at [`DEFAULT_DIVISION_PRECISION`].
    ///
    /// # Errors
    /// - `NonIntegerExponent` if `exponent` has a fractional part
    /// - `DivisionByZero` for zero raised to a negative power
    /// - `ExponentOverflow` if an intermediate exponent overflows
    pub fn pow(&self, exponent: &Decimal) -> NumericResult<Decimal> {
        self.pow_with_precision(exponent, DEFAULT_DIVISION_PRECISION)
    }

    /// [`Decimal::pow`] with an explicit division precision for negative
    /// exponents.
    pub fn pow_with_precision(&self, exponent: &Decimal, precision: i32) -> NumericResult<Decimal> {
        let power = exponent.integral_value()?;
        if power.is_zero() {
            return Ok(Decimal::one());
        }
        let mut remaining = power.magnitude().to_u64().ok_or(NumericError::Overflow)?;

        // square-and-multiply
        let mut base = self.clone();
        let mut result = Decimal::one();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.checked_mul(&base)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.checked_mul(&base)?;
            }
        }

        if power.is_negative() {
            Decimal::one().checked_div_round(&result, precision)
        } else {
            Ok(result)
        }
    }

    fn integral_value(&self) -> NumericResult<BigInt> {
        if self.exponent >= 0 {
            return Ok(&self.coefficient * pow10(self.exponent as u32));
        }
        let (quotient, remainder) = self
            .coefficient
            .div_rem(&pow10(self.exponent.unsigned_abs()));
        if remainder.is_zero() {
            Ok(quotient)
        } else {
            Err(NumericError::NonIntegerExponent(self.to_string()))
        }
    }

    // ========================================================================
    // Rounding
    // ========================================================================

    /// Round to `places` fractional digits, half away from zero.
    ///
    /// A negative `places` rounds the integer part to the nearest
    /// 10^-places.
    pub fn round(&self, places: i32) -> Decimal {
        // Work one digit past the target, truncating anything beyond it.
        let target = -places.max(i32::MIN + 1) - 1;
        let widened = self.rescale(target);

        let five = BigInt::from(5u8);
        let nudged = if widened.coefficient.is_negative() {
            widened.coefficient - five
        } else {
            widened.coefficient + five
        };

        Decimal {
            coefficient: nudged / BigInt::from(10u8),
            exponent: target + 1,
        }
    }

    /// Largest integer not greater than the value.
    pub fn floor(&self) -> Decimal {
        if self.exponent >= 0 {
            return self.clone();
        }
        let scale = pow10(self.exponent.unsigned_abs());
        Decimal::from_parts(self.coefficient.div_floor(&scale), 0)
    }

    /// Smallest integer not less than the value.
    pub fn ceil(&self) -> Decimal {
        if self.exponent >= 0 {
            return self.clone();
        }
        let scale = pow10(self.exponent.unsigned_abs());
        let (mut quotient, remainder) = self.coefficient.div_mod_floor(&scale);
        if !remainder.is_zero() {
            quotient += 1;
        }
        Decimal::from_parts(quotient, 0)
    }

    /// Drop fractional digits beyond `precision` without rounding.
    ///
    /// Values that already have `precision` or fewer fractional digits are
    /// returned unchanged.
    pub fn truncate(&self, precision: i32) -> Decimal {
        if precision >= 0 && -precision > self.exponent {
            self.rescale(-precision)
        } else {
            self.clone()
        }
    }
}

fn checked_exponent(exponent: i64) -> NumericResult<i32> {
    i32::try_from(exponent).map_err(|_| NumericError::ExponentOverflow(exponent))
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialEq for Decimal {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.exponent == other.exponent {
            return self.coefficient.cmp(&other.coefficient);
        }
        let base = self.exponent.min(other.exponent);
        self.rescale(base)
            .coefficient
            .cmp(&other.rescale(base).coefficient)
    }
}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (coefficient, exponent) = self.normalized();
        coefficient.hash(state);
        exponent.hash(state);
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    #[inline]
    fn neg(self) -> Decimal {
        Decimal {
            coefficient: -self.coefficient,
            exponent: self.exponent,
        }
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    #[inline]
    fn neg(self) -> Decimal {
        Decimal {
            coefficient: -&self.coefficient,
            exponent: self.exponent,
        }
    }
}

// Fatal conditions (exponent overflow, division by zero) panic here; use the
// checked_* methods where the caller can recover.
macro_rules! forward_binary_op {
    ($op:ident, $method:ident, |$lhs:ident, $rhs:ident| $body:expr) => {
        impl $op<&Decimal> for &Decimal {
            type Output = Decimal;

            #[inline]
            fn $method(self, rhs: &Decimal) -> Decimal {
                let ($lhs, $rhs) = (self, rhs);
                $body
            }
        }

        impl $op<Decimal> for Decimal {
            type Output = Decimal;

            #[inline]
            fn $method(self, rhs: Decimal) -> Decimal {
                (&self).$method(&rhs)
            }
        }

        impl $op<&Decimal> for Decimal {
            type Output = Decimal;

            #[inline]
            fn $method(self, rhs: &Decimal) -> Decimal {
                (&self).$method(rhs)
            }
        }

        impl $op<Decimal> for &Decimal {
            type Output = Decimal;

            #[inline]
            fn $method(self, rhs: Decimal) -> Decimal {
                self.$method(&rhs)
            }
        }
    };
}

forward_binary_op!(Add, add, |lhs, rhs| lhs.sum(rhs, false));
forward_binary_op!(Sub, sub, |lhs, rhs| lhs.sum(rhs, true));
forward_binary_op!(Mul, mul, |lhs, rhs| lhs
    .checked_mul(rhs)
    .unwrap_or_else(|err| fatal(err)));
forward_binary_op!(Div, div, |lhs, rhs| lhs
    .checked_div(rhs)
    .unwrap_or_else(|err| fatal(err)));
forward_binary_op!(Rem, rem, |lhs, rhs| lhs
    .checked_rem(rhs)
    .unwrap_or_else(|err| fatal(err)));

impl Zero for Decimal {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }
}

impl One for Decimal {
    #[inline]
    fn one() -> Self {
        Self::new(1, 0)
    }
}

impl From<i64> for Decimal {
    #[inline]
    fn from(value: i64) -> Self {
        Self::new(value, 0)
    }
}

impl From<i32> for Decimal {
    #[inline]
    fn from(value: i32) -> Self {
        Self::new(i64::from(value), 0)
    }
}

impl From<u64> for Decimal {
    #[inline]
    fn from(value: u64) -> Self {
        Self::from_parts(BigInt::from(value), 0)
    }
}

impl From<BigInt> for Decimal {
    #[inline]
    fn from(value: BigInt) -> Self {
        Self::from_parts(value, 0)
    }
}

impl TryFrom<f64> for Decimal {
    type Error = NumericError;

    #[inline]
    fn try_from(value: f64) -> NumericResult<Self> {
        Self::try_from_f64(value)
    }
}

impl TryFrom<f32> for Decimal {
    type Error = NumericError;

    #[inline]
    fn try_from(value: f32) -> NumericResult<Self> {
        Self::try_from_f32(value)
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Decimal({}, coefficient={}, exponent={})",
            self, self.coefficient, self.exponent
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

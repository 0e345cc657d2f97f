// ============================================================================
// Shortest Round-Trip Float Conversion
// IEEE754 bit pattern -> minimal decimal digits that parse back to it
// ============================================================================

use super::digit_buffer::DigitBuffer;
use crate::numeric::{NumericError, NumericResult};

/// Layout of an IEEE754 binary format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatFormat {
    /// Explicit mantissa bits (the implicit leading bit is not counted)
    pub mantissa_bits: u32,
    /// Biased exponent bits
    pub exponent_bits: u32,
    /// Exponent bias, stored negated
    pub bias: i32,
}

impl FloatFormat {
    /// IEEE754 binary32
    pub const F32: FloatFormat = FloatFormat {
        mantissa_bits: 23,
        exponent_bits: 8,
        bias: -127,
    };

    /// IEEE754 binary64
    pub const F64: FloatFormat = FloatFormat {
        mantissa_bits: 52,
        exponent_bits: 11,
        bias: -1023,
    };

    #[inline]
    fn min_exponent(&self) -> i32 {
        self.bias + 1
    }

    /// Split raw bits into (sign, mantissa with implicit bit, unbiased exponent).
    fn decompose(&self, bits: u64) -> (bool, u64, i32) {
        let biased = ((bits >> self.mantissa_bits) & ((1u64 << self.exponent_bits) - 1)) as i32;
        let mut mantissa = bits & ((1u64 << self.mantissa_bits) - 1);
        let negative = (bits >> (self.exponent_bits + self.mantissa_bits)) & 1 != 0;

        let exponent = match biased {
            // subnormal: no implicit bit, same scale as the smallest normal
            0 => 1 + self.bias,
            _ => {
                mantissa |= 1u64 << self.mantissa_bits;
                biased + self.bias
            },
        };
        (negative, mantissa, exponent)
    }
}

/// Converts one IEEE754 value into decimal digits.
///
/// The converter is transient: build it from a finite value, ask for the
/// digits, drop it.
#[derive(Debug, Clone)]
pub struct FloatConverter {
    format: FloatFormat,
    negative: bool,
    mantissa: u64,
    exponent: i32,
}

impl FloatConverter {
    /// Prepare conversion of `value`.
    ///
    /// # Errors
    /// Returns `InvalidFloat` for NaN and infinities.
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidFloat(value.to_string()));
        }
        Ok(Self::from_bits(value.to_bits(), FloatFormat::F64))
    }

    /// Prepare conversion of a binary32 `value`.
    ///
    /// # Errors
    /// Returns `InvalidFloat` for NaN and infinities.
    pub fn from_f32(value: f32) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidFloat(value.to_string()));
        }
        Ok(Self::from_bits(u64::from(value.to_bits()), FloatFormat::F32))
    }

    /// Prepare conversion of a raw bit pattern. The caller guarantees the
    /// pattern is finite for `format`.
    pub fn from_bits(bits: u64, format: FloatFormat) -> Self {
        let (negative, mantissa, exponent) = format.decompose(bits);
        Self {
            format,
            negative,
            mantissa,
            exponent,
        }
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The exact value mantissa * 2^(exponent - mantissa_bits).
    pub fn exact_digits(&self) -> DigitBuffer {
        let mut buffer = DigitBuffer::from_u64(self.mantissa);
        buffer.shift(self.exponent - self.format.mantissa_bits as i32);
        buffer.set_negative(self.negative);
        buffer
    }

    /// The shortest digits that still identify the original float.
    pub fn shortest_digits(&self) -> DigitBuffer {
        let mut buffer = self.exact_digits();
        round_shortest(&mut buffer, self.mantissa, self.exponent, &self.format);
        tracing::trace!(digits = %buffer, "shortest float digits");
        buffer
    }
}

/// Round `buffer` (= mant * 2^(exp - mantissa_bits)) to the fewest digits
/// that still lie strictly between the midpoints to the neighbouring floats,
/// or on a midpoint when round-to-even would map it back to `mant`.
fn round_shortest(buffer: &mut DigitBuffer, mant: u64, exp: i32, format: &FloatFormat) {
    if mant == 0 {
        *buffer = DigitBuffer::new();
        return;
    }

    let mantissa_bits = format.mantissa_bits as i32;
    let min_exp = format.min_exponent();

    // An integer with fewer digits than the float has bits of precision
    // (log2(10) ~ 3.32) is already as short as it gets.
    if exp > min_exp
        && 332 * (buffer.decimal_point() - buffer.len() as i32) >= 100 * (exp - mantissa_bits)
    {
        return;
    }

    // Halfway to the next float up: (2*mant + 1) * 2^(exp - mantissa_bits - 1).
    let mut upper = DigitBuffer::from_u64(mant * 2 + 1);
    upper.shift(exp - mantissa_bits - 1);

    // Halfway to the next float down. When mant is the smallest normal
    // mantissa the step below is half as wide, except at the minimum
    // exponent where subnormals keep the same step.
    let (mant_lo, exp_lo) = if mant > 1u64 << format.mantissa_bits || exp == min_exp {
        (mant - 1, exp)
    } else {
        (mant * 2 - 1, exp - 1)
    };
    let mut lower = DigitBuffer::from_u64(mant_lo * 2 + 1);
    lower.shift(exp_lo - mantissa_bits - 1);

    // With an even mantissa the bounds themselves round back to it.
    let inclusive = mant % 2 == 0;

    for i in 0..buffer.len() {
        let l = lower.digit_or_zero(i);
        let m = buffer.digits()[i];
        let u = upper.digit_or_zero(i);

        // Truncating here stays above the lower bound.
        let ok_down = l != m || inclusive && i + 1 == lower.len();

        // Rounding up here stays below the upper bound.
        let ok_up = m != u && (inclusive || m + 1 < u || i + 1 < upper.len());

        match (ok_down, ok_up) {
            (true, true) => {
                buffer.round(i + 1);
                return;
            },
            (true, false) => {
                buffer.round_down(i + 1);
                return;
            },
            (false, true) => {
                buffer.round_up(i + 1);
                return;
            },
            (false, false) => {},
        }
    }
}

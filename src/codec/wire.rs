// ============================================================================
// Number Attribute Wire Format
// precision (i16) | scale (i16) | length-prefixed UTF-8 rendering
// ============================================================================

use crate::numeric::{Decimal, NumericError, NumericResult};

/// Declared precision when none is given
pub const DEFAULT_PRECISION: i16 = 20;

/// Declared scale when none is given
pub const DEFAULT_SCALE: i16 = 5;

/// A decimal attribute value as it travels between client and server.
///
/// Layout, all integers big-endian:
///
/// ```text
/// +-----------+-----------+------------+----------------------+
/// | precision | scale     | length     | decimal text (UTF-8) |
/// | i16       | i16       | u16        | `length` bytes       |
/// +-----------+-----------+------------+----------------------+
/// ```
///
/// The text is the value's `Display` rendering, so the exponent chosen by
/// the sender is not preserved; only the numeric value is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberValue {
    pub precision: i16,
    pub scale: i16,
    pub value: Decimal,
}

impl Default for NumberValue {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            scale: DEFAULT_SCALE,
            value: Decimal::ZERO,
        }
    }
}

impl NumberValue {
    /// Wrap `value`, deriving precision and scale from its rendering:
    /// scale is the number of fractional digits, precision the number of
    /// digits after leading zeros are dropped (at least 1), so `0.001` is
    /// precision 1, scale 3.
    ///
    /// # Errors
    /// Returns `Overflow` if either count exceeds `i16::MAX`.
    pub fn new(value: Decimal) -> NumericResult<Self> {
        let text = value.to_string();
        let unsigned = text.strip_prefix('-').unwrap_or(&text);
        let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let scale = i16::try_from(fraction.len()).map_err(|_| NumericError::Overflow)?;
        let leading_zeros = integer
            .bytes()
            .chain(fraction.bytes())
            .take_while(|&b| b == b'0')
            .count();
        let digits = (integer.len() + fraction.len() - leading_zeros).max(1);
        let precision = i16::try_from(digits).map_err(|_| NumericError::Overflow)?;

        Ok(Self {
            precision,
            scale,
            value,
        })
    }

    /// Wrap `value` with an explicit declared precision and scale.
    pub fn with_precision_scale(value: Decimal, precision: i16, scale: i16) -> Self {
        Self {
            precision,
            scale,
            value,
        }
    }

    /// Encode to a fresh buffer.
    pub fn encode(&self) -> NumericResult<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Append the encoding to `out`.
    ///
    /// # Errors
    /// Returns `InvalidEncoding` if the rendered value is longer than 65535
    /// bytes; `out` is left untouched in that case.
    pub fn write_to(&self, out: &mut Vec<u8>) -> NumericResult<()> {
        let text = self.value.to_string();
        let len = u16::try_from(text.len()).map_err(|_| {
            NumericError::InvalidEncoding(format!(
                "rendered value is {} bytes, limit is {}",
                text.len(),
                u16::MAX
            ))
        })?;

        out.reserve(6 + text.len());
        out.extend_from_slice(&self.precision.to_be_bytes());
        out.extend_from_slice(&self.scale.to_be_bytes());
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(text.as_bytes());
        Ok(())
    }

    /// Decode a buffer holding exactly one value.
    pub fn decode(data: &[u8]) -> NumericResult<Self> {
        let mut input = data;
        let value = Self::read_from(&mut input)?;
        if !input.is_empty() {
            tracing::debug!(trailing = input.len(), "bytes left after number value");
            return Err(NumericError::InvalidEncoding(format!(
                "{} trailing bytes",
                input.len()
            )));
        }
        Ok(value)
    }

    /// Read one value from the front of `input`, advancing it.
    pub fn read_from(input: &mut &[u8]) -> NumericResult<Self> {
        let precision = i16::from_be_bytes(take(input, "precision")?);
        let scale = i16::from_be_bytes(take(input, "scale")?);
        let len = usize::from(u16::from_be_bytes(take(input, "length")?));

        if input.len() < len {
            tracing::debug!(expected = len, available = input.len(), "truncated number text");
            return Err(NumericError::InvalidEncoding(format!(
                "text needs {} bytes, {} available",
                len,
                input.len()
            )));
        }
        let (text, rest) = input.split_at(len);
        *input = rest;

        let text = std::str::from_utf8(text).map_err(|err| {
            tracing::debug!(error = %err, "number text is not UTF-8");
            NumericError::InvalidEncoding(err.to_string())
        })?;

        Ok(Self {
            precision,
            scale,
            value: text.parse()?,
        })
    }
}

fn take<const N: usize>(input: &mut &[u8], field: &str) -> NumericResult<[u8; N]> {
    let Some((head, rest)) = input.split_first_chunk::<N>() else {
        tracing::debug!(field, available = input.len(), "truncated number header");
        return Err(NumericError::InvalidEncoding(format!("truncated {}", field)));
    };
    *input = rest;
    Ok(*head)
}

// ============================================================================
// Binary Encoding
// 4-byte big-endian exponent followed by the two's-complement coefficient
// ============================================================================

use crate::numeric::{Decimal, NumericError, NumericResult};
use num_bigint::BigInt;

const EXPONENT_WIDTH: usize = 4;

impl Decimal {
    /// Encode as `exponent (i32, big-endian) ++ coefficient`, the
    /// coefficient in big-endian two's complement.
    ///
    /// ```
    /// use exact_decimal::numeric::Decimal;
    ///
    /// let d = Decimal::new(-1, -2);
    /// assert_eq!(d.to_bytes(), vec![0xff, 0xff, 0xff, 0xfe, 0xff]);
    /// assert_eq!(Decimal::from_bytes(&d.to_bytes()).unwrap(), d);
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let coefficient = self.coefficient().to_signed_bytes_be();
        let mut out = Vec::with_capacity(EXPONENT_WIDTH + coefficient.len());
        out.extend_from_slice(&self.exponent().to_be_bytes());
        out.extend_from_slice(&coefficient);
        out
    }

    /// Decode the layout written by [`Decimal::to_bytes`].
    ///
    /// An empty coefficient decodes as zero.
    ///
    /// # Errors
    /// Returns `InvalidEncoding` if fewer than 4 bytes are given.
    pub fn from_bytes(data: &[u8]) -> NumericResult<Self> {
        let Some((exponent, coefficient)) = data.split_first_chunk::<EXPONENT_WIDTH>() else {
            tracing::debug!(len = data.len(), "binary decimal shorter than its exponent");
            return Err(NumericError::InvalidEncoding(format!(
                "need at least {} bytes, got {}",
                EXPONENT_WIDTH,
                data.len()
            )));
        };

        Ok(Decimal::from_parts(
            BigInt::from_signed_bytes_be(coefficient),
            i32::from_be_bytes(*exponent),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let d = Decimal::new(300, -1);
        assert_eq!(d.to_bytes(), vec![0xff, 0xff, 0xff, 0xff, 0x01, 0x2c]);

        let positive_high_bit = Decimal::new(128, 2);
        assert_eq!(positive_high_bit.to_bytes(), vec![0, 0, 0, 2, 0x00, 0x80]);
    }

    #[test]
    fn test_decode_preserves_representation() {
        let d: Decimal = "-123456789012345678901234567890.25".parse().unwrap();
        let decoded = Decimal::from_bytes(&d.to_bytes()).unwrap();
        assert_eq!(decoded.exponent(), d.exponent());
        assert_eq!(decoded.coefficient(), d.coefficient());
    }

    #[test]
    fn test_decode_zero_length_coefficient() {
        let d = Decimal::from_bytes(&[0, 0, 0, 5]).unwrap();
        assert!(d.is_zero());
        assert_eq!(d.exponent(), 5);
    }

    #[test]
    fn test_decode_short_input() {
        assert!(matches!(
            Decimal::from_bytes(&[0, 0, 1]),
            Err(NumericError::InvalidEncoding(_))
        ));
        assert!(Decimal::from_bytes(&[]).is_err());
    }
}

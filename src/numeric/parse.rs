// ============================================================================
// String Parsing
// ============================================================================

use super::decimal::Decimal;
use super::errors::{NumericError, NumericResult};
use num_bigint::BigInt;
use std::num::IntErrorKind;
use std::str::FromStr;

impl FromStr for Decimal {
    type Err = NumericError;

    /// Parse `[sign]digits[.digits][(e|E)[sign]digits]`.
    ///
    /// Trailing zeros of the fractional part are dropped before the
    /// exponent is fixed, so `"123.450"` becomes 12345 × 10^-2. Whitespace
    /// and digit separators are rejected.
    ///
    /// # Examples
    /// - "123" -> 123 × 10^0
    /// - "-0.001" -> -1 × 10^-3
    /// - "1.5e3" -> 15 × 10^2
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s).inspect_err(|err| {
            tracing::debug!(input = s, error = %err, "rejected decimal text");
        })
    }
}

fn parse_decimal(input: &str) -> NumericResult<Decimal> {
    let mut mantissa = input;
    let mut exponent: i64 = 0;

    if let Some(e_index) = input.find(['e', 'E']) {
        exponent = parse_exponent(&input[e_index + 1..], input)?;
        mantissa = &input[..e_index];
    }

    let parts: Vec<&str> = mantissa.split('.').collect();
    let digits = match parts.as_slice() {
        [whole] => (*whole).to_string(),
        [whole, fraction] => {
            let fraction = fraction.trim_end_matches('0');
            exponent -= fraction.len() as i64;
            format!("{}{}", whole, fraction)
        },
        _ => return Err(NumericError::TooManyDecimalPoints(input.to_string())),
    };

    let coefficient = parse_coefficient(&digits)
        .ok_or_else(|| NumericError::InvalidFormat(input.to_string()))?;

    let exponent = i32::try_from(exponent)
        .map_err(|_| NumericError::FractionalPartTooLong(input.to_string()))?;

    Ok(Decimal::from_parts(coefficient, exponent))
}

fn parse_exponent(token: &str, input: &str) -> NumericResult<i64> {
    match token.parse::<i32>() {
        Ok(exp) => Ok(i64::from(exp)),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                Err(NumericError::FractionalPartTooLong(input.to_string()))
            },
            _ => Err(NumericError::NonNumericExponent(input.to_string())),
        },
    }
}

/// Signed run of ASCII digits.
fn parse_coefficient(text: &str) -> Option<BigInt> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude = BigInt::parse_bytes(unsigned.as_bytes(), 10)?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(s: &str) -> (BigInt, i32) {
        s.parse::<Decimal>().unwrap().into_parts()
    }

    #[test]
    fn test_from_str() {
        assert_eq!(parts("123"), (BigInt::from(123), 0));
        assert_eq!(parts("123.450"), (BigInt::from(12345), -2));
        assert_eq!(parts("-0.001"), (BigInt::from(-1), -3));
        assert_eq!(parts("+7.25"), (BigInt::from(725), -2));
        assert_eq!(parts("1.5e3"), (BigInt::from(15), 2));
        assert_eq!(parts("2E-4"), (BigInt::from(2), -4));
        assert_eq!(parts(".5"), (BigInt::from(5), -1));
        assert_eq!(parts("5."), (BigInt::from(5), 0));
        assert_eq!(parts("100.000"), (BigInt::from(100), 0));
    }

    #[test]
    fn test_from_str_big_coefficient() {
        let (coefficient, exponent) = parts("123456789012345678901234567890.5");
        assert_eq!(exponent, -1);
        assert_eq!(
            coefficient,
            BigInt::parse_bytes(b"1234567890123456789012345678905", 10).unwrap()
        );
    }

    #[test]
    fn test_from_str_invalid() {
        assert_eq!(
            "1.2.3".parse::<Decimal>(),
            Err(NumericError::TooManyDecimalPoints("1.2.3".to_string()))
        );
        assert_eq!(
            "1e".parse::<Decimal>(),
            Err(NumericError::NonNumericExponent("1e".to_string()))
        );
        assert_eq!(
            "1e5x".parse::<Decimal>(),
            Err(NumericError::NonNumericExponent("1e5x".to_string()))
        );
        assert_eq!(
            "1e99999999999".parse::<Decimal>(),
            Err(NumericError::FractionalPartTooLong("1e99999999999".to_string()))
        );
        for bad in ["", ".", "-", "abc", "1_000", " 1", "1 ", "--1", "1.-5"] {
            assert_eq!(
                bad.parse::<Decimal>(),
                Err(NumericError::InvalidFormat(bad.to_string())),
                "input {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_from_str_combined_exponent_out_of_range() {
        let input = "0.5e-2147483648";
        assert_eq!(
            input.parse::<Decimal>(),
            Err(NumericError::FractionalPartTooLong(input.to_string()))
        );
        let input = "5e2147483647";
        assert_eq!(parts(input), (BigInt::from(5), i32::MAX));
    }
}

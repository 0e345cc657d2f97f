// ============================================================================
// Decimal Rendering
// ============================================================================

use super::decimal::Decimal;
use std::fmt;

impl Decimal {
    /// Render with exactly `places` fractional digits, rounding half away
    /// from zero.
    ///
    /// ```
    /// use exact_decimal::numeric::Decimal;
    ///
    /// let d: Decimal = "3.14159".parse().unwrap();
    /// assert_eq!(d.string_fixed(2), "3.14");
    /// assert_eq!(d.string_fixed(7), "3.1415900");
    /// ```
    pub fn string_fixed(&self, places: i32) -> String {
        self.round(places).render(false)
    }

    /// Render after a truncating rescale to `exponent`.
    pub fn string_scaled(&self, exponent: i32) -> String {
        self.rescale(exponent).render(true)
    }

    /// Plain positional notation, never scientific.
    fn render(&self, trim_trailing_zeros: bool) -> String {
        if self.exponent() >= 0 {
            return self.rescale(0).coefficient().to_string();
        }

        let digits = self.coefficient().magnitude().to_string();
        let fraction_width = self.exponent().unsigned_abs() as usize;

        let (integer_part, mut fraction_part) = if digits.len() > fraction_width {
            let (integer, fraction) = digits.split_at(digits.len() - fraction_width);
            (integer.to_string(), fraction.to_string())
        } else {
            let padding = "0".repeat(fraction_width - digits.len());
            ("0".to_string(), padding + &digits)
        };

        if trim_trailing_zeros {
            let kept = fraction_part.trim_end_matches('0').len();
            fraction_part.truncate(kept);
        }

        let mut out = String::with_capacity(integer_part.len() + fraction_part.len() + 2);
        if self.is_negative() {
            out.push('-');
        }
        out.push_str(&integer_part);
        if !fraction_part.is_empty() {
            out.push('.');
            out.push_str(&fraction_part);
        }
        out
    }
}

impl fmt::Display for Decimal {
    /// Positional notation with trailing fractional zeros removed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.render(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Decimal::new(12345, -2).to_string(), "123.45");
        assert_eq!(Decimal::new(-1, -3).to_string(), "-0.001");
        assert_eq!(Decimal::new(1500, -3).to_string(), "1.5");
        assert_eq!(Decimal::new(-7, 2).to_string(), "-700");
        assert_eq!(Decimal::new(0, -4).to_string(), "0");
        assert_eq!(Decimal::new(-100, -2).to_string(), "-1");
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(format!("{:>8}", Decimal::new(25, -1)), "     2.5");
        assert_eq!(format!("{:<5}|", Decimal::new(1, 0)), "1    |");
    }

    #[test]
    fn test_string_fixed() {
        assert_eq!(Decimal::new(15, -1).string_fixed(3), "1.500");
        assert_eq!(Decimal::new(-12345, -3).string_fixed(1), "-12.3");
        assert_eq!(Decimal::new(25, -1).string_fixed(0), "3");
        assert_eq!(Decimal::new(1234, 0).string_fixed(-2), "1200");
        assert_eq!(Decimal::new(5, -3).string_fixed(2), "0.01");
    }

    #[test]
    fn test_string_scaled() {
        assert_eq!(Decimal::new(12345, -3).string_scaled(-1), "12.3");
        assert_eq!(Decimal::new(-12399, -3).string_scaled(0), "-12");
        assert_eq!(Decimal::new(12, 0).string_scaled(1), "10");
    }
}

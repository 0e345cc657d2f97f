// ============================================================================
// Decimal Configuration
// Division precision and JSON rendering mode
// ============================================================================

use crate::numeric::{Decimal, NumericError, NumericResult, DEFAULT_DIVISION_PRECISION};

#[cfg(feature = "serde")]
use crate::codec::JsonDecimal;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings that affect how decimals are divided and rendered as JSON.
///
/// Plain operators (`/`, `Decimal::pow`) use the defaults. Pass a config
/// where a caller needs a different precision or JSON numbers instead of
/// quoted strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecimalConfig {
    /// Fractional digits kept when a quotient does not terminate
    pub division_precision: i32,

    /// Emit JSON numbers (`1.5`) instead of strings (`"1.5"`)
    pub json_numbers: bool,
}

impl Default for DecimalConfig {
    fn default() -> Self {
        Self {
            division_precision: DEFAULT_DIVISION_PRECISION,
            json_numbers: false,
        }
    }
}

impl DecimalConfig {
    /// Create a configuration with the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set division precision
    pub fn with_division_precision(mut self, precision: i32) -> Self {
        self.division_precision = precision;
        self
    }

    /// Builder method: Render JSON as unquoted numbers
    pub fn with_json_numbers(mut self, json_numbers: bool) -> Self {
        self.json_numbers = json_numbers;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> NumericResult<()> {
        if self.division_precision < 0 {
            return Err(NumericError::InvalidConfig(format!(
                "division precision must not be negative, got {}",
                self.division_precision
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// `dividend / divisor` rounded to `division_precision` digits.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    pub fn divide(&self, dividend: &Decimal, divisor: &Decimal) -> Decimal {
        dividend.div_round(divisor, self.division_precision)
    }

    /// Checked form of [`DecimalConfig::divide`].
    pub fn checked_divide(&self, dividend: &Decimal, divisor: &Decimal) -> NumericResult<Decimal> {
        dividend.checked_div_round(divisor, self.division_precision)
    }

    /// Integer power; negative exponents divide at `division_precision`.
    pub fn pow(&self, base: &Decimal, exponent: &Decimal) -> NumericResult<Decimal> {
        base.pow_with_precision(exponent, self.division_precision)
    }

    /// Serializable view of `value` using this config's JSON mode.
    #[cfg(feature = "serde")]
    pub fn json<'a>(&self, value: &'a Decimal) -> JsonDecimal<'a> {
        JsonDecimal::new(value, self.json_numbers)
    }

    /// Render `value` as a JSON document.
    #[cfg(feature = "serde")]
    pub fn to_json(&self, value: &Decimal) -> NumericResult<String> {
        serde_json::to_string(&self.json(value))
            .map_err(|err| NumericError::InvalidEncoding(err.to_string()))
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl DecimalConfig {
    /// Two-digit division with JSON numbers, for currency amounts
    pub fn currency() -> Self {
        Self::new()
            .with_division_precision(2)
            .with_json_numbers(true)
    }

    /// 34-digit division, matching the digits of an IEEE decimal128
    pub fn high_precision() -> Self {
        Self::new().with_division_precision(34)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = DecimalConfig::default();
        assert_eq!(config.division_precision, 16);
        assert!(!config.json_numbers);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = DecimalConfig::new()
            .with_division_precision(4)
            .with_json_numbers(true);

        assert_eq!(config.division_precision, 4);
        assert!(config.json_numbers);
    }

    #[test]
    fn test_validation() {
        let config = DecimalConfig::new().with_division_precision(-1);
        assert!(matches!(
            config.validate(),
            Err(NumericError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_divide_uses_configured_precision() {
        let one = Decimal::new(1, 0);
        let three = Decimal::new(3, 0);

        assert_eq!(DecimalConfig::currency().divide(&one, &three).to_string(), "0.33");
        assert_eq!(
            DecimalConfig::new().divide(&one, &three),
            &one / &three
        );
        assert_eq!(
            DecimalConfig::new().checked_divide(&one, &Decimal::ZERO),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_pow_uses_configured_precision() {
        let config = DecimalConfig::new().with_division_precision(3);
        let result = config
            .pow(&Decimal::new(3, 0), &Decimal::new(-1, 0))
            .unwrap();
        assert_eq!(result.to_string(), "0.333");
    }

    #[test]
    fn test_high_precision_preset() {
        let config = DecimalConfig::high_precision();
        let third = config.divide(&Decimal::new(1, 0), &Decimal::new(3, 0));
        assert_eq!(third.exponent(), -34);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_to_json_modes() {
        let value: Decimal = "12.50".parse().unwrap();
        assert_eq!(DecimalConfig::new().to_json(&value).unwrap(), "\"12.5\"");
        assert_eq!(DecimalConfig::currency().to_json(&value).unwrap(), "12.5");
    }
}

// ============================================================================
// Exact Decimal Library
// Arbitrary-precision fixed-point decimals with lossless float and wire codecs
// ============================================================================

//! # Exact Decimal
//!
//! A fixed-point decimal type for values that must survive storage and
//! transport unchanged: money, identifiers, measurements.
//!
//! ## Features
//!
//! - **Arbitrary precision**: `BigInt` coefficient scaled by a power of ten
//! - **Shortest float conversion**: `Decimal::from_f64(0.1)` is exactly `0.1`
//! - **Explicit rounding**: half away from zero for `round` and division
//! - **Encodings**: text, binary, the number-attribute wire record and
//!   (with the `serde` feature) JSON
//!
//! ## Example
//!
//! ```rust
//! use exact_decimal::prelude::*;
//!
//! let price: Decimal = "19.99".parse().unwrap();
//! let quantity = Decimal::new(3, 0);
//! let total = &price * &quantity;
//! assert_eq!(total.to_string(), "59.97");
//!
//! // Floats convert to the shortest decimal that reads back identically
//! assert_eq!(Decimal::from_f64(0.1 + 0.2).to_string(), "0.30000000000000004");
//!
//! // Division precision is a call-site setting
//! let config = DecimalConfig::new().with_division_precision(2);
//! let share = config.divide(&total, &Decimal::new(7, 0));
//! assert_eq!(share.to_string(), "8.57");
//!
//! // Values travel as length-prefixed text on the wire
//! let encoded = NumberValue::new(total.clone()).unwrap().encode().unwrap();
//! assert_eq!(NumberValue::decode(&encoded).unwrap().value, total);
//! ```

pub mod codec;
pub mod config;
pub mod float;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    #[cfg(feature = "serde")]
    pub use crate::codec::JsonDecimal;
    pub use crate::codec::NumberValue;
    pub use crate::config::DecimalConfig;
    pub use crate::float::{DigitBuffer, FloatConverter, FloatFormat};
    pub use crate::numeric::{Decimal, NumericError, NumericResult, DEFAULT_DIVISION_PRECISION};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use num_bigint::BigInt;

    #[test]
    fn test_text_scenarios() {
        let d: Decimal = "123.450".parse().unwrap();
        assert_eq!(d.coefficient(), &BigInt::from(12345));
        assert_eq!(d.exponent(), -2);
        assert_eq!(d.to_string(), "123.45");

        let half = Decimal::new(5, 0) / Decimal::new(2, 0);
        assert_eq!(half.to_string(), "2.5");

        assert_eq!(Decimal::from_f32(0.1).to_string(), "0.1");

        let (q, r) = Decimal::new(10, 0).quo_rem(&Decimal::new(3, 0), 0);
        assert_eq!(q.to_string(), "3");
        assert_eq!(r.to_string(), "1");

        let one_and_half: Decimal = "1.5".parse().unwrap();
        assert_eq!(one_and_half.round(0).to_string(), "2");
        assert_eq!(Decimal::from_f64(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_float_to_wire_and_back() {
        let d = Decimal::from_f64(-1234.5678);
        let record = NumberValue::new(d.clone()).unwrap();
        assert_eq!(record.precision, 8);
        assert_eq!(record.scale, 4);

        let decoded = NumberValue::decode(&record.encode().unwrap()).unwrap();
        assert_eq!(decoded, record);

        let (f, exact) = decoded.value.to_f64();
        assert_eq!(f, -1234.5678);
        assert!(!exact);
    }

    #[test]
    fn test_binary_preserves_big_values() {
        let base: Decimal = "1.000000001".parse().unwrap();
        let grown = base.pow(&Decimal::new(40, 0)).unwrap();
        let decoded = Decimal::from_bytes(&grown.to_bytes()).unwrap();
        assert_eq!(decoded, grown);
        assert_eq!(decoded.exponent(), -360);
    }

    #[test]
    fn test_rust_decimal_boundary() {
        let from_api = rust_decimal::Decimal::new(123_456, 3);
        let d = Decimal::from(from_api) * Decimal::new(2, 0);
        let back = rust_decimal::Decimal::try_from(&d).unwrap();
        assert_eq!(back, rust_decimal::Decimal::new(246_912, 3));
    }

    #[test]
    fn test_errors_surface_through_checked_api() {
        let config = DecimalConfig::default();
        assert_eq!(
            config.checked_divide(&Decimal::new(1, 0), &Decimal::ZERO),
            Err(NumericError::DivisionByZero)
        );
        assert!(matches!(
            Decimal::try_from(f64::NEG_INFINITY),
            Err(NumericError::InvalidFloat(_))
        ));
        assert!(matches!(
            "12,5".parse::<Decimal>(),
            Err(NumericError::InvalidFormat(_))
        ));
    }
}

// ============================================================================
// Serde Integration
// Text for human-readable formats, binary encoding for compact ones
// ============================================================================

use crate::numeric::Decimal;
use num_bigint::BigInt;
use serde::de::{self, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            // JSON, TOML, etc. - quoted positional text
            serializer.collect_str(self)
        } else {
            // Bincode, MessagePack, etc. - exponent + coefficient bytes
            serializer.serialize_bytes(&self.to_bytes())
        }
    }
}

// Key serde_json uses to hand over a number's exact text when
// `arbitrary_precision` is enabled.
const JSON_NUMBER_TOKEN: &str = "$serde_json::private::Number";

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal as a string, a number or encoded bytes")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::new(v, 0))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from_parts(BigInt::from(v), 0))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        Decimal::try_from_f64(v).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Decimal, E> {
        Decimal::from_bytes(v).map_err(E::custom)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Decimal, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(8));
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        self.visit_bytes(&bytes)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Decimal, A::Error> {
        match map.next_key::<String>()? {
            Some(key) if key == JSON_NUMBER_TOKEN => {
                let text = map.next_value::<String>()?;
                text.parse().map_err(de::Error::custom)
            },
            _ => Err(de::Error::invalid_type(Unexpected::Map, &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(DecimalVisitor)
        } else {
            deserializer.deserialize_bytes(DecimalVisitor)
        }
    }
}

/// JSON view of a decimal that picks between a number and a string.
///
/// Built by [`crate::config::DecimalConfig::json`]. Numbers are written
/// verbatim from the decimal's text, so no digits pass through an f64.
#[derive(Debug, Clone, Copy)]
pub struct JsonDecimal<'a> {
    value: &'a Decimal,
    numeric: bool,
}

impl<'a> JsonDecimal<'a> {
    pub fn new(value: &'a Decimal, numeric: bool) -> Self {
        Self { value, numeric }
    }
}

impl Serialize for JsonDecimal<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.numeric {
            let raw = RawValue::from_string(self.value.to_string()).map_err(S::Error::custom)?;
            raw.serialize(serializer)
        } else {
            serializer.collect_str(self.value)
        }
    }
}

#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn test_serialize_as_string() {
        let d: Decimal = "-0.0500".parse().unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"-0.05\"");
    }

    #[test]
    fn test_deserialize_string_and_numbers() {
        let d: Decimal = serde_json::from_str("\"123.45\"").unwrap();
        assert_eq!(d, Decimal::new(12345, -2));

        let d: Decimal = serde_json::from_str("-42").unwrap();
        assert_eq!(d, Decimal::new(-42, 0));

        let d: Decimal = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(d.to_string(), "18446744073709551615");

        let d: Decimal = serde_json::from_str("0.1").unwrap();
        assert_eq!(d.to_string(), "0.1");
    }

    #[test]
    fn test_deserialize_rejects_bad_text() {
        let err = serde_json::from_str::<Decimal>("\"1.2.3\"").unwrap_err();
        assert!(err.to_string().contains("too many decimal points"));
        assert!(serde_json::from_str::<Decimal>("true").is_err());
    }

    #[test]
    fn test_struct_field_roundtrip() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Invoice {
            total: Decimal,
        }

        let invoice = Invoice {
            total: "1999.99".parse().unwrap(),
        };
        let json = serde_json::to_string(&invoice).unwrap();
        assert_eq!(json, r#"{"total":"1999.99"}"#);
        assert_eq!(serde_json::from_str::<Invoice>(&json).unwrap(), invoice);
    }

    #[test]
    fn test_visit_bytes() {
        let d = Decimal::new(-300, -2);
        let decoded = DecimalVisitor
            .visit_bytes::<serde::de::value::Error>(&d.to_bytes())
            .unwrap();
        assert_eq!(decoded.exponent(), -2);
        assert_eq!(decoded, d);
        assert!(DecimalVisitor
            .visit_bytes::<serde::de::value::Error>(&[1])
            .is_err());
    }

    #[test]
    fn test_json_decimal_modes() {
        let d = Decimal::new(-15, -1);
        assert_eq!(
            serde_json::to_string(&JsonDecimal::new(&d, true)).unwrap(),
            "-1.5"
        );
        assert_eq!(
            serde_json::to_string(&JsonDecimal::new(&d, false)).unwrap(),
            "\"-1.5\""
        );

        let big: Decimal = "123456789012345678901234567890.123456789".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&JsonDecimal::new(&big, true)).unwrap(),
            "123456789012345678901234567890.123456789"
        );
    }

    #[test]
    fn test_json_number_mode_reads_back_exactly() {
        let big: Decimal = "123456789012345678901234567890.123456789".parse().unwrap();
        let json = serde_json::to_string(&JsonDecimal::new(&big, true)).unwrap();
        let decoded: Decimal = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, big);
        assert_eq!(decoded.exponent(), -9);

        let tiny: Decimal = serde_json::from_str("-1.000000000000000000000000001e-40").unwrap();
        assert_eq!(tiny.to_string(), format!("-0.{}1000000000000000000000000001", "0".repeat(39)));

        #[derive(Deserialize)]
        struct Quote {
            price: Decimal,
        }
        let quote: Quote =
            serde_json::from_str(r#"{"price": 98765432109876543210.98765432109876543210}"#).unwrap();
        assert_eq!(
            quote.price,
            "98765432109876543210.98765432109876543210".parse::<Decimal>().unwrap()
        );
    }

    #[test]
    fn test_plain_object_rejected() {
        assert!(serde_json::from_str::<Decimal>(r#"{"value": "1.5"}"#).is_err());
        assert!(serde_json::from_str::<Decimal>("{}").is_err());
    }
}

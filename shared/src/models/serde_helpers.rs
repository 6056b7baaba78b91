//! Lenient numeric deserializers for form-style input
//!
//! Clients send numbers as JSON numbers, numeric strings, empty strings or
//! `null`. Everything that is not a usable number becomes zero, the same rule
//! [`parse_number_or_zero`] applies to raw text.

use rust_decimal::Decimal;
use serde::Deserializer;
use serde::de::{self, Visitor};
use std::fmt;

use crate::util::{decimal_or_zero, parse_number_or_zero};

struct LenientDecimalVisitor;

impl<'de> Visitor<'de> for LenientDecimalVisitor {
    type Value = Option<Decimal>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a numeric string or null")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(parse_number_or_zero(value)))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(decimal_or_zero(value)))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(Decimal::from(value)))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(Decimal::from(value)))
    }

    fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(Decimal::ZERO))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientDecimalVisitor)
    }
}

/// Deserialize a Decimal, treating null, empty and non-numeric input as zero
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer
        .deserialize_any(LenientDecimalVisitor)
        .map(Option::unwrap_or_default)
}

/// Deserialize an optional Decimal: null stays `None`, anything else is parsed leniently
pub fn option_lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientDecimalVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "lenient_decimal")]
        value: Decimal,
        #[serde(default, deserialize_with = "option_lenient_decimal")]
        maybe: Option<Decimal>,
    }

    fn parse(json: &str) -> Form {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numbers_and_strings() {
        assert_eq!(parse(r#"{"value": 12.5}"#).value, dec!(12.5));
        assert_eq!(parse(r#"{"value": 7}"#).value, dec!(7));
        assert_eq!(parse(r#"{"value": "3.25"}"#).value, dec!(3.25));
        assert_eq!(parse(r#"{"value": -4}"#).value, dec!(-4));
    }

    #[test]
    fn test_missing_null_and_garbage_are_zero() {
        assert_eq!(parse(r#"{}"#).value, Decimal::ZERO);
        assert_eq!(parse(r#"{"value": null}"#).value, Decimal::ZERO);
        assert_eq!(parse(r#"{"value": ""}"#).value, Decimal::ZERO);
        assert_eq!(parse(r#"{"value": "n/a"}"#).value, Decimal::ZERO);
        assert_eq!(parse(r#"{"value": true}"#).value, Decimal::ZERO);
    }

    #[test]
    fn test_optional_keeps_absence() {
        assert_eq!(parse(r#"{}"#).maybe, None);
        assert_eq!(parse(r#"{"maybe": null}"#).maybe, None);
        assert_eq!(parse(r#"{"maybe": "9"}"#).maybe, Some(dec!(9)));
        assert_eq!(parse(r#"{"maybe": "x"}"#).maybe, Some(Decimal::ZERO));
    }
}

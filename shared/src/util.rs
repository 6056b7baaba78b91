use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::str::FromStr;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Parse a user-entered number, falling back to zero.
///
/// Accepts plain decimals (`"12.5"`), scientific notation (`"1e3"`) and a
/// decimal comma (`"12,5"`). Empty, whitespace-only and non-numeric input
/// yields zero. Negative numbers are returned as-is; range checks belong to
/// the caller.
pub fn parse_number_or_zero(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .unwrap_or(Decimal::ZERO)
}

/// Convert an f64 to Decimal, mapping NaN and infinities to zero
#[inline]
pub fn decimal_or_zero(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_number_or_zero("12.5"), dec!(12.5));
        assert_eq!(parse_number_or_zero("  100 "), dec!(100));
        assert_eq!(parse_number_or_zero("0"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_empty_and_garbage_is_zero() {
        assert_eq!(parse_number_or_zero(""), Decimal::ZERO);
        assert_eq!(parse_number_or_zero("   "), Decimal::ZERO);
        assert_eq!(parse_number_or_zero("abc"), Decimal::ZERO);
        assert_eq!(parse_number_or_zero("12abc"), Decimal::ZERO);
        assert_eq!(parse_number_or_zero("NaN"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_negative_is_kept() {
        assert_eq!(parse_number_or_zero("-5"), dec!(-5));
        assert_eq!(parse_number_or_zero("-0.75"), dec!(-0.75));
    }

    #[test]
    fn test_parse_decimal_comma_and_scientific() {
        assert_eq!(parse_number_or_zero("12,5"), dec!(12.5));
        assert_eq!(parse_number_or_zero("1e3"), dec!(1000));
    }

    #[test]
    fn test_decimal_or_zero_non_finite() {
        assert_eq!(decimal_or_zero(f64::NAN), Decimal::ZERO);
        assert_eq!(decimal_or_zero(f64::INFINITY), Decimal::ZERO);
        assert_eq!(decimal_or_zero(2.5), dec!(2.5));
    }

    #[test]
    fn test_snowflake_ids_are_positive() {
        let a = snowflake_id();
        let b = snowflake_id();
        assert!(a > 0);
        assert!(b > 0);
    }
}

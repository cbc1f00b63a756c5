//! Transfer Amount Calculator
//!
//! Pure functions converting between user-typed decimal strings and base-unit
//! integers, and deriving max/shortfall/USD values for the transfer form.
//! No I/O, no async.
//!
//! # Units
//!
//! - Base units: smallest on-chain unit, `BigUint` (never floating point)
//! - Decimal strings: `.` separator, no thousands separators internally
//! - Display strings: `,` thousands separators, trailing fractional zeros trimmed

use std::cmp::Ordering;

use num_bigint::BigUint;
use num_traits::Zero;
use transfer_core::{PriceTable, TransferError};

/// Where an amount sits relative to the maximum sendable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxComparison {
    Below,
    AtMax,
    Above,
}

/// Clean a raw keystroke buffer into a decimal string.
///
/// Keeps digits and the first `.`; later dots are dropped and their digits
/// join the fraction. Leading zeros collapse to a single `0` only when a
/// decimal point follows (or nothing else remains). Never fails.
///
/// ```text
/// "00123.45"     -> "123.45"
/// "0.5"          -> "0.5"
/// "abc123.45def" -> "123.45"
/// "1.2.3"        -> "1.23"
/// ".5"           -> "0.5"
/// ```
pub fn normalize_amount_input(raw: &str) -> String {
    let mut int_part = String::new();
    let mut frac_part = String::new();
    let mut seen_dot = false;

    for c in raw.chars() {
        if c.is_ascii_digit() {
            if seen_dot {
                frac_part.push(c);
            } else {
                int_part.push(c);
            }
        } else if c == '.' {
            seen_dot = true;
        }
    }

    let trimmed = int_part.trim_start_matches('0');
    let int_part = if !trimmed.is_empty() {
        trimmed
    } else if int_part.is_empty() && !seen_dot {
        ""
    } else {
        "0"
    };

    if seen_dot {
        format!("{}.{}", int_part, frac_part)
    } else {
        int_part.to_string()
    }
}

/// Canonical decimal form: normalized, trailing fractional zeros and a bare
/// trailing point removed, empty input as `"0"`.
pub fn canonical_amount(value: &str) -> String {
    let normalized = normalize_amount_input(value);
    let (int_part, frac_part) = split_decimal(&normalized);
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let frac_part = frac_part.trim_end_matches('0');

    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

/// Display form of a settled value: thousands separators, no trailing zeros.
///
/// `"0"`, `"0.00"`, `"0."` and `""` all render as `"0"`.
pub fn format_display(value: &str) -> String {
    let canonical = canonical_amount(value);
    let (int_part, frac_part) = split_decimal(&canonical);
    let grouped = group_thousands(int_part);

    if frac_part.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

/// Display form of the value the user is typing.
///
/// Like [`format_display`] for the integer part, but the fraction is kept as
/// typed, including a bare trailing `.` and trailing zeros, so keystrokes
/// such as `"1."` or `"1.0"` (on the way to `"1.05"`) do not vanish.
pub fn format_input_display(value: &str) -> String {
    let normalized = normalize_amount_input(value);
    if normalized.is_empty() {
        return normalized;
    }

    match normalized.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{}", group_thousands(int_part), frac_part),
        None => group_thousands(&normalized),
    }
}

/// Convert a decimal string to base units: `value * 10^decimals`.
///
/// Accepts digits with an optional single `.` (a bare trailing `.` is fine);
/// rejects empty input, any other character, and more than `decimals`
/// fractional digits.
pub fn to_base_units(value: &str, decimals: u32) -> Result<BigUint, TransferError> {
    if value.is_empty() {
        return Err(invalid_amount("amount is empty"));
    }

    let (int_part, frac_part) = split_decimal(value);
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid_amount(format!("'{}' is not a number", value)));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid_amount(format!(
            "'{}' is not a non-negative decimal",
            value
        )));
    }

    let scale = decimals as usize;
    if frac_part.len() > scale {
        return Err(invalid_amount(format!(
            "at most {} decimal places allowed, got {}",
            decimals,
            frac_part.len()
        )));
    }

    let mut digits = String::with_capacity(int_part.len() + scale);
    digits.push_str(int_part);
    digits.push_str(frac_part);
    digits.extend(std::iter::repeat('0').take(scale - frac_part.len()));

    digits
        .parse::<BigUint>()
        .map_err(|e| invalid_amount(format!("'{}': {}", value, e)))
}

/// Convert base units back to a canonical decimal string (no separators)
pub fn from_base_units(amount: &BigUint, decimals: u32) -> String {
    let digits = amount.to_string();
    let scale = decimals as usize;
    if scale == 0 {
        return digits;
    }

    let padded = if digits.len() <= scale {
        format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
    } else {
        digits
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - scale);
    let frac_part = frac_part.trim_end_matches('0');

    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

/// Base units rendered for display (e.g. `"1,000.5"`)
pub fn format_base_units(amount: &BigUint, decimals: u32) -> String {
    format_display(&from_base_units(amount, decimals))
}

/// Largest amount that can be sent from `balance`.
///
/// When the asset pays its own fee the fee comes out of the same balance;
/// a fee at or above the balance leaves nothing sendable.
pub fn max_sendable(balance: &BigUint, fee: &BigUint, fee_paid_from_balance: bool) -> BigUint {
    if !fee_paid_from_balance {
        return balance.clone();
    }
    if fee >= balance {
        BigUint::zero()
    } else {
        balance - fee
    }
}

/// Compare an amount against the maximum sendable
pub fn compare_to_max(amount: &BigUint, max: &BigUint) -> MaxComparison {
    match amount.cmp(max) {
        Ordering::Less => MaxComparison::Below,
        Ordering::Equal => MaxComparison::AtMax,
        Ordering::Greater => MaxComparison::Above,
    }
}

/// Amount missing from `balance` to cover the transfer, formatted in the
/// asset's units, or `None` when the balance is enough (including exactly).
///
/// The fee only counts against `balance` when the asset pays its own fee.
pub fn shortfall(
    amount: &BigUint,
    fee: &BigUint,
    balance: &BigUint,
    fee_paid_from_balance: bool,
    decimals: u32,
) -> Option<String> {
    let required = if fee_paid_from_balance {
        amount + fee
    } else {
        amount.clone()
    };

    if required > *balance {
        Some(format_base_units(&(required - balance), decimals))
    } else {
        None
    }
}

/// Native-asset amount missing to pay the network fee of a non-native transfer
pub fn fee_shortfall(fee: &BigUint, native_balance: &BigUint, native_decimals: u32) -> Option<String> {
    if fee > native_balance {
        Some(format_base_units(&(fee - native_balance), native_decimals))
    } else {
        None
    }
}

/// USD value of a base-unit amount; 0 when the price key is unknown
pub fn usd_estimate(
    amount: &BigUint,
    decimals: u32,
    price_key: Option<&str>,
    prices: &PriceTable,
) -> f64 {
    let Some(price) = price_key.and_then(|key| prices.get(key)).copied() else {
        return 0.0;
    };
    if !price.is_finite() {
        return 0.0;
    }

    let tokens: f64 = from_base_units(amount, decimals).parse().unwrap_or(0.0);
    tokens * price
}

/// Render a USD value as `$1,234.56`
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "$0.00".to_string();
    }
    let fixed = format!("{:.2}", value);
    let (int_part, frac_part) = split_decimal(&fixed);
    format!("${}.{}", group_thousands(int_part), frac_part)
}

fn split_decimal(value: &str) -> (&str, &str) {
    value.split_once('.').unwrap_or((value, ""))
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn invalid_amount(message: impl Into<String>) -> TransferError {
    TransferError::InvalidAmount {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WEI: u32 = 18;

    fn wei(value: &str) -> BigUint {
        to_base_units(value, WEI).unwrap()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_amount_input("00123.45"), "123.45");
        assert_eq!(normalize_amount_input("0.5"), "0.5");
        assert_eq!(normalize_amount_input("abc123.45def"), "123.45");
        assert_eq!(normalize_amount_input("007.5"), "7.5");
        assert_eq!(normalize_amount_input("00"), "0");
        assert_eq!(normalize_amount_input("00.5"), "0.5");
        assert_eq!(normalize_amount_input("1.2.3"), "1.23");
        assert_eq!(normalize_amount_input(".5"), "0.5");
        assert_eq!(normalize_amount_input("1,000.50"), "1000.50");
        assert_eq!(normalize_amount_input("12."), "12.");
        assert_eq!(normalize_amount_input("abc"), "");
        assert_eq!(normalize_amount_input(""), "");
    }

    #[test]
    fn test_format_display_zero_forms() {
        assert_eq!(format_display("0"), "0");
        assert_eq!(format_display("0.00"), "0");
        assert_eq!(format_display("0."), "0");
        assert_eq!(format_display(""), "0");
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display("1000.50"), "1,000.5");
        assert_eq!(format_display("1234567.000"), "1,234,567");
        assert_eq!(format_display("999"), "999");
        assert_eq!(format_display("100000"), "100,000");
        assert_eq!(format_display("0.000100"), "0.0001");
    }

    #[test]
    fn test_format_input_display_keeps_typing_state() {
        assert_eq!(format_input_display("1000."), "1,000.");
        assert_eq!(format_input_display("0."), "0.");
        assert_eq!(format_input_display("1.0"), "1.0");
        assert_eq!(format_input_display("12345"), "12,345");
        assert_eq!(format_input_display(""), "");
    }

    #[test]
    fn test_to_base_units() {
        assert_eq!(wei("1"), BigUint::from(10u64.pow(18)));
        assert_eq!(wei("0.1"), BigUint::from(10u64.pow(17)));
        assert_eq!(wei("1."), BigUint::from(10u64.pow(18)));
        assert_eq!(to_base_units("0", 6).unwrap(), BigUint::zero());
        assert!(to_base_units("1.5", 0).is_err());
        assert_eq!(to_base_units("42", 0).unwrap(), BigUint::from(42u32));
    }

    #[test]
    fn test_to_base_units_large_values_are_exact() {
        let amount = to_base_units("123456789012345678901234.123456789012345678", WEI).unwrap();
        assert_eq!(
            amount.to_string(),
            "123456789012345678901234123456789012345678"
        );
    }

    #[test]
    fn test_to_base_units_rejects_malformed() {
        for bad in ["", ".", "1.2.3", "-1", "1e5", " 1", "abc", "1,000"] {
            let err = to_base_units(bad, WEI).unwrap_err();
            assert_eq!(err.error_code(), "invalid_amount", "input {:?}", bad);
        }
        assert!(to_base_units("0.1234567", 6).is_err());
        assert!(to_base_units("0.123456", 6).is_ok());
    }

    #[test]
    fn test_from_base_units() {
        assert_eq!(from_base_units(&BigUint::zero(), WEI), "0");
        assert_eq!(from_base_units(&BigUint::from(9u64 * 10u64.pow(17)), WEI), "0.9");
        assert_eq!(from_base_units(&BigUint::from(150_000_000u64), 8), "1.5");
        assert_eq!(from_base_units(&BigUint::from(1u32), 6), "0.000001");
        assert_eq!(from_base_units(&BigUint::from(1234u32), 0), "1234");
    }

    #[test]
    fn test_empty_balance_renders_zero() {
        assert_eq!(format_base_units(&BigUint::zero(), WEI), "0");
    }

    #[test]
    fn test_max_sendable_native() {
        let max = max_sendable(&wei("1"), &wei("0.1"), true);
        assert_eq!(max, BigUint::from(9u64 * 10u64.pow(17)));
        assert_eq!(format_base_units(&max, WEI), "0.9");
    }

    #[test]
    fn test_max_sendable_non_native_ignores_fee() {
        assert_eq!(max_sendable(&wei("1"), &wei("5"), false), wei("1"));
    }

    #[test]
    fn test_max_sendable_never_negative() {
        assert_eq!(max_sendable(&wei("0.1"), &wei("0.5"), true), BigUint::zero());
        assert_eq!(max_sendable(&wei("0.1"), &wei("0.1"), true), BigUint::zero());
        assert_eq!(max_sendable(&BigUint::zero(), &BigUint::zero(), true), BigUint::zero());
    }

    #[test]
    fn test_compare_to_max() {
        let max = wei("0.9");
        assert_eq!(compare_to_max(&wei("0.5"), &max), MaxComparison::Below);
        assert_eq!(compare_to_max(&wei("0.9"), &max), MaxComparison::AtMax);
        assert_eq!(compare_to_max(&wei("0.91"), &max), MaxComparison::Above);
    }

    #[test]
    fn test_shortfall() {
        let amount = wei("1.5");
        let fee = wei("0.1");
        assert_eq!(
            shortfall(&amount, &fee, &wei("1.0"), true, WEI),
            Some("0.6".to_string())
        );
        assert_eq!(shortfall(&amount, &fee, &wei("2.0"), true, WEI), None);
    }

    #[test]
    fn test_shortfall_exactly_enough_is_none() {
        assert_eq!(shortfall(&wei("0.9"), &wei("0.1"), &wei("1"), true, WEI), None);
    }

    #[test]
    fn test_shortfall_non_native_excludes_fee() {
        let usdc = 6;
        let amount = to_base_units("100", usdc).unwrap();
        let balance = to_base_units("100", usdc).unwrap();
        assert_eq!(shortfall(&amount, &wei("0.0045"), &balance, false, usdc), None);
        let balance = to_base_units("99.5", usdc).unwrap();
        assert_eq!(
            shortfall(&amount, &wei("0.0045"), &balance, false, usdc),
            Some("0.5".to_string())
        );
    }

    #[test]
    fn test_fee_shortfall() {
        assert_eq!(fee_shortfall(&wei("0.0045"), &wei("0.003"), WEI), Some("0.0015".to_string()));
        assert_eq!(fee_shortfall(&wei("0.0045"), &wei("1"), WEI), None);
    }

    #[test]
    fn test_usd_estimate() {
        let prices: PriceTable = [("ETH".to_string(), 3_200.0)].into_iter().collect();
        let estimate = usd_estimate(&wei("1.5"), WEI, Some("ETH"), &prices);
        assert!((estimate - 4_800.0).abs() < 1e-9);
        assert_eq!(usd_estimate(&wei("1.5"), WEI, Some("DOGE"), &prices), 0.0);
        assert_eq!(usd_estimate(&wei("1.5"), WEI, None, &prices), 0.0);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(4_800.0), "$4,800.00");
        assert_eq!(format_usd(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(f64::NAN), "$0.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    fn proptest_config() -> ProptestConfig {
        let cases = std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(256);
        ProptestConfig {
            cases,
            ..ProptestConfig::default()
        }
    }

    prop_compose! {
        fn arb_decimal()(decimals in 0u32..=24)
            (decimals in Just(decimals),
             int_part in "[0-9]{1,30}",
             frac in prop::collection::vec(0u8..10, 0..=(decimals as usize)))
            -> (String, u32)
        {
            let frac: String = frac.iter().map(|d| char::from(b'0' + d)).collect();
            let value = if frac.is_empty() { int_part } else { format!("{}.{}", int_part, frac) };
            (value, decimals)
        }
    }

    proptest! {
        #![proptest_config(proptest_config())]

        #[test]
        fn base_unit_round_trip((value, decimals) in arb_decimal()) {
            let normalized = normalize_amount_input(&value);
            let base = to_base_units(&normalized, decimals).unwrap();
            prop_assert_eq!(from_base_units(&base, decimals), canonical_amount(&value));
            prop_assert_eq!(format_base_units(&base, decimals), format_display(&value));
        }

        #[test]
        fn normalize_is_idempotent(raw in "[0-9a-z.,]{0,24}") {
            let once = normalize_amount_input(&raw);
            prop_assert_eq!(normalize_amount_input(&once), once.clone());
            prop_assert!(once.matches('.').count() <= 1);
        }

        #[test]
        fn max_sendable_bounded_by_balance(balance in any::<u128>(), fee in any::<u128>(), native in any::<bool>()) {
            let balance = BigUint::from(balance);
            let max = max_sendable(&balance, &BigUint::from(fee), native);
            prop_assert!(max <= balance);
        }
    }
}

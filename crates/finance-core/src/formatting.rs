use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol appended to every formatted amount.
pub const CURRENCY_SYMBOL: &str = "€";

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use finance_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by a tiny epsilon so exact binary midpoints round away from zero.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        // `frac_str` starts with "0.", e.g. "0.50".
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a decimal amount with thousands separators, rounding half away from
/// zero to `decimals` places.
///
/// # Examples
///
/// ```
/// use finance_core::formatting::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::from(2800), 2), "2,800.00");
/// assert_eq!(format_amount("1234567.891".parse().unwrap(), 2), "1,234,567.89");
/// assert_eq!(format_amount("-0.005".parse().unwrap(), 2), "-0.01");
/// assert_eq!(format_amount("12.5".parse().unwrap(), 0), "13");
/// ```
pub fn format_amount(value: Decimal, decimals: u32) -> String {
    let mut rounded =
        value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(decimals);

    let text = rounded.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut result = group_thousands(int_part);
    if let Some(frac) = frac_part {
        result.push('.');
        result.push_str(frac);
    }

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount in euros with two decimal places.
///
/// # Examples
///
/// ```
/// use finance_core::formatting::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::from(1850)), "1,850.00 €");
/// assert_eq!(format_currency(Decimal::ZERO), "0.00 €");
/// assert_eq!(format_currency("-9.99".parse().unwrap()), "-9.99 €");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    format!("{} {}", format_amount(amount, 2), CURRENCY_SYMBOL)
}

/// Format a percentage value (already multiplied by 100).
///
/// # Examples
///
/// ```
/// use finance_core::formatting::format_percent;
///
/// assert_eq!(format_percent(12.345, 1), "12.3%");
/// assert_eq!(format_percent(0.0, 1), "0.0%");
/// assert_eq!(format_percent(-5.0, 0), "-5%");
/// ```
pub fn format_percent(value: f64, decimals: u32) -> String {
    format!("{}%", format_number(value, decimals))
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use finance_core::formatting::percentage;
///
/// assert!((percentage(50.0, 200.0, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(0.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1,000");
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
    }

    #[test]
    fn test_format_number_negative_zero_has_no_sign() {
        assert_eq!(format_number(-0.001, 1), "0.0");
    }

    // ── format_amount ────────────────────────────────────────────────────────

    #[test]
    fn test_format_amount_pads_decimals() {
        assert_eq!(format_amount(d("950"), 2), "950.00");
        assert_eq!(format_amount(d("950.5"), 2), "950.50");
    }

    #[test]
    fn test_format_amount_rounds_half_away_from_zero() {
        assert_eq!(format_amount(d("2.345"), 2), "2.35");
        assert_eq!(format_amount(d("-2.345"), 2), "-2.35");
    }

    #[test]
    fn test_format_amount_large_values() {
        assert_eq!(format_amount(d("180000"), 2), "180,000.00");
        assert_eq!(format_amount(d("-1234567"), 0), "-1,234,567");
    }

    #[test]
    fn test_format_amount_negative_rounding_to_zero() {
        assert_eq!(format_amount(d("-0.001"), 2), "0.00");
    }

    // ── format_currency / format_percent ─────────────────────────────────────

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(d("2800")), "2,800.00 €");
        assert_eq!(format_currency(d("-120.5")), "-120.50 €");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(25.0, 1), "25.0%");
        assert_eq!(format_percent(16.666, 1), "16.7%");
    }

    // ── percentage ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentage_rounding() {
        assert!((percentage(1.0, 3.0, 2) - 33.33).abs() < 1e-9);
        assert_eq!(percentage(5.0, 0.0, 1), 0.0);
    }

    // ── group_thousands ──────────────────────────────────────────────────────

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}

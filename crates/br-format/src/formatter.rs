//! pt-BR currency, number, and text formatting

use rust_decimal::Decimal;

/// Glyph drawn in place of an absent value
pub const PLACEHOLDER: &str = "-";

/// Format a monetary amount in pt-BR currency style
///
/// Two fraction digits, comma decimal separator, dot thousands separator,
/// `R$ ` prefix, half-even rounding. Negative amounts carry a leading
/// minus.
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// let v: Decimal = "1234.5".parse().unwrap();
/// assert_eq!(br_format::format_currency(Some(&v)), "R$ 1.234,50");
/// assert_eq!(br_format::format_currency(None), "-");
/// ```
pub fn format_currency(value: Option<&Decimal>) -> String {
    let Some(v) = value else {
        return PLACEHOLDER.to_string();
    };

    let mut rounded = v.round_dp(2);
    rounded.rescale(2);

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (digits, "00".to_string()),
    };

    format!("{sign}R$ {},{frac_part}", group_thousands(&int_part))
}

/// Format a quantity as a plain decimal
///
/// Trailing zeros are stripped and the comma decimal separator applied; no
/// thousands grouping (quantities share template cells with unit labels).
pub fn format_number(value: Option<&Decimal>) -> String {
    match value {
        Some(v) => v.normalize().to_string().replace('.', ","),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a discount-limit percentage
pub fn format_percent(value: Option<&Decimal>) -> String {
    match value {
        Some(v) => format!("{}%", format_number(Some(v))),
        None => PLACEHOLDER.to_string(),
    }
}

/// Pass text through, substituting the placeholder for absent/blank input
pub fn format_text(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Insert dot separators every three digits, right to left
fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, '.');
        }
        result.insert(0, c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_currency_basic() {
        assert_eq!(format_currency(Some(&dec("1234.50"))), "R$ 1.234,50");
        assert_eq!(format_currency(Some(&dec("1234.5"))), "R$ 1.234,50");
        assert_eq!(format_currency(Some(&dec("0"))), "R$ 0,00");
    }

    #[test]
    fn test_currency_absent() {
        assert_eq!(format_currency(None), "-");
    }

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(Some(&dec("1000000"))), "R$ 1.000.000,00");
        assert_eq!(format_currency(Some(&dec("999.99"))), "R$ 999,99");
        assert_eq!(
            format_currency(Some(&dec("12345678.9"))),
            "R$ 12.345.678,90"
        );
    }

    #[test]
    fn test_currency_rounds_half_even() {
        assert_eq!(format_currency(Some(&dec("0.125"))), "R$ 0,12");
        assert_eq!(format_currency(Some(&dec("0.135"))), "R$ 0,14");
        assert_eq!(format_currency(Some(&dec("1.005"))), "R$ 1,00");
    }

    #[test]
    fn test_currency_negative() {
        assert_eq!(format_currency(Some(&dec("-10.5"))), "-R$ 10,50");
        assert_eq!(format_currency(Some(&dec("-1234.56"))), "-R$ 1.234,56");
    }

    #[test]
    fn test_number_strips_trailing_zeros() {
        assert_eq!(format_number(Some(&dec("2.50"))), "2,5");
        assert_eq!(format_number(Some(&dec("10.00"))), "10");
        assert_eq!(format_number(Some(&dec("0.00"))), "0");
    }

    #[test]
    fn test_number_no_grouping() {
        assert_eq!(format_number(Some(&dec("1234.5"))), "1234,5");
    }

    #[test]
    fn test_number_absent() {
        assert_eq!(format_number(None), "-");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(Some(&dec("5"))), "5%");
        assert_eq!(format_percent(Some(&dec("12.50"))), "12,5%");
        assert_eq!(format_percent(None), "-");
    }

    #[test]
    fn test_text_placeholder() {
        assert_eq!(format_text(Some("ACME Ltda")), "ACME Ltda");
        assert_eq!(format_text(Some("")), "-");
        assert_eq!(format_text(Some("   ")), "-");
        assert_eq!(format_text(None), "-");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("100"), "100");
        assert_eq!(group_thousands("1000"), "1.000");
        assert_eq!(group_thousands("1000000"), "1.000.000");
    }
}

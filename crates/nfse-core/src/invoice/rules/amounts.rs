//! Amount parsing for Brazilian invoices.
//!
//! Extracted amounts are stored as printed; these helpers are for consumers
//! that need numbers.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a Brazilian-formatted amount (e.g., "R$ 1.234,56" or "1234,56").
pub fn parse_brl_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        // Comma is the decimal separator, dots group thousands
        (Some(_), _) => cleaned.replace('.', "").replace(',', "."),
        // Only dots: a single dot followed by two digits is a decimal point
        (None, Some(d)) if cleaned.matches('.').count() == 1 && cleaned.len() - d == 3 => cleaned,
        (None, Some(_)) => cleaned.replace('.', ""),
        (None, None) => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}

/// Format amount in Brazilian style (1.234,56).
pub fn format_brl_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return s;
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    if amount.is_sign_negative() && !amount.is_zero() {
        formatted.push('-');
    }

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    format!("{},{}", formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_brl_amount() {
        assert_eq!(parse_brl_amount("1.500,00"), Some(dec("1500.00")));
        assert_eq!(parse_brl_amount("R$ 1.234.567,89"), Some(dec("1234567.89")));
        assert_eq!(parse_brl_amount("75,00"), Some(dec("75.00")));
        assert_eq!(parse_brl_amount("1500.00"), Some(dec("1500.00")));
        assert_eq!(parse_brl_amount("1.500"), Some(dec("1500")));
    }

    #[test]
    fn test_parse_brl_amount_without_digits() {
        assert_eq!(parse_brl_amount("R$"), None);
        assert_eq!(parse_brl_amount(""), None);
    }

    #[test]
    fn test_format_brl_amount() {
        assert_eq!(format_brl_amount(dec("1234.56")), "1.234,56");
        assert_eq!(format_brl_amount(dec("12345678.9")), "12.345.678,90");
        assert_eq!(format_brl_amount(dec("75")), "75,00");
    }
}

//! CNPJ (Brazilian legal-entity taxpayer ID) shape and checksum helpers.

/// Characters allowed between CNPJ digits.
fn is_cnpj_punctuation(c: char) -> bool {
    matches!(c, '.' | '/' | '-') || c.is_whitespace()
}

/// Digits of a CNPJ, or `None` if the value is not 14 digits with optional punctuation.
pub fn normalize_cnpj(cnpj: &str) -> Option<String> {
    let cnpj = cnpj.trim();
    if cnpj.chars().any(|c| !c.is_ascii_digit() && !is_cnpj_punctuation(c)) {
        return None;
    }

    let digits: String = cnpj.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.len() == 14).then_some(digits)
}

/// Whether the value has the shape of a CNPJ (punctuation-tolerant).
pub fn has_cnpj_shape(cnpj: &str) -> bool {
    normalize_cnpj(cnpj).is_some()
}

/// Validate the two CNPJ check digits (mod 11).
///
/// Weights for the first digit: 5,4,3,2,9,8,7,6,5,4,3,2; the second digit
/// prepends 6. Sequences of one repeated digit are rejected.
pub fn verify_cnpj_checksum(cnpj: &str) -> bool {
    let Some(digits) = normalize_cnpj(cnpj) else {
        return false;
    };
    let digits: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    let first = check_digit(&digits[..12], &[5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
    let second = check_digit(&digits[..13], &[6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);

    first == digits[12] && second == digits[13]
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        r => 11 - r,
    }
}

/// Format a CNPJ as NN.NNN.NNN/NNNN-NN; other input is returned unchanged.
pub fn format_cnpj(cnpj: &str) -> String {
    match normalize_cnpj(cnpj) {
        Some(d) => format!(
            "{}.{}.{}/{}-{}",
            &d[0..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..14]
        ),
        None => cnpj.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_tolerates_punctuation() {
        assert!(has_cnpj_shape("12.345.678/0001-90"));
        assert!(has_cnpj_shape("12345678000190"));
        assert!(has_cnpj_shape("12 345 678 0001 90"));
    }

    #[test]
    fn test_shape_rejects_wrong_length_or_letters() {
        assert!(!has_cnpj_shape("12.345.678/0001-9"));
        assert!(!has_cnpj_shape("123.456.789-09")); // CPF
        assert!(!has_cnpj_shape("12.345.678/0001-9A"));
        assert!(!has_cnpj_shape(""));
    }

    #[test]
    fn test_checksum() {
        assert!(verify_cnpj_checksum("11.222.333/0001-81"));
        assert!(verify_cnpj_checksum("12.345.678/0001-95"));
        assert!(!verify_cnpj_checksum("12.345.678/0001-90"));
        assert!(!verify_cnpj_checksum("11.111.111/1111-11"));
    }

    #[test]
    fn test_format_cnpj() {
        assert_eq!(format_cnpj("11222333000181"), "11.222.333/0001-81");
        assert_eq!(format_cnpj("11.222.333/0001-81"), "11.222.333/0001-81");
        assert_eq!(format_cnpj("n/a"), "n/a");
    }
}

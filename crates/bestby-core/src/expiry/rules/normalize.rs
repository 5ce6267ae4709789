//! OCR character repair inside date-like fragments.

/// Repair common OCR confusions in a fragment suspected to contain a date.
///
/// Unicode dash variants fold to an ASCII hyphen, characters outside
/// `[0-9A-Za-z/.\- ]` collapse to a space, and letter/digit look-alikes
/// (O/o, I/l, B, Z, S) become the digits they resemble. Always runs in full
/// before any parse attempt.
pub fn normalize_date_token(fragment: &str) -> String {
    fragment
        .trim()
        .chars()
        .map(|c| {
            let c = match c {
                '\u{2013}' | '\u{2014}' => '-',
                other => other,
            };
            let c = if c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '-' | ' ') {
                c
            } else {
                ' '
            };
            match c {
                'O' | 'o' => '0',
                'I' | 'l' => '1',
                'B' => '8',
                'Z' => '2',
                'S' => '5',
                other => other,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_alike_substitution() {
        assert_eq!(normalize_date_token("O1/O1/2O24"), "01/01/2024");
        assert_eq!(normalize_date_token("BlZS"), "8125");
    }

    #[test]
    fn test_unicode_dashes_fold() {
        assert_eq!(normalize_date_token("12\u{2014}03\u{2013}2024"), "12-03-2024");
    }

    #[test]
    fn test_noise_collapses_to_space() {
        assert_eq!(normalize_date_token("EXP: 12/2025"), "EXP  12/2025");
        assert_eq!(normalize_date_token("(15.01.24)"), " 15.01.24 ");
    }

    #[test]
    fn test_trims_before_repair() {
        assert_eq!(normalize_date_token("  03/2024  "), "03/2024");
    }
}

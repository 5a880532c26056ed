//! Lenient parsing of numeric form fields.
//!
//! Admin forms and the pour API accept whatever a browser or a script sends.
//! A field parses when it starts with a number (`"5"`, `"4.5%"`, `" 38 pints"`);
//! anything else yields `None` and the caller substitutes its default.

/// Parse the leading decimal number of `input`.
#[must_use]
pub fn parse_float(input: &str) -> Option<f64> {
    let prefix = numeric_prefix(input.trim_start(), true);
    prefix.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse the leading integer of `input`, ignoring any fractional part.
#[must_use]
pub fn parse_int(input: &str) -> Option<i64> {
    let prefix = numeric_prefix(input.trim_start(), false);
    prefix.parse::<i64>().ok()
}

/// Whether a checkbox-style field is set (`"on"` from a browser, `"1"` from scripts).
#[must_use]
pub fn parse_flag(input: Option<&str>) -> bool {
    matches!(input.map(str::trim), Some("on" | "1" | "true"))
}

fn numeric_prefix(input: &str, allow_fraction: bool) -> &str {
    let bytes = input.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut has_digits = end > digits_start;

    if allow_fraction && bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }
        if fraction_end > fraction_start || has_digits {
            has_digits |= fraction_end > fraction_start;
            end = fraction_end;
        }
    }

    if has_digits {
        input.get(..end).unwrap_or_default()
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_plain() {
        assert_eq!(parse_float("5"), Some(5.0));
        assert_eq!(parse_float("0.5"), Some(0.5));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("-2"), Some(-2.0));
    }

    #[test]
    fn test_parse_float_trailing_garbage() {
        assert_eq!(parse_float("4.5%"), Some(4.5));
        assert_eq!(parse_float(" 38 pints"), Some(38.0));
        assert_eq!(parse_float("7."), Some(7.0));
    }

    #[test]
    fn test_parse_float_rejects_non_numbers() {
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float("-"), None);
        assert_eq!(parse_float("."), None);
    }

    #[test]
    fn test_parse_int_truncates() {
        assert_eq!(parse_int("3"), Some(3));
        assert_eq!(parse_int("3.7"), Some(3));
        assert_eq!(parse_int("12a"), Some(12));
        assert_eq!(parse_int("tap"), None);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("on")));
        assert!(parse_flag(Some("1")));
        assert!(!parse_flag(Some("0")));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(None));
    }
}

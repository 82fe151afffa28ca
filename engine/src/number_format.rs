//! FILENAME: engine/src/number_format.rs
//! PURPOSE: Locale number formatting for displayed and exported totals.
//! CONTEXT: Downstream spreadsheet tools read the exported file with a
//! space-grouped, comma-decimal convention (`1 234,50`). The rendering is
//! produced in two steps: a plain fixed-point rendering with `.` as decimal
//! point, then digit grouping using the locale's separators.

use serde::{Deserialize, Serialize};

/// A fixed numeric convention: grouping separator, decimal separator and the
/// number of fractional digits always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleNumberFormat {
    pub grouping: char,
    pub decimal: char,
    pub decimal_places: u8,
}

impl LocaleNumberFormat {
    /// Space grouping, comma decimal, two fractional digits.
    pub const LITHUANIAN: LocaleNumberFormat = LocaleNumberFormat {
        grouping: ' ',
        decimal: ',',
        decimal_places: 2,
    };

    /// Format a number with exactly `decimal_places` fractional digits.
    /// A value that rounds to zero never carries a sign. Infinities and NaN
    /// have no digits to group and are rendered as `inf`, `-inf` and `NaN`.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let mut rounded = format!("{:.prec$}", value, prec = self.decimal_places as usize);

        if rounded.starts_with('-') && rounded[1..].chars().all(|c| c == '0' || c == '.') {
            rounded.remove(0);
        }

        self.add_thousands_separator(&rounded)
    }

    /// Parse a string written in this convention back into a number.
    /// Accepts the grouping character, a no-break space, or no grouping at all.
    pub fn parse(&self, s: &str) -> Option<f64> {
        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut normalized = String::with_capacity(body.len() + 1);
        if negative {
            normalized.push('-');
        }

        let mut seen_digit = false;
        let mut seen_decimal = false;
        let mut fraction_digits = 0usize;

        for c in body.chars() {
            if c.is_ascii_digit() {
                seen_digit = true;
                if seen_decimal {
                    fraction_digits += 1;
                }
                normalized.push(c);
            } else if c == self.decimal && !seen_decimal && seen_digit {
                seen_decimal = true;
                normalized.push('.');
            } else if is_grouping_char(c, self.grouping) && seen_digit && !seen_decimal {
                continue;
            } else {
                return None;
            }
        }

        if !seen_digit || (seen_decimal && fraction_digits == 0) {
            return None;
        }

        normalized.parse::<f64>().ok()
    }

    /// Insert grouping separators into a plain `-1234.50` rendering and swap
    /// the decimal point for the locale's separator.
    fn add_thousands_separator(&self, s: &str) -> String {
        let (integer_part, decimal_part) = match s.split_once('.') {
            Some((int, dec)) => (int, Some(dec)),
            None => (s, None),
        };

        let negative = integer_part.starts_with('-');
        let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

        let mut result = String::new();
        if negative {
            result.push('-');
        }

        let len = digits.len();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                result.push(self.grouping);
            }
            result.push(c);
        }

        if let Some(decimal) = decimal_part {
            result.push(self.decimal);
            result.push_str(decimal);
        }

        result
    }
}

impl Default for LocaleNumberFormat {
    fn default() -> Self {
        LocaleNumberFormat::LITHUANIAN
    }
}

fn is_grouping_char(c: char, grouping: char) -> bool {
    // Spreadsheet tools often replace the plain space with a no-break space.
    c == grouping || c == '\u{00A0}' || c == '\u{202F}'
}

/// Format with the default (Lithuanian) convention: `1234.5` -> `"1 234,50"`.
pub fn format_locale(value: f64) -> String {
    LocaleNumberFormat::LITHUANIAN.format(value)
}

/// Parse a value written by [`format_locale`].
pub fn parse_locale(s: &str) -> Option<f64> {
    LocaleNumberFormat::LITHUANIAN.parse(s)
}

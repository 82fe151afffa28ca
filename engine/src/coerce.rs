//! FILENAME: engine/src/coerce.rs
//! PURPOSE: Lenient conversion of raw cell values to numbers.
//! CONTEXT: Delta columns arrive as numbers, numbers stored as text, blanks,
//! or free text. Anything that is not a finite number becomes `None` and is
//! left out of every sum downstream. Coercion never fails.

use crate::cell::CellValue;

/// Coerce a single cell to a number.
///
/// - `Number` passes through when finite.
/// - `Text` is trimmed and parsed with `.` as the decimal separator.
/// - `Boolean` maps to `1` / `0`.
/// - `Empty` and `Error` are missing.
pub fn coerce_numeric(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Number(_) => None,
        CellValue::Text(s) => parse_plain_number(s),
        CellValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        CellValue::Empty | CellValue::Error(_) => None,
    }
}

/// Coerce a whole column. The output has the same length as the input.
pub fn coerce_column(values: &[CellValue]) -> Vec<Option<f64>> {
    values.iter().map(coerce_numeric).collect()
}

/// Number of values in a coerced column that came out missing.
pub fn count_missing(values: &[Option<f64>]) -> usize {
    values.iter().filter(|v| v.is_none()).count()
}

fn parse_plain_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(coerce_numeric(&CellValue::Number(12.5)), Some(12.5));
        assert_eq!(coerce_numeric(&CellValue::Number(-3.0)), Some(-3.0));
        assert_eq!(coerce_numeric(&CellValue::Number(f64::NAN)), None);
        assert_eq!(coerce_numeric(&CellValue::Number(f64::INFINITY)), None);
    }

    #[test]
    fn test_numeric_text() {
        assert_eq!(coerce_numeric(&CellValue::text("200")), Some(200.0));
        assert_eq!(coerce_numeric(&CellValue::text("  -4.25 ")), Some(-4.25));
        assert_eq!(coerce_numeric(&CellValue::text("1e3")), Some(1000.0));
    }

    #[test]
    fn test_unparseable_text_is_missing() {
        assert_eq!(coerce_numeric(&CellValue::text("abc")), None);
        assert_eq!(coerce_numeric(&CellValue::text("")), None);
        assert_eq!(coerce_numeric(&CellValue::text("12,5")), None);
        assert_eq!(coerce_numeric(&CellValue::text("inf")), None);
        assert_eq!(coerce_numeric(&CellValue::text("NaN")), None);
    }

    #[test]
    fn test_other_cells() {
        assert_eq!(coerce_numeric(&CellValue::Boolean(true)), Some(1.0));
        assert_eq!(coerce_numeric(&CellValue::Boolean(false)), Some(0.0));
        assert_eq!(coerce_numeric(&CellValue::Empty), None);
        assert_eq!(coerce_numeric(&CellValue::Error("#N/A".to_string())), None);
    }

    #[test]
    fn test_coerce_column_keeps_length() {
        let column = vec![
            CellValue::Number(1.0),
            CellValue::text("x"),
            CellValue::Empty,
            CellValue::text("2"),
        ];
        let coerced = coerce_column(&column);
        assert_eq!(coerced, vec![Some(1.0), None, None, Some(2.0)]);
        assert_eq!(count_missing(&coerced), 2);
    }
}

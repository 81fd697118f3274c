//! Turning raw workbook cells into typed values.
//!
//! Every function here is total: a blank, NaN, or ill-typed cell yields
//! `None` instead of an error. Unit conversion is not done here; the
//! caller states the unit the value is already in.

use crate::workbook::Cell;
use batchforge_schemas::measurement::Quantity;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parses the cell as a finite real number.
pub fn coerce_number(cell: Option<&Cell>) -> Option<f64> {
    match cell? {
        Cell::Number(n) if n.is_finite() => Some(*n),
        Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Parses the cell as a number and attaches `unit`.
pub fn coerce_quantity(cell: Option<&Cell>, unit: &str) -> Option<Quantity> {
    coerce_number(cell).map(|value| Quantity::new(value, unit))
}

/// Returns the trimmed textual form of the cell.
pub fn coerce_string(cell: Option<&Cell>) -> Option<String> {
    match cell? {
        Cell::Empty => None,
        Cell::Number(n) if !n.is_finite() => None,
        Cell::Number(n) => Some(format_number(*n)),
        Cell::Bool(b) => Some(b.to_string()),
        Cell::Text(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
    }
}

/// Accepts boolean cells, `0`/`1`, and the usual yes/no spellings.
pub fn coerce_bool(cell: Option<&Cell>) -> Option<bool> {
    match cell? {
        Cell::Bool(b) => Some(*b),
        Cell::Number(n) if *n == 1.0 => Some(true),
        Cell::Number(n) if *n == 0.0 => Some(false),
        Cell::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "x" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Non-negative whole number, e.g. a pixel or cycle count.
pub fn coerce_count(cell: Option<&Cell>) -> Option<u32> {
    coerce_number(cell)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64)
        .map(|n| n as u32)
}

/// Dates typed as ISO text, as `dd.mm.yyyy`, or stored as spreadsheet
/// serial day numbers.
pub fn coerce_datetime(cell: Option<&Cell>) -> Option<DateTime<Utc>> {
    match cell? {
        Cell::Number(n) => from_serial_days(*n),
        Cell::Text(s) => parse_date_text(s.trim()),
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d.%m.%Y %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for format in ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
        }
    }
    text.parse::<f64>().ok().and_then(from_serial_days)
}

fn from_serial_days(days: f64) -> Option<DateTime<Utc>> {
    // 1900 date system; 2958465 is 9999-12-31.
    if !days.is_finite() || !(1.0..2_958_466.0).contains(&days) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (days * 86_400_000.0).round() as i64;
    let naive = epoch.checked_add_signed(Duration::milliseconds(millis))?;
    Some(Utc.from_utc_datetime(&naive))
}

pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn numbers_come_from_numeric_cells_and_numeric_strings() {
        assert_eq!(coerce_number(Some(&Cell::Number(1.5))), Some(1.5));
        assert_eq!(coerce_number(Some(&text(" 42 "))), Some(42.0));
        assert_eq!(coerce_number(Some(&text("1e-3"))), Some(0.001));
    }

    #[test]
    fn blank_nan_and_words_are_not_numbers() {
        assert_eq!(coerce_number(None), None);
        assert_eq!(coerce_number(Some(&Cell::Empty)), None);
        assert_eq!(coerce_number(Some(&Cell::Number(f64::NAN))), None);
        assert_eq!(coerce_number(Some(&text("NaN"))), None);
        assert_eq!(coerce_number(Some(&text("   "))), None);
        assert_eq!(coerce_number(Some(&text("DMF"))), None);
    }

    #[test]
    fn quantity_carries_the_callers_unit() {
        let q = coerce_quantity(Some(&text("120")), "°C").unwrap();
        assert_eq!(q.value, 120.0);
        assert_eq!(q.unit, "°C");
    }

    #[test]
    fn strings_are_trimmed_and_whitespace_is_absent() {
        assert_eq!(coerce_string(Some(&text("  ITO "))), Some("ITO".to_string()));
        assert_eq!(coerce_string(Some(&text(" \t "))), None);
        assert_eq!(coerce_string(Some(&Cell::Number(6.0))), Some("6".to_string()));
        assert_eq!(coerce_string(Some(&Cell::Number(0.16))), Some("0.16".to_string()));
        assert_eq!(coerce_string(Some(&Cell::Number(f64::NAN))), None);
    }

    #[test]
    fn booleans_accept_common_spellings() {
        assert_eq!(coerce_bool(Some(&Cell::Bool(true))), Some(true));
        assert_eq!(coerce_bool(Some(&text("Yes"))), Some(true));
        assert_eq!(coerce_bool(Some(&text("no"))), Some(false));
        assert_eq!(coerce_bool(Some(&Cell::Number(0.0))), Some(false));
        assert_eq!(coerce_bool(Some(&text("maybe"))), None);
    }

    #[test]
    fn counts_reject_fractions_and_negatives() {
        assert_eq!(coerce_count(Some(&text("6"))), Some(6));
        assert_eq!(coerce_count(Some(&Cell::Number(2.5))), None);
        assert_eq!(coerce_count(Some(&Cell::Number(-1.0))), None);
    }

    #[test]
    fn dates_parse_from_text_and_serial_numbers() {
        let iso = coerce_datetime(Some(&text("2024-03-05"))).unwrap();
        assert_eq!((iso.year(), iso.month(), iso.day()), (2024, 3, 5));

        let german = coerce_datetime(Some(&text("05.03.2024"))).unwrap();
        assert_eq!(german, iso);

        // 45356 is 2024-03-05 in the 1900 date system.
        let serial = coerce_datetime(Some(&Cell::Number(45356.0))).unwrap();
        assert_eq!(serial, iso);

        assert_eq!(coerce_datetime(Some(&text("soon"))), None);
    }
}

use chrono::{Duration, NaiveDate};
use serde::{Serialize, Serializer};
use serde_json::{Value, json};

use crate::excel::CellValue;

// Largest magnitude at which an f64 still holds every integer exactly.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

// Convert Excel date number to ISO date string
pub fn excel_date_to_iso_string(excel_date: f64) -> Option<String> {
    // Serial 60 is the non-existent 1900-02-29
    let days = if excel_date > 59.0 {
        excel_date - 1.0
    } else {
        excel_date
    };

    let base_date = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    let whole_days = days.trunc() as i64;
    let fractional_day = days.fract();

    let date = base_date.checked_add_signed(Duration::try_days(whole_days - 1)?)?; // Subtract 1 because Excel day 1 is 1900-01-01

    if fractional_day > 0.0 {
        let seconds = (fractional_day * 86_400.0).round() as i64;
        let datetime = date
            .and_hms_opt(0, 0, 0)?
            .checked_add_signed(Duration::try_seconds(seconds)?)?;
        Some(datetime.format("%Y-%m-%dT%H:%M:%S").to_string())
    } else {
        Some(date.format("%Y-%m-%d").to_string())
    }
}

fn number_to_json(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT_INT {
        json!(f as i64)
    } else {
        json!(f)
    }
}

// Convert a cell value into its JSON representation
pub fn cell_value_to_json(cell: &CellValue) -> Value {
    match cell {
        CellValue::Empty => Value::Null,
        CellValue::String(s) => json!(s),
        CellValue::Float(f) => number_to_json(*f),
        CellValue::Int(i) => json!(i),
        CellValue::Bool(b) => json!(b),
        CellValue::DateTime(dt) => {
            if *dt >= 0.0 {
                excel_date_to_iso_string(*dt).map_or_else(|| number_to_json(*dt), Value::String)
            } else {
                number_to_json(*dt)
            }
        }
        CellValue::DateTimeIso(s) | CellValue::DurationIso(s) => json!(s),
        CellValue::Error(e) => json!(e),
    }
}

/// Key used for a header cell in the column-object shape.
///
/// Strings are used verbatim; everything else uses its JSON text, so an empty
/// header becomes `"null"` and `30.0` becomes `"30"`.
pub fn column_key(cell: &CellValue) -> String {
    match cell_value_to_json(cell) {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        cell_value_to_json(self).serialize(serializer)
    }
}

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ExtractError;
use crate::excel::{Sheet, Table, Workbook};
use crate::json_export::extractors::{extract_column_objects, extract_rows};
use crate::json_export::types::{TableData, TableJson, TableShape};

pub fn serialize_to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")
}

pub fn write_json_to_file<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;

    let json_string = serialize_to_json(data)?;

    file.write_all(json_string.as_bytes())
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    Ok(())
}

/// Locates `table_name` (exact, case-sensitive) across all sheets.
///
/// A name registered on more than one sheet is rejected rather than resolved
/// by sheet order.
pub fn find_table<'a>(
    workbook: &'a Workbook,
    table_name: &str,
) -> Result<(&'a Sheet, &'a Table), ExtractError> {
    let mut matches = workbook
        .sheets()
        .iter()
        .filter_map(|sheet| sheet.table(table_name).map(|table| (sheet, table)));

    let Some(found) = matches.next() else {
        return Err(ExtractError::TableNotFound {
            name: table_name.to_string(),
        });
    };

    let others: Vec<String> = matches.map(|(sheet, _)| sheet.name.clone()).collect();
    if !others.is_empty() {
        let mut sheets = vec![found.0.name.clone()];
        sheets.extend(others);
        return Err(ExtractError::AmbiguousTable {
            name: table_name.to_string(),
            sheets,
        });
    }

    Ok(found)
}

/// Extracts `table_name` from `workbook` in the requested shape.
pub fn extract_table(
    workbook: &Workbook,
    table_name: &str,
    shape: TableShape,
) -> Result<TableJson, ExtractError> {
    let (sheet, table) = find_table(workbook, table_name)?;
    let range = table.range()?;

    debug!(
        "extracting table '{}' from sheet '{}' over {} as {:?}",
        table.name, sheet.name, range, shape
    );

    let result = match shape {
        TableShape::Rows => TableJson {
            columns: None,
            data: TableData::Rows(extract_rows(sheet, &range)),
        },
        TableShape::Columns => {
            let (columns, data) = extract_column_objects(sheet, &range);
            TableJson {
                columns: Some(columns),
                data: TableData::Columns(data),
            }
        }
    };

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::{CellAddress, CellValue};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn people_workbook() -> Workbook {
        let mut notes = Sheet::new("Notes");
        notes.add_table("Other", "A1:A2");

        let mut people = Sheet::new("People");
        people.write_rows(
            CellAddress::new(2, 2),
            vec![
                vec![CellValue::from("Name"), CellValue::from("Age")],
                vec![CellValue::from("Ann"), CellValue::Float(30.0)],
                vec![CellValue::from("Bo"), CellValue::Float(41.0)],
                vec![CellValue::from("Cy"), CellValue::Float(22.0)],
            ],
        );
        people.add_table("T1", "B2:C5");

        Workbook::from_sheets(vec![notes, people])
    }

    #[test]
    fn rows_shape_omits_columns() {
        let result = extract_table(&people_workbook(), "T1", TableShape::Rows).unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"data": [["Name", "Age"], ["Ann", 30], ["Bo", 41], ["Cy", 22]]})
        );
    }

    #[test]
    fn columns_shape_lists_headers() {
        let result = extract_table(&people_workbook(), "T1", TableShape::Columns).unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "columns": ["Name", "Age"],
                "data": {"Name": ["Ann", "Bo", "Cy"], "Age": [30, 41, 22]}
            })
        );
    }

    #[test]
    fn unknown_or_differently_cased_name_is_not_found() {
        let workbook = people_workbook();

        for name in ["T2", "t1", ""] {
            let err = extract_table(&workbook, name, TableShape::Rows).unwrap_err();
            assert_eq!(err.reason(), "table_not_found");
        }
    }

    #[test]
    fn same_name_on_two_sheets_is_ambiguous() {
        let mut first = Sheet::new("First");
        first.add_table("T1", "A1:B2");
        let mut second = Sheet::new("Second");
        second.add_table("T1", "C1:D2");
        let workbook = Workbook::from_sheets(vec![first, second]);

        match find_table(&workbook, "T1") {
            Err(ExtractError::AmbiguousTable { name, sheets }) => {
                assert_eq!(name, "T1");
                assert_eq!(sheets, vec!["First", "Second"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn malformed_reference_is_reported() {
        let mut sheet = Sheet::new("Bad");
        sheet.add_table("Broken", "B2-C5");
        let workbook = Workbook::from_sheets(vec![sheet]);

        let err = extract_table(&workbook, "Broken", TableShape::Columns).unwrap_err();
        assert_eq!(err.reason(), "invalid_reference");
    }

    #[test]
    fn repeated_extraction_is_stable() {
        let workbook = people_workbook();

        let first = extract_table(&workbook, "T1", TableShape::Columns).unwrap();
        let second = extract_table(&workbook, "T1", TableShape::Columns).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn writes_pretty_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t1.json");
        let result = extract_table(&people_workbook(), "T1", TableShape::Rows).unwrap();

        write_json_to_file(&result, &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, serde_json::to_value(&result).unwrap());
    }
}

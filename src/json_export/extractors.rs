use crate::excel::{CellAddress, CellValue, RangeReference, Sheet};
use crate::json_export::converters::column_key;
use crate::json_export::types::{TableColumns, TableRows};

/// Every row of `range`, header row included, as cell values.
pub fn extract_rows(sheet: &Sheet, range: &RangeReference) -> TableRows {
    let width = range.cols().count();
    let mut rows = Vec::with_capacity(range.rows().count());

    for row_idx in range.rows() {
        let mut row = Vec::with_capacity(width);
        for col_idx in range.cols() {
            row.push(sheet.cell_at(CellAddress::new(col_idx, row_idx)).clone());
        }
        rows.push(row);
    }

    rows
}

/// Header values of `range`'s first row plus the data rows grouped by header key.
///
/// Columns sharing a header key feed the same list, in row-major order.
pub fn extract_column_objects(
    sheet: &Sheet,
    range: &RangeReference,
) -> (Vec<CellValue>, TableColumns) {
    let header_row = range.start.row;
    let columns: Vec<CellValue> = range
        .cols()
        .map(|col_idx| sheet.cell_at(CellAddress::new(col_idx, header_row)).clone())
        .collect();
    let keys: Vec<String> = columns.iter().map(column_key).collect();

    let mut data = TableColumns::with_capacity(keys.len());

    for row_idx in (header_row + 1)..=range.end.row {
        for (col_idx, key) in range.cols().zip(&keys) {
            let value = sheet.cell_at(CellAddress::new(col_idx, row_idx)).clone();
            data.entry(key.clone()).or_default().push(value);
        }
    }

    (columns, data)
}

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, Sheets, open_workbook_auto_from_rs};
use log::debug;

use crate::error::Result;
use crate::excel::package::load_table_parts;
use crate::excel::{CellAddress, CellValue, Sheet, Table};

/// A loaded workbook: sheets in workbook order, each with its cells and tables.
#[derive(Clone, Debug, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Parses a workbook from raw file bytes.
    ///
    /// Any format calamine recognises is accepted; only xlsx-family packages
    /// carry table definitions, other formats load with no tables.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let mut reader = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let mut table_parts = match &reader {
            Sheets::Xlsx(_) => load_table_parts(Cursor::new(bytes))?,
            _ => HashMap::new(),
        };

        let sheet_names = reader.sheet_names();
        let mut sheets = Vec::with_capacity(sheet_names.len());

        for name in &sheet_names {
            let range = reader.worksheet_range(name)?;
            let mut sheet = create_sheet_from_range(name, &range);

            for part in table_parts.remove(name).unwrap_or_default() {
                sheet.add_table(&part.name, &part.reference);
                if let Some(display_name) = &part.display_name {
                    sheet.add_table(display_name, &part.reference);
                }
            }

            sheets.push(sheet);
        }

        debug!(
            "loaded workbook with {} sheets and {} tables",
            sheets.len(),
            sheets.iter().map(|s| s.tables.len()).sum::<usize>()
        );

        Ok(Self { sheets })
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn get_sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    /// Every table in the workbook, in sheet order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.sheets.iter().flat_map(|sheet| sheet.tables.values())
    }
}

fn create_sheet_from_range(name: &str, range: &calamine::Range<Data>) -> Sheet {
    // Range positions are relative to its first used cell, which becomes the grid origin.
    let Some((start_row, start_col)) = range.start() else {
        return Sheet::new(name);
    };
    let (height, width) = range.get_size();

    let mut data = vec![vec![CellValue::Empty; width]; height];
    for (row_idx, col_idx, cell) in range.used_cells() {
        data[row_idx][col_idx] = CellValue::from(cell);
    }

    let origin = CellAddress::new(start_col as usize + 1, start_row as usize + 1);
    Sheet::from_grid(name, origin, data)
}

use indexmap::IndexMap;

use crate::excel::{CellAddress, CellValue, Table};

/// A worksheet: a cell grid plus the tables defined on it.
///
/// The grid only covers the used area. `data[0][0]` is the cell at `origin`,
/// so a table far from A1 costs no more than its own bounding box.
#[derive(Clone, Debug)]
pub struct Sheet {
    pub name: String,
    origin: CellAddress,
    data: Vec<Vec<CellValue>>,
    pub max_rows: usize,
    pub max_cols: usize,
    pub tables: IndexMap<String, Table>,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl Sheet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            origin: CellAddress::new(1, 1),
            data: Vec::new(),
            max_rows: 0,
            max_cols: 0,
            tables: IndexMap::new(),
        }
    }

    /// Sheet whose used area starts at `origin` and holds `rows`.
    pub(crate) fn from_grid(name: &str, origin: CellAddress, rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut sheet = Self::new(name);
        if width > 0 {
            sheet.max_rows = origin.row + rows.len() - 1;
            sheet.max_cols = origin.col + width - 1;
            sheet.origin = origin;
            sheet.data = rows;
        }
        sheet
    }

    /// Cell at `address`; addresses outside the used area read as empty.
    pub fn cell_at(&self, address: CellAddress) -> &CellValue {
        if address.row < self.origin.row || address.col < self.origin.col {
            return &EMPTY_CELL;
        }

        self.data
            .get(address.row - self.origin.row)
            .and_then(|row| row.get(address.col - self.origin.col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Number of cells held in memory.
    pub fn allocated_cells(&self) -> usize {
        self.data.iter().map(Vec::len).sum()
    }

    /// Grows the grid so that `address` is inside it.
    pub fn ensure_cell_exists(&mut self, address: CellAddress) {
        if self.data.is_empty() {
            self.origin = address;
            self.data.push(vec![CellValue::Empty]);
        }

        let width = self.data[0].len();

        if address.row < self.origin.row {
            let extra = self.origin.row - address.row;
            self.data
                .splice(0..0, std::iter::repeat_n(vec![CellValue::Empty; width], extra));
            self.origin.row = address.row;
        }

        if address.col < self.origin.col {
            let extra = self.origin.col - address.col;
            for row_data in &mut self.data {
                row_data.splice(0..0, std::iter::repeat_n(CellValue::Empty, extra));
            }
            self.origin.col = address.col;
        }

        let row_idx = address.row - self.origin.row;
        if row_idx >= self.data.len() {
            let width = self.data[0].len();
            self.data.resize_with(row_idx + 1, || vec![CellValue::Empty; width]);
        }

        let col_idx = address.col - self.origin.col;
        if col_idx >= self.data[0].len() {
            for row_data in &mut self.data {
                row_data.resize(col_idx + 1, CellValue::Empty);
            }
        }

        self.max_rows = self.max_rows.max(address.row);
        self.max_cols = self.max_cols.max(address.col);
    }

    pub fn set_cell(&mut self, address: CellAddress, value: impl Into<CellValue>) {
        self.ensure_cell_exists(address);
        let row_idx = address.row - self.origin.row;
        let col_idx = address.col - self.origin.col;
        self.data[row_idx][col_idx] = value.into();
    }

    /// Writes `rows` into the grid with the first value at `origin`.
    pub fn write_rows<R, V>(&mut self, origin: CellAddress, rows: R)
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        for (row_offset, row) in rows.into_iter().enumerate() {
            for (col_offset, value) in row.into_iter().enumerate() {
                let address = CellAddress::new(origin.col + col_offset, origin.row + row_offset);
                self.set_cell(address, value);
            }
        }
    }

    pub fn add_table(&mut self, name: &str, reference: &str) {
        let table = Table::new(name, &self.name, reference);
        self.tables.insert(table.name.clone(), table);
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }
}

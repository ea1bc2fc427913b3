mod cell;
mod package;
mod reference;
mod sheet;
mod table;
mod workbook;

pub use cell::CellValue;
pub use reference::{CellAddress, RangeReference};
pub use sheet::Sheet;
pub use table::Table;
pub use workbook::Workbook;

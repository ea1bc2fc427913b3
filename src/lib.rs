//! Extract a named Excel table as JSON-ready data.
//!
//! ```no_run
//! # async fn run() {
//! let result = xltables2json::excel_table_to_json(Some("people.xlsx"), "T1", true).await;
//! if let Some(table) = result {
//!     println!("{}", serde_json::to_string(&table).unwrap());
//! }
//! # }
//! ```

pub mod error;
pub mod excel;
pub mod json_export;
pub mod utils;

use std::path::Path;

use log::debug;

pub use error::{ExtractError, Result};
pub use excel::{CellValue, Workbook};
pub use json_export::{TableData, TableJson, TableShape, extract_table};

/// Loads `bytes` as a workbook and extracts `table_name` from it.
pub fn table_json_from_bytes(
    bytes: &[u8],
    table_name: &str,
    shape: TableShape,
) -> Result<TableJson> {
    let workbook = Workbook::load(bytes)?;
    extract_table(&workbook, table_name, shape)
}

/// Reads the workbook at `path` and extracts `table_name` from it.
pub async fn load_table_json(
    path: impl AsRef<Path>,
    table_name: &str,
    shape: TableShape,
) -> Result<TableJson> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    table_json_from_bytes(&bytes, table_name, shape)
}

/// Like [`load_table_json`], but `file` may be absent.
///
/// An absent `file` fails with [`ExtractError::MissingFile`] before any I/O.
pub async fn load_optional_table_json<P: AsRef<Path>>(
    file: Option<P>,
    table_name: &str,
    shape: TableShape,
) -> Result<TableJson> {
    let file = file.ok_or(ExtractError::MissingFile)?;
    load_table_json(file, table_name, shape).await
}

/// Presence-only variant of [`load_optional_table_json`].
///
/// Every failure, including a missing `file`, yields `None`; the reason is
/// logged at debug level.
pub async fn excel_table_to_json<P: AsRef<Path>>(
    file: Option<P>,
    table_name: &str,
    columns_as_objects: bool,
) -> Option<TableJson> {
    let shape = TableShape::from_columns_flag(columns_as_objects);
    match load_optional_table_json(file, table_name, shape).await {
        Ok(table) => Some(table),
        Err(error) => {
            debug!("table '{table_name}' unavailable ({}): {error}", error.reason());
            None
        }
    }
}

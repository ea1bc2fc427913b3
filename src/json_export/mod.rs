mod converters;
mod exporters;
mod extractors;
mod types;

pub use converters::{cell_value_to_json, column_key, excel_date_to_iso_string};
pub use exporters::{extract_table, find_table, serialize_to_json, write_json_to_file};
pub use extractors::{extract_column_objects, extract_rows};
pub use types::{TableColumns, TableData, TableJson, TableRows, TableShape};

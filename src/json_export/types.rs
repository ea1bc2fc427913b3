use indexmap::IndexMap;
use serde::Serialize;
use std::str::FromStr;

use crate::excel::CellValue;

/// Output shape of an extracted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableShape {
    /// Row-major array of arrays, header row first
    #[default]
    Rows,
    /// Header values as keys, each mapping to that column's values
    Columns,
}

impl TableShape {
    pub fn from_columns_flag(columns_as_objects: bool) -> Self {
        if columns_as_objects {
            TableShape::Columns
        } else {
            TableShape::Rows
        }
    }
}

impl FromStr for TableShape {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "r" | "rows" => Ok(TableShape::Rows),
            "c" | "columns" | "objects" => Ok(TableShape::Columns),
            _ => Err(()),
        }
    }
}

pub type TableRows = Vec<Vec<CellValue>>;

pub type TableColumns = IndexMap<String, Vec<CellValue>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TableData {
    Rows(TableRows),
    Columns(TableColumns),
}

/// Extraction result; `columns` is only present for [`TableShape::Columns`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<CellValue>>,
    pub data: TableData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shape_names() {
        assert_eq!("rows".parse::<TableShape>(), Ok(TableShape::Rows));
        assert_eq!("C".parse::<TableShape>(), Ok(TableShape::Columns));
        assert_eq!("objects".parse::<TableShape>(), Ok(TableShape::Columns));
        assert_eq!("sideways".parse::<TableShape>(), Err(()));
    }

    #[test]
    fn columns_flag_defaults_to_rows() {
        assert_eq!(TableShape::from_columns_flag(false), TableShape::default());
        assert_eq!(TableShape::from_columns_flag(true), TableShape::Columns);
    }
}

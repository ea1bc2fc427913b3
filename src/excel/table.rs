use crate::error::Result;
use crate::excel::RangeReference;

/// A named table region as registered in a sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub name: String,
    pub sheet_name: String,
    /// Raw reference as stored in the workbook, e.g. `"B2:C5"`.
    pub reference: String,
}

impl Table {
    pub fn new(name: &str, sheet_name: &str, reference: &str) -> Self {
        Self {
            name: name.to_string(),
            sheet_name: sheet_name.to_string(),
            reference: reference.to_string(),
        }
    }

    pub fn range(&self) -> Result<RangeReference> {
        self.reference.parse()
    }
}

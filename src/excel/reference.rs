use std::fmt;
use std::str::FromStr;

use crate::error::ExtractError;
use crate::utils::{cell_reference, col_name_to_index};

/// A cell position: 1-based column index and 1-based row number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub col: usize,
    pub row: usize,
}

impl CellAddress {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl FromStr for CellAddress {
    type Err = ExtractError;

    /// Parses `"B2"`, `"aa10"` or `"$C$5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ExtractError::InvalidReference {
            reference: s.to_string(),
        };

        let trimmed = s.trim();
        let letters_end = trimmed
            .find(|c: char| !c.is_ascii_alphabetic() && c != '$')
            .unwrap_or(trimmed.len());
        let (col_part, row_part) = trimmed.split_at(letters_end);

        // Absolute markers may only precede the column letters and the row digits.
        let col_part = col_part.strip_prefix('$').unwrap_or(col_part);
        let col_name = col_part.strip_suffix('$').unwrap_or(col_part);

        if col_name.contains('$')
            || row_part.is_empty()
            || !row_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let col = col_name_to_index(col_name).ok_or_else(invalid)?;
        let row = row_part.parse::<usize>().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        Ok(CellAddress { col, row })
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&cell_reference((self.row, self.col)))
    }
}

/// A rectangular region given by its top-left and bottom-right cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeReference {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl RangeReference {
    pub fn rows(&self) -> std::ops::RangeInclusive<usize> {
        self.start.row..=self.end.row
    }

    pub fn cols(&self) -> std::ops::RangeInclusive<usize> {
        self.start.col..=self.end.col
    }
}

impl FromStr for RangeReference {
    type Err = ExtractError;

    /// Parses `"B2:C5"`. A lone address is a one-cell range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let start = parts.next().unwrap_or_default().parse::<CellAddress>()?;
        let end = match parts.next() {
            Some(end) => end.parse::<CellAddress>()?,
            None => start,
        };

        if parts.next().is_some() {
            return Err(ExtractError::InvalidReference {
                reference: s.to_string(),
            });
        }

        Ok(RangeReference { start, end })
    }
}

impl fmt::Display for RangeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_address() {
        assert_eq!("B2".parse::<CellAddress>().unwrap(), CellAddress::new(2, 2));
        assert_eq!("aa10".parse::<CellAddress>().unwrap(), CellAddress::new(27, 10));
        assert_eq!("$C$5".parse::<CellAddress>().unwrap(), CellAddress::new(3, 5));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for input in ["", "B", "2", "B0", "B2x", "2B", "B-1", "C$$5", "A$B1"] {
            assert!(
                input.parse::<CellAddress>().is_err(),
                "{input} should not parse"
            );
        }
    }

    #[test]
    fn parses_range_reference() {
        let range: RangeReference = "B2:C5".parse().unwrap();
        assert_eq!(range.start, CellAddress::new(2, 2));
        assert_eq!(range.end, CellAddress::new(3, 5));
        assert_eq!(range.rows(), 2..=5);
        assert_eq!(range.cols(), 2..=3);
        assert_eq!(range.to_string(), "B2:C5");
    }

    #[test]
    fn parses_range_past_z() {
        let range: RangeReference = "Y1:AB3".parse().unwrap();
        assert_eq!(range.cols().collect::<Vec<_>>(), vec![25, 26, 27, 28]);
        assert_eq!(range.to_string(), "Y1:AB3");
    }

    #[test]
    fn single_cell_range() {
        let range: RangeReference = "D4".parse().unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn rejects_malformed_ranges() {
        for input in ["B2:", ":C5", "B2:C5:D6", "B2-C5"] {
            let err = input.parse::<RangeReference>().unwrap_err();
            assert_eq!(err.reason(), "invalid_reference");
        }
    }
}

//! Line encoding and decoding of data rows

use crate::value::parse_cell;
use crate::{CellValue, DataRow, Result, StoreError};

/// Inclusive window of data rows to read, 0-based with the header excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowRange {
    pub first: usize,
    /// `None` reads to the end of the file
    pub last: Option<usize>,
}

impl RowRange {
    /// Every row
    pub fn all() -> Self {
        Self::default()
    }

    /// Range from a pair of bounds where `last == 0` means "no upper bound"
    pub fn new(first: usize, last: usize) -> Self {
        Self {
            first,
            last: (last != 0).then_some(last),
        }
    }

    /// Rows `first..` to the end of the file
    pub fn starting_at(first: usize) -> Self {
        Self { first, last: None }
    }

    /// Rows `first..=last`; unlike [`RowRange::new`], a `last` of 0 selects row 0
    pub fn bounded(first: usize, last: usize) -> Self {
        Self {
            first,
            last: Some(last),
        }
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.first && !self.is_past(row)
    }

    /// True once `row` lies beyond the upper bound, so scanning can stop
    pub fn is_past(&self, row: usize) -> bool {
        matches!(self.last, Some(last) if row > last)
    }
}

/// Encode `row` as one line (no terminator) spanning every column in `columns`.
///
/// Columns the row does not mention get `placeholder`.
pub fn encode_row(
    columns: &[String],
    row: &DataRow,
    placeholder: CellValue,
    delimiter: char,
) -> String {
    let mut line = String::new();
    for (idx, name) in columns.iter().enumerate() {
        if idx > 0 {
            line.push(delimiter);
        }
        let value = row.get(name).copied().unwrap_or(placeholder);
        line.push_str(&value.to_string());
    }
    line
}

/// Decode one data line against the header `columns`.
///
/// Column `i` takes field `i`. Missing or blank fields yield `placeholder`,
/// extra fields are ignored. `row` only labels errors.
pub fn decode_row(
    line: &str,
    columns: &[String],
    placeholder: CellValue,
    delimiter: char,
    row: usize,
) -> Result<Vec<CellValue>> {
    let mut fields = line.split(delimiter);
    let mut values = Vec::with_capacity(columns.len());
    for column in columns {
        let field = fields.next().unwrap_or("");
        let value = match parse_cell(field) {
            None => placeholder,
            Some(Ok(value)) => value,
            Some(Err(_)) => {
                return Err(StoreError::ValueParseFailure {
                    row,
                    column: column.clone(),
                    value: field.to_string(),
                })
            }
        };
        values.push(value);
    }
    Ok(values)
}

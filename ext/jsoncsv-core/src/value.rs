//! Cell values and write-side rows
//!
//! Cells are integer-only. A row handed to the store is an insertion-ordered
//! map, so columns it introduces land in the header in the order the caller
//! listed them.

use indexmap::IndexMap;

/// The value held by a single cell
pub type CellValue = i64;

/// Write-side row: column name to cell value, in first-seen order
pub type DataRow = IndexMap<String, CellValue>;

/// Build a [`DataRow`] from `(name, value)` pairs
pub fn data_row<I, S>(cells: I) -> DataRow
where
    I: IntoIterator<Item = (S, CellValue)>,
    S: Into<String>,
{
    cells
        .into_iter()
        .map(|(name, value)| (name.into(), value))
        .collect()
}

/// Parse a data cell.
///
/// Returns `None` for a blank field (the caller substitutes its placeholder)
/// and `Some(Err(..))` when the field holds something other than an integer.
pub fn parse_cell(field: &str) -> Option<Result<CellValue, std::num::ParseIntError>> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.parse::<CellValue>())
    }
}

/// Integer prefix of `token`, the way C's `atoi` reads it.
///
/// Leading whitespace and one sign are accepted, then as many digits as
/// follow. Anything without digits reads as zero.
pub fn leading_integer(token: &str) -> CellValue {
    let s = token.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: CellValue = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(CellValue::from(b - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}

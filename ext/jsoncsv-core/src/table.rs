//! Column-major read result

use crate::{CellValue, DataRow, Result, StoreError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// Column name to the values of the scanned rows, in header order.
///
/// Serializes as a JSON object of arrays: `{"a":[1,0],"b":[2,0]}`. Every
/// column holds the same number of values; deserializing a ragged object fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndexMap<String, Vec<CellValue>>")]
pub struct Table {
    columns: IndexMap<String, Vec<CellValue>>,
}

impl Table {
    /// An empty table with the given columns
    pub fn with_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: names.into_iter().map(|n| (n.into(), Vec::new())).collect(),
        }
    }

    /// Build a table from `(column, values)` pairs, rejecting columns of unequal length
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<CellValue>)>,
        S: Into<String>,
    {
        Self::try_from(
            columns
                .into_iter()
                .map(|(name, cells)| (name.into(), cells))
                .collect::<IndexMap<_, _>>(),
        )
    }

    /// Append one decoded row, one value per column in header order
    pub fn push_row(&mut self, values: Vec<CellValue>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(StoreError::internal(format!(
                "Row has {} values but table has {} columns",
                values.len(),
                self.columns.len()
            )));
        }
        for (cells, value) in self.columns.values_mut().zip(values) {
            cells.push(value);
        }
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of scanned rows; every column has this many values
    pub fn row_count(&self) -> usize {
        self.columns.values().next().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Row-major view of the `index`-th scanned row
    pub fn row(&self, index: usize) -> Option<DataRow> {
        if index >= self.row_count() {
            return None;
        }
        self.columns
            .iter()
            .map(|(name, cells)| cells.get(index).map(|value| (name.clone(), *value)))
            .collect()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Vec<CellValue>> {
        self.columns.iter()
    }

    pub fn into_columns(self) -> IndexMap<String, Vec<CellValue>> {
        self.columns
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl TryFrom<IndexMap<String, Vec<CellValue>>> for Table {
    type Error = StoreError;

    fn try_from(columns: IndexMap<String, Vec<CellValue>>) -> Result<Self> {
        let mut lengths = columns.iter().map(|(name, cells)| (name, cells.len()));
        if let Some((first, expected)) = lengths.next() {
            if let Some((name, len)) = lengths.find(|(_, len)| *len != expected) {
                return Err(StoreError::internal(format!(
                    "Column {:?} has {} values but column {:?} has {}",
                    name, len, first, expected
                )));
            }
        }
        Ok(Self { columns })
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.columns.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Vec<CellValue>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<CellValue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

use crate::{Blueprint, Table};

/// Trait for schema introspection
///
/// Implemented by both the write-side [`Blueprint`] and the read-side
/// [`Table`], so callers can ask either one about its columns without caring
/// where the column list came from.
pub trait SchemaInspector {
    /// Number of columns
    fn column_count(&self) -> usize;

    /// Position of a column in the header, if present
    fn position(&self, name: &str) -> Option<usize>;

    /// Check if a column exists
    fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Column names in header order
    fn column_names(&self) -> Vec<String>;
}

impl SchemaInspector for Blueprint {
    fn column_count(&self) -> usize {
        self.len()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.ordinal(name)
    }

    fn column_names(&self) -> Vec<String> {
        self.ordered_names().to_vec()
    }
}

impl SchemaInspector for Table {
    fn column_count(&self) -> usize {
        Table::column_count(self)
    }

    fn position(&self, name: &str) -> Option<usize> {
        Table::column_names(self).position(|c| c == name)
    }

    fn column_names(&self) -> Vec<String> {
        Table::column_names(self).map(str::to_string).collect()
    }
}

//! Column blueprint: the mapping from column name to its position in the file
//!
//! A [`Blueprint`] is rebuilt from the header line at the start of every write
//! and handed around by value. It is never cached between calls.

use crate::value::leading_integer;
use crate::{Result, StoreError};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Column name to ordinal, plus the names ordered by ordinal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blueprint {
    ordinals: HashMap<String, usize>,
    ordered: Vec<String>,
}

impl Blueprint {
    /// An empty blueprint, the schema of a database that does not exist yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the header line of `path` into a blueprint.
    ///
    /// A missing file is a new database and yields an empty blueprint. An empty
    /// file does the same.
    pub fn load_from_file<P: AsRef<Path>>(path: P, delimiter: char) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(StoreError::unreadable(path, e)),
        };

        let mut first_line = String::new();
        BufReader::new(file)
            .read_line(&mut first_line)
            .map_err(|e| StoreError::unreadable(path, e))?;

        Self::from_header(path, strip_line_ending(&first_line), delimiter)
    }

    /// Build a blueprint from a header line that was read from `path`.
    ///
    /// Ordinals follow left-to-right order. `path` only labels errors.
    pub fn from_header(path: &Path, line: &str, delimiter: char) -> Result<Self> {
        let mut blueprint = Self::new();
        if line.is_empty() {
            return Ok(blueprint);
        }

        for token in line.split(delimiter) {
            if leading_integer(token) != 0 {
                return Err(StoreError::schema_corruption(path, token));
            }
            if blueprint.ordinals.contains_key(token) {
                return Err(StoreError::DuplicateColumn {
                    path: path.to_path_buf(),
                    column: token.to_string(),
                });
            }
            let ordinal = blueprint.ordinals.len();
            blueprint.ordinals.insert(token.to_string(), ordinal);
        }

        blueprint.sort();
        Ok(blueprint)
    }

    /// Merge `incoming` column names into this blueprint.
    ///
    /// Unknown names are appended with the next free ordinal in the order they
    /// are yielded; known names keep their ordinal. The flag reports whether
    /// any column was added.
    pub fn reconcile<I, S>(mut self, incoming: I) -> (Self, bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut changed = false;
        for name in incoming {
            let name = name.as_ref();
            if !self.ordinals.contains_key(name) {
                let ordinal = self.ordinals.len();
                self.ordinals.insert(name.to_string(), ordinal);
                changed = true;
            }
        }

        if changed {
            self.sort();
        }
        (self, changed)
    }

    /// Regenerate the ordered column list from the ordinals
    pub fn sort(&mut self) {
        let mut pairs: Vec<(&String, &usize)> = self.ordinals.iter().collect();
        pairs.sort_by_key(|(_, ordinal)| **ordinal);
        self.ordered = pairs.into_iter().map(|(name, _)| name.clone()).collect();
    }

    /// Column names in on-disk order
    pub fn ordered_names(&self) -> &[String] {
        &self.ordered
    }

    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.ordinals.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// The header line for this blueprint, without a line terminator
    pub fn header_line(&self, delimiter: char) -> String {
        let mut buf = [0u8; 4];
        self.ordered.join(delimiter.encode_utf8(&mut buf))
    }
}

/// Check that `name` can be written into a header and read back as the same column
pub fn validate_column_name(name: &str, delimiter: char) -> Result<()> {
    if name.is_empty() {
        return Err(StoreError::invalid_column(name, "column names must not be empty"));
    }
    if name.contains(delimiter) {
        return Err(StoreError::invalid_column(
            name,
            format!("column names must not contain the delimiter {:?}", delimiter),
        ));
    }
    if name.contains(['\n', '\r']) {
        return Err(StoreError::invalid_column(
            name,
            "column names must not contain line breaks",
        ));
    }
    if leading_integer(name) != 0 {
        return Err(StoreError::invalid_column(
            name,
            "column names must not start with a non-zero number",
        ));
    }
    Ok(())
}

pub(crate) fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

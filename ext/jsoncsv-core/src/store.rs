//! The database handle: appends rows and reads back row windows

use crate::codec::{decode_row, encode_row, RowRange};
use crate::logger::StoreLogger;
use crate::rewrite::HeaderRewrite;
use crate::schema::{strip_line_ending, validate_column_name, Blueprint};
use crate::{CellValue, DataRow, ErrorContext, Result, StoreConfig, StoreError, Table};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Builder for creating a configured Store
pub struct StoreBuilder {
    config: StoreConfig,
}

impl StoreBuilder {
    /// Create a new StoreBuilder for `path` with default settings
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config: StoreConfig::new(path),
        }
    }

    /// Set the value used for blank and absent cells
    pub fn with_placeholder(mut self, placeholder: CellValue) -> Self {
        self.config.placeholder = placeholder;
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Echo diagnostics to stderr
    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.config.debug_mode = debug_mode;
        self
    }

    /// Build a Store with the configured settings
    pub fn build(self) -> Result<Store> {
        Store::from_config(self.config)
    }
}

/// Append-only store over one delimited text file.
///
/// The store keeps no schema state between calls: every write re-reads the
/// header, so several handles (or other processes) appending in turn all see
/// the latest columns. Concurrent writers must be serialized by the caller.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
    logger: StoreLogger,
}

impl Store {
    /// Create a store over `path` with default settings
    pub fn new<P: Into<PathBuf>>(path: P) -> Result<Self> {
        StoreBuilder::new(path).build()
    }

    pub fn from_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let logger = StoreLogger::new(config.debug_mode);
        Ok(Self { config, logger })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Current schema as recorded in the file's header
    pub fn schema(&self) -> Result<Blueprint> {
        let blueprint = Blueprint::load_from_file(self.path(), self.config.delimiter)?;
        if blueprint.is_empty() && !self.path().exists() {
            self.logger.debug(|| {
                format!(
                    "No database file at {}; starting with an empty schema",
                    self.path().display()
                )
            });
        }
        Ok(blueprint)
    }

    /// Column names in on-disk order
    pub fn columns(&self) -> Result<Vec<String>> {
        Ok(self.schema()?.ordered_names().to_vec())
    }

    /// Append one row, widening the header first if the row brings new columns.
    pub fn append_row(&self, row: &DataRow) -> Result<()> {
        let path = self.path();
        let delimiter = self.config.delimiter;

        let blueprint = self.schema().inspect_err(|e| {
            self.logger.error(|| format!("Unable to read the header: {}", e));
        })?;

        for name in row.keys() {
            if blueprint.ordinal(name).is_none() {
                validate_column_name(name, delimiter)?;
            }
        }

        let (blueprint, changed) = blueprint.reconcile(row.keys());
        if blueprint.is_empty() {
            self.logger
                .debug(|| "Row and database have no columns; nothing to write");
            return Ok(());
        }

        if changed {
            self.logger.info(|| {
                format!(
                    "Rewriting header of {} to {:?}",
                    path.display(),
                    blueprint.ordered_names()
                )
            });
            HeaderRewrite::new(path, blueprint.header_line(delimiter))
                .stage(&self.logger)?
                .commit()?;
        }

        let line = encode_row(
            blueprint.ordered_names(),
            row,
            self.config.placeholder,
            delimiter,
        );

        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                self.logger
                    .error(|| format!("Unable to open {} for append: {}", path.display(), e));
                StoreError::unwritable(path, e)
            })?;

        let mut record = String::with_capacity(line.len() + 2);
        if !ends_with_newline(&mut file).map_err(|e| StoreError::unreadable(path, e))? {
            self.logger
                .warn(|| format!("Terminating the unfinished last line of {}", path.display()));
            record.push('\n');
        }
        record.push_str(&line);
        record.push('\n');
        file.write_all(record.as_bytes())
            .map_err(|e| StoreError::unwritable(path, e))?;

        self.logger
            .debug(|| format!("Appended row {:?} to {}", line, path.display()));
        Ok(())
    }

    /// Append several rows in order, stopping at the first failure
    pub fn append_rows<'a, I>(&self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a DataRow>,
    {
        for row in rows {
            self.append_row(row)?;
        }
        Ok(())
    }

    /// Read the rows in `range` from the configured file
    pub fn load_rows(&self, range: RowRange) -> Result<Table> {
        self.load_rows_from(self.path(), range)
    }

    /// Read the rows in `range` from `path`, using this store's delimiter and placeholder.
    ///
    /// Column names come from the file's own header line.
    pub fn load_rows_from<P: AsRef<Path>>(&self, path: P, range: RowRange) -> Result<Table> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            self.logger.error(|| {
                format!("Database could not be opened. Path: {}: {}", path.display(), e)
            });
            StoreError::unreadable(path, e)
        })?;

        let mut lines = BufReader::new(file).lines();

        let header = match lines.next() {
            Some(line) => line.map_err(|e| StoreError::unreadable(path, e))?,
            None => return Ok(Table::default()),
        };
        let blueprint =
            Blueprint::from_header(path, strip_line_ending(&header), self.config.delimiter)?;
        let columns = blueprint.ordered_names();
        let mut table = Table::with_columns(columns.iter().cloned());

        for (row, line) in lines.enumerate() {
            if range.is_past(row) {
                break;
            }
            let line = line.map_err(|e| StoreError::unreadable(path, e))?;
            if row < range.first {
                continue;
            }
            let values = decode_row(
                &line,
                columns,
                self.config.placeholder,
                self.config.delimiter,
                row,
            )?;
            table
                .push_row(values)
                .with_context(|| format!("Row {} of {}", row, path.display()))?;
        }

        self.logger.debug(|| {
            format!(
                "Loaded {} rows x {} columns from {}",
                table.row_count(),
                table.column_count(),
                path.display()
            )
        });
        Ok(table)
    }
}

// True for an empty file or one whose last byte is `\n`
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

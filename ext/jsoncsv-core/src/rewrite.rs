//! Staged header rewrite
//!
//! Adding columns means the header line grows, which a plain append cannot do.
//! The whole file is copied into a temporary file next to it with the new
//! header on top, then the temporary file replaces the original in one
//! rename. Until [`StagedRewrite::commit`] runs the original is untouched; a
//! staged rewrite that is dropped removes its temporary file. A missing
//! original stages a header-only file; one that exists but cannot be read
//! fails the stage. Data lines are carried over byte for byte.

use crate::logger::StoreLogger;
use crate::{Result, StoreError};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Builds the replacement for a database file whose header changed
pub struct HeaderRewrite<'a> {
    path: &'a Path,
    header: String,
}

/// A fully written replacement file waiting to be swapped in
#[derive(Debug)]
pub struct StagedRewrite {
    target: PathBuf,
    temp: NamedTempFile,
    rows_copied: usize,
}

impl<'a> HeaderRewrite<'a> {
    /// `header` is the new first line, without a line terminator
    pub fn new(path: &'a Path, header: impl Into<String>) -> Self {
        Self {
            path,
            header: header.into(),
        }
    }

    /// Write the new header and every data line of the current file to a
    /// temporary file in the same directory.
    pub fn stage(&self, logger: &StoreLogger) -> Result<StagedRewrite> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let temp = NamedTempFile::new_in(dir).map_err(|e| {
            logger.warn(|| {
                format!(
                    "Unable to create a temporary database next to {}: {}",
                    self.path.display(),
                    e
                )
            });
            StoreError::unwritable(dir, e)
        })?;

        let mut writer = BufWriter::new(temp.as_file());
        writeln!(writer, "{}", self.header).map_err(|e| StoreError::unwritable(temp.path(), e))?;

        let rows_copied = match File::open(self.path) {
            Ok(original) => copy_data_lines(self.path, original, temp.path(), &mut writer)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            // rows that cannot be read must not be staged away
            Err(e) => {
                logger.warn(|| {
                    format!(
                        "Unable to open the existing database {}: {}",
                        self.path.display(),
                        e
                    )
                });
                return Err(StoreError::unreadable(self.path, e));
            }
        };

        writer
            .flush()
            .map_err(|e| StoreError::unwritable(temp.path(), e))?;
        drop(writer);
        temp.as_file()
            .sync_all()
            .map_err(|e| StoreError::unwritable(temp.path(), e))?;

        logger.debug(|| {
            format!(
                "Staged header rewrite of {} ({} data rows) in {}",
                self.path.display(),
                rows_copied,
                temp.path().display()
            )
        });

        Ok(StagedRewrite {
            target: self.path.to_path_buf(),
            temp,
            rows_copied,
        })
    }
}

impl StagedRewrite {
    /// Location of the staged file
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Number of data lines carried over from the original file
    pub fn rows_copied(&self) -> usize {
        self.rows_copied
    }

    /// Replace the original file with the staged one
    pub fn commit(self) -> Result<()> {
        let target = self.target;
        self.temp
            .persist(&target)
            .map_err(|e| StoreError::unwritable(&target, e.error))?;
        Ok(())
    }
}

// Copies every line after the first as raw bytes. Only a final line without
// a terminator gets a `\n` added.
fn copy_data_lines<W: Write>(
    source: &Path,
    original: File,
    target: &Path,
    writer: &mut W,
) -> Result<usize> {
    let mut reader = BufReader::new(original);
    let mut line = Vec::new();

    // old header
    let read = reader
        .read_until(b'\n', &mut line)
        .map_err(|e| StoreError::unreadable(source, e))?;
    if read == 0 {
        return Ok(0);
    }

    let mut copied = 0;
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| StoreError::unreadable(source, e))?;
        if read == 0 {
            break;
        }
        if !line.ends_with(b"\n") {
            line.push(b'\n');
        }
        writer
            .write_all(&line)
            .map_err(|e| StoreError::unwritable(target, e))?;
        copied += 1;
    }
    Ok(copied)
}

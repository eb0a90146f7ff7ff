//! Test utilities for jsoncsv-core

#[cfg(test)]
pub mod test {
    use crate::{Store, StoreBuilder};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// A scratch directory and the path of a database file inside it.
    /// The file itself is not created.
    pub fn scratch_db(name: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        (dir, path)
    }

    /// Write `lines` to `path`, each terminated with `\n`
    pub fn write_db(path: &Path, lines: &[&str]) {
        let mut content = String::new();
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(path, content).unwrap();
    }

    /// The lines of `path`, without terminators
    pub fn read_db(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// A store over `path` with default settings
    pub fn store_at(path: &Path) -> Store {
        StoreBuilder::new(path).build().unwrap()
    }
}

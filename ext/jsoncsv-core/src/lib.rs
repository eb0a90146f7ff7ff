//! Append-only integer table stored in a delimited text file
//!
//! `jsoncsv-core` keeps a table in a plain text file: the first line names the
//! columns, every following line holds one row of integers. The schema is
//! implicit and grows on demand; writing a row with a column the file has not
//! seen yet widens the header in place while every existing row is kept.
//!
//! # Key Components
//!
//! - **Schema**: [`schema::Blueprint`] maps column names to positions
//!   - Rebuilt from the header at the start of every write
//!   - New columns are appended; existing positions never move
//!
//! - **Header rewrite**: [`rewrite::HeaderRewrite`] widens the header
//!   - Stages the new file next to the original, then swaps it in with a rename
//!   - The original stays intact until the swap
//!
//! - **Codec**: [`codec`] turns rows into lines and back
//!   - Absent and blank cells become the configured placeholder
//!   - Non-integer cells fail the read
//!
//! - **Store**: [`Store`] ties it together
//!   - [`Store::append_row`] for writes
//!   - [`Store::load_rows`] reads a [`RowRange`] into a column-major [`Table`]
//!
//! # Example Usage
//!
//! ```no_run
//! use jsoncsv_core::{data_row, RowRange, Store};
//!
//! let store = Store::new("measurements.csv")?;
//! store.append_row(&data_row([("a", 1), ("b", 2)]))?;
//! store.append_row(&data_row([("c", 3)]))?;
//!
//! let table = store.load_rows(RowRange::all())?;
//! assert_eq!(table.to_json()?, r#"{"a":[1,0],"b":[2,0],"c":[0,3]}"#);
//! # Ok::<(), jsoncsv_core::StoreError>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod logger;
pub mod rewrite;
pub mod schema;
pub mod store;
pub mod table;
pub mod traits;
pub mod value;

#[cfg(test)]
pub mod test_utils;

pub use codec::RowRange;
pub use config::StoreConfig;
pub use error::{ErrorContext, ErrorKind, Result, StoreError};
pub use logger::{LogLevel, StoreLogger};
pub use schema::Blueprint;
pub use store::{Store, StoreBuilder};
pub use table::Table;
pub use traits::SchemaInspector;
pub use value::{data_row, CellValue, DataRow};

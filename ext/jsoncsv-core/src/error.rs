use std::path::PathBuf;
use thiserror::Error;

/// Core error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The first line holds a numeric-looking token, so it is a data row rather than a header
    #[error("Schema corruption in {}: header token {token:?} looks like a number", path.display())]
    SchemaCorruption { path: PathBuf, token: String },

    /// The header names the same column more than once
    #[error("Schema corruption in {}: column {column:?} appears twice in the header", path.display())]
    DuplicateColumn { path: PathBuf, column: String },

    /// The file exists but cannot be opened or read, or is missing on a read
    #[error("File unreadable: {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file cannot be opened for append, or a staged rewrite cannot be written
    #[error("File unwritable: {}: {source}", path.display())]
    FileUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A non-blank data cell is not a valid integer
    #[error("Parse error: row {row}, column {column:?}: {value:?} is not an integer")]
    ValueParseFailure {
        row: usize,
        column: String,
        value: String,
    },

    /// A column name that cannot be written into a header
    #[error("Invalid column name {name:?}: {reason}")]
    InvalidColumnName { name: String, reason: String },

    /// Invalid construction-time configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// IO errors not tied to a specific store file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal errors that shouldn't happen
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of [`StoreError`] for callers that only branch on the failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SchemaCorruption,
    FileUnreadable,
    FileUnwritable,
    ValueParseFailure,
    InvalidInput,
    Other,
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Create a new schema corruption error
    pub fn schema_corruption<P: Into<PathBuf>, S: Into<String>>(path: P, token: S) -> Self {
        StoreError::SchemaCorruption {
            path: path.into(),
            token: token.into(),
        }
    }

    /// Create a new unreadable-file error
    pub fn unreadable<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        StoreError::FileUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Create a new unwritable-file error
    pub fn unwritable<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        StoreError::FileUnwritable {
            path: path.into(),
            source,
        }
    }

    /// Create a new invalid column name error
    pub fn invalid_column<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        StoreError::InvalidColumnName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid config error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        StoreError::InvalidConfig(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        StoreError::Internal(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::SchemaCorruption { .. } | StoreError::DuplicateColumn { .. } => {
                ErrorKind::SchemaCorruption
            }
            StoreError::FileUnreadable { .. } => ErrorKind::FileUnreadable,
            StoreError::FileUnwritable { .. } => ErrorKind::FileUnwritable,
            StoreError::ValueParseFailure { .. } => ErrorKind::ValueParseFailure,
            StoreError::InvalidColumnName { .. } | StoreError::InvalidConfig(_) => {
                ErrorKind::InvalidInput
            }
            StoreError::Io(_) | StoreError::Json(_) | StoreError::Internal(_) => ErrorKind::Other,
        }
    }
}

/// Extension trait to add context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, ctx: S) -> Result<T>;

    /// Add context with a closure that's only called on error
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, f: F) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<StoreError>,
{
    fn context<S: Into<String>>(self, ctx: S) -> Result<T> {
        self.map_err(|e| {
            let base_error = e.into();
            StoreError::Internal(format!("{}: {}", ctx.into(), base_error))
        })
    }

    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let base_error = e.into();
            StoreError::Internal(format!("{}: {}", f().into(), base_error))
        })
    }
}

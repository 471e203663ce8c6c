//! Loader-specific types: errors, configuration and statistics.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading reference data.
///
/// Every variant is fatal: reference data that fails to load must stop
/// initialization.
#[derive(Error, Debug)]
pub enum DataError {
    /// I/O error reading a data file.
    #[error("IO error reading reference data: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid header - column count mismatch.
    #[error("Invalid header in {source_name}: expected {expected} columns, found {found}")]
    InvalidHeader {
        /// Table or file being read.
        source_name: String,
        /// Expected column count.
        expected: usize,
        /// Found column count.
        found: usize,
    },

    /// Unexpected column name.
    #[error("Unexpected column '{found}' at position {position} in {source_name}, expected '{expected}'")]
    UnexpectedColumn {
        /// Table or file being read.
        source_name: String,
        /// The column position.
        position: usize,
        /// Expected column name.
        expected: String,
        /// Found column name.
        found: String,
    },

    /// A code or code range that cannot be read.
    #[error("Invalid code: {value}")]
    InvalidCode {
        /// The invalid value.
        value: String,
    },

    /// A year that cannot be read.
    #[error("Invalid year: {value}")]
    InvalidYear {
        /// The invalid value.
        value: String,
    },

    /// A behavior that is not 0, 1, 2, 3 or 6.
    #[error("Invalid behavior: {value}")]
    InvalidBehavior {
        /// The invalid value.
        value: String,
    },

    /// A code listed in two rows of the same table.
    #[error("Code {code} appears in rows {first_row} and {second_row} of table {table}")]
    DuplicateCode {
        /// Table identifier.
        table: String,
        /// The duplicated code.
        code: String,
        /// Zero-based index of the first row holding the code.
        first_row: usize,
        /// Zero-based index of the second row holding the code.
        second_row: usize,
    },

    /// Required data file missing.
    #[error("Required reference data not found: {name} in {location}")]
    RequiredFileMissing {
        /// The data set that was missing.
        name: String,
        /// Where it was searched for.
        location: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Generic parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for loader operations.
pub type DataResult<T> = Result<T, DataError>;

/// Where reference data is loaded from.
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Directory of CSV files to load instead of the embedded snapshot.
    pub data_dir: Option<PathBuf>,
}

impl LoaderConfig {
    /// Creates a config that loads from `path`.
    pub fn from_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(path.into()),
        }
    }
}

/// Statistics from loading reference data.
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Equivalence tables loaded.
    pub tables: usize,
    /// Rows across all equivalence tables.
    pub table_rows: usize,
    /// Hematopoietic relationships across the three datasets.
    pub relationships: usize,
    /// Time taken to load in milliseconds.
    pub load_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_config_default_is_embedded() {
        assert!(LoaderConfig::default().data_dir.is_none());
        let config = LoaderConfig::from_dir("/tmp/mph");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/mph")));
    }

    #[test]
    fn test_duplicate_code_message() {
        let err = DataError::DuplicateCode {
            table: "breast_2018".to_string(),
            code: "8500".to_string(),
            first_row: 0,
            second_row: 3,
        };
        assert_eq!(
            err.to_string(),
            "Code 8500 appears in rows 0 and 3 of table breast_2018"
        );
    }
}

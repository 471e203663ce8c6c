//! Engine errors.

use mph_loader::DataError;
use thiserror::Error;

/// Errors raised while building or reaching an engine.
///
/// Classification itself never fails; a constructed engine always returns
/// an outcome.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Reference data failed to load.
    #[error("Reference data error: {0}")]
    Data(#[from] DataError),

    /// A rule reads a table the reference data does not contain.
    #[error("Group {group} requires table {table}, which is not loaded")]
    MissingTable {
        /// The group id.
        group: String,
        /// The missing table id.
        table: String,
    },

    /// The process-wide engine was used before it was initialized.
    #[error("The default engine has not been initialized")]
    NotInitialized,

    /// The process-wide engine was initialized twice.
    #[error("The default engine is already initialized")]
    AlreadyInitialized,
}

/// Result type for engine construction.
pub type EngineResult<T> = Result<T, EngineError>;

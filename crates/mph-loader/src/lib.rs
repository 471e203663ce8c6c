//! # mph-loader
//!
//! Reference data loader for multiple primary and histology classification.
//!
//! This crate parses the comma-separated reference tables the rule groups
//! consult: histology and topography equivalence tables, and the three
//! hematopoietic relationship datasets. A snapshot of every table is
//! compiled into the crate; a directory of CSV files can be loaded instead.
//!
//! ## Table format
//!
//! Equivalence tables use the columns `codes,behavior,laterality,subtypes`.
//! Code cells are whitespace-separated codes or inclusive ranges such as
//! `8000-8005` or `C300-C301`. Empty cells are unrestricted. Lines starting
//! with `#` are comments.
//!
//! Hematopoietic datasets use `morphology,start_year,end_year,related`.
//!
//! ## Features
//!
//! - `parallel` (default): parse tables concurrently with rayon.
//!
//! ## Usage
//!
//! ```rust
//! use mph_loader::{LoaderConfig, ReferenceData};
//!
//! let data = ReferenceData::load(&LoaderConfig::default()).unwrap();
//! assert!(data.has_table("breast_2018"));
//! ```

#![warn(missing_docs)]

mod embedded;
pub mod hemato;
pub mod loader;
pub mod parser;
pub mod store;
pub mod table;
pub mod types;

pub use hemato::HematoDataset;
pub use loader::{discover_data_files, DataFiles};
pub use parser::{TableParser, TableRecord};
pub use store::ReferenceData;
pub use table::{Column, HistologyTable};
pub use types::{DataError, DataResult, LoadStats, LoaderConfig};

// Re-export mph-types for convenience
pub use mph_types;

//! Reference data file discovery.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use mph_types::RelationshipKind;

use crate::types::{DataError, DataResult};

/// Reference data files discovered in a directory.
#[derive(Debug, Clone, Default)]
pub struct DataFiles {
    /// Equivalence tables as (table id, path); the id is the file stem.
    pub tables: Vec<(String, PathBuf)>,
    /// Hematopoietic relationship datasets.
    pub hemato: HashMap<RelationshipKind, PathBuf>,
}

impl DataFiles {
    /// Returns the hematopoietic datasets that were not found.
    pub fn missing_hemato(&self) -> Vec<&'static str> {
        RelationshipKind::ALL
            .iter()
            .filter(|kind| !self.hemato.contains_key(kind))
            .map(|kind| kind.file_stem())
            .collect()
    }
}

/// Discovers reference data files in a directory.
///
/// Every `*.csv` file is a table named by its file stem, except the three
/// `hemato_*` relationship datasets, which are all required.
pub fn discover_data_files<P: AsRef<Path>>(path: P) -> DataResult<DataFiles> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(DataError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let mut files = DataFiles::default();

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let file_path = entry.path();

        if file_path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
            continue;
        }
        let Some(stem) = file_path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        match hemato_kind(stem) {
            Some(kind) => {
                files.hemato.insert(kind, file_path.clone());
            }
            None => files.tables.push((stem.to_string(), file_path.clone())),
        }
    }

    // Stable order regardless of directory iteration order
    files.tables.sort();

    let missing = files.missing_hemato();
    if !missing.is_empty() {
        return Err(DataError::RequiredFileMissing {
            name: missing.join(", "),
            location: path.display().to_string(),
        });
    }

    Ok(files)
}

/// Maps a file stem to the hematopoietic dataset it holds.
fn hemato_kind(stem: &str) -> Option<RelationshipKind> {
    RelationshipKind::ALL
        .into_iter()
        .find(|kind| kind.file_stem() == stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hemato_kind() {
        assert_eq!(hemato_kind("hemato_same_primary"), Some(RelationshipKind::SamePrimary));
        assert_eq!(hemato_kind("hemato_transform_to"), Some(RelationshipKind::TransformTo));
        assert_eq!(hemato_kind("hemato_icdo2"), None);
        assert_eq!(hemato_kind("breast_2018"), None);
    }

    #[test]
    fn test_missing_directory() {
        let err = discover_data_files("/definitely/not/here").unwrap_err();
        assert!(matches!(err, DataError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_discover_requires_hemato_files() {
        let dir = std::env::temp_dir().join(format!("mph-discover-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("breast_2018.csv"), "codes,behavior,laterality,subtypes\n").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let err = discover_data_files(&dir).unwrap_err();
        assert!(matches!(err, DataError::RequiredFileMissing { .. }));

        for kind in RelationshipKind::ALL {
            fs::write(
                dir.join(format!("{}.csv", kind.file_stem())),
                "morphology,start_year,end_year,related\n",
            )
            .unwrap();
        }

        let files = discover_data_files(&dir).unwrap();
        assert_eq!(files.tables.len(), 1);
        assert_eq!(files.tables[0].0, "breast_2018");
        assert!(files.missing_hemato().is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }
}

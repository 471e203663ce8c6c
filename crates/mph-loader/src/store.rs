//! In-memory reference data store.
//!
//! Holds every equivalence table and the hematopoietic relationship
//! datasets. A `ReferenceData` is fully validated when construction
//! returns; it is never mutated while classification runs, so it can be
//! shared across threads behind an `Arc`.
//!
//! ```ignore
//! let data = ReferenceData::load_embedded()?;
//! let breast = data.table("breast_2018").expect("shipped table");
//! println!("{} rows", breast.row_count());
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use mph_types::RelationshipKind;

use crate::embedded;
use crate::hemato::HematoDataset;
use crate::loader::discover_data_files;
use crate::table::HistologyTable;
use crate::types::{DataError, DataResult, LoadStats, LoaderConfig};

/// Immutable reference data used by the classification engine.
#[derive(Clone)]
pub struct ReferenceData {
    /// Equivalence tables indexed by table id.
    tables: HashMap<String, HistologyTable>,
    /// Hematopoietic relationship datasets.
    hemato: HematoDataset,
    /// Statistics from the load.
    stats: LoadStats,
}

impl std::fmt::Debug for ReferenceData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceData")
            .field("tables", &self.tables.len())
            .field("hemato_relationships", &self.hemato.total_count())
            .field("stats", &self.stats)
            .finish()
    }
}

impl ReferenceData {
    /// Loads reference data as described by `config`.
    pub fn load(config: &LoaderConfig) -> DataResult<Self> {
        match config.data_dir {
            Some(ref dir) => Self::load_from_dir(dir),
            None => Self::load_embedded(),
        }
    }

    /// Loads the reference data snapshot compiled into this crate.
    pub fn load_embedded() -> DataResult<Self> {
        tracing::debug!("Loading embedded reference data");
        Self::from_sources(embedded::TABLES.iter().copied(), embedded::HEMATO.iter().copied())
    }

    /// Loads reference data from a directory of CSV files.
    pub fn load_from_dir<P: AsRef<Path>>(path: P) -> DataResult<Self> {
        let files = discover_data_files(path.as_ref())?;
        tracing::debug!("Loading reference data from {}", path.as_ref().display());

        let mut table_texts = Vec::with_capacity(files.tables.len());
        for (id, file) in &files.tables {
            table_texts.push((id.clone(), fs::read_to_string(file)?));
        }

        let mut hemato_texts = Vec::with_capacity(files.hemato.len());
        for (kind, file) in &files.hemato {
            hemato_texts.push((*kind, fs::read_to_string(file)?));
        }

        Self::from_sources(
            table_texts.iter().map(|(id, text)| (id.as_str(), text.as_str())),
            hemato_texts.iter().map(|(kind, text)| (*kind, text.as_str())),
        )
    }

    /// Builds reference data from (table id, CSV text) pairs and
    /// (dataset kind, CSV text) pairs.
    ///
    /// All three hematopoietic datasets are required.
    pub fn from_sources<'a>(
        tables: impl IntoIterator<Item = (&'a str, &'a str)>,
        hemato: impl IntoIterator<Item = (RelationshipKind, &'a str)>,
    ) -> DataResult<Self> {
        let start = Instant::now();

        let sources: Vec<(&str, &str)> = tables.into_iter().collect();
        let parsed = parse_tables(&sources)?;

        let mut table_map = HashMap::with_capacity(parsed.len());
        let mut table_rows = 0;
        for table in parsed {
            tracing::debug!("Loaded table {} ({} rows)", table.id(), table.row_count());
            table_rows += table.row_count();
            table_map.insert(table.id().to_string(), table);
        }

        let mut dataset = HematoDataset::new();
        let mut seen = Vec::new();
        for (kind, text) in hemato {
            let count = dataset.load_text(kind, text)?;
            tracing::debug!("Loaded {} {} relationships", count, kind.file_stem());
            seen.push(kind);
        }

        let missing: Vec<&str> = RelationshipKind::ALL
            .iter()
            .filter(|kind| !seen.contains(kind))
            .map(|kind| kind.file_stem())
            .collect();
        if !missing.is_empty() {
            return Err(DataError::RequiredFileMissing {
                name: missing.join(", "),
                location: "hematopoietic datasets".to_string(),
            });
        }

        let stats = LoadStats {
            tables: table_map.len(),
            table_rows,
            relationships: dataset.total_count(),
            load_time_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Loaded {} tables ({} rows) and {} hematopoietic relationships in {} ms",
            stats.tables,
            stats.table_rows,
            stats.relationships,
            stats.load_time_ms
        );

        Ok(Self {
            tables: table_map,
            hemato: dataset,
            stats,
        })
    }

    /// Returns a copy of this data with `table` added or replaced.
    ///
    /// Used to build alternative rule-book snapshots side by side.
    pub fn with_table(mut self, table: HistologyTable) -> Self {
        if let Some(old) = self.tables.insert(table.id().to_string(), table.clone()) {
            self.stats.table_rows -= old.row_count();
        } else {
            self.stats.tables += 1;
        }
        self.stats.table_rows += table.row_count();
        self
    }

    /// Returns the table with the given id.
    pub fn table(&self, id: &str) -> Option<&HistologyTable> {
        self.tables.get(id)
    }

    /// Returns true if a table with the given id is loaded.
    pub fn has_table(&self, id: &str) -> bool {
        self.tables.contains_key(id)
    }

    /// Returns the ids of all loaded tables, sorted.
    pub fn table_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the hematopoietic relationship datasets.
    pub fn hemato(&self) -> &HematoDataset {
        &self.hemato
    }

    /// Returns statistics from the load.
    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }
}

/// Parses every table, in parallel when the `parallel` feature is enabled.
#[cfg(feature = "parallel")]
fn parse_tables(sources: &[(&str, &str)]) -> DataResult<Vec<HistologyTable>> {
    sources
        .par_iter()
        .map(|(id, text)| HistologyTable::from_text(id, text))
        .collect()
}

/// Parses every table.
#[cfg(not(feature = "parallel"))]
fn parse_tables(sources: &[(&str, &str)]) -> DataResult<Vec<HistologyTable>> {
    sources
        .iter()
        .map(|(id, text)| HistologyTable::from_text(id, text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mph_types::well_known;

    const TABLE_HEADER: &str = "codes,behavior,laterality,subtypes\n";
    const HEMATO_HEADER: &str = "morphology,start_year,end_year,related\n";

    fn empty_hemato() -> Vec<(RelationshipKind, &'static str)> {
        RelationshipKind::ALL
            .iter()
            .map(|kind| (*kind, HEMATO_HEADER))
            .collect()
    }

    #[test]
    fn test_embedded_data_loads() {
        let data = ReferenceData::load_embedded().unwrap();
        assert_eq!(data.stats().tables, embedded::TABLES.len());
        assert!(data.has_table(well_known::TABLE_BREAST_2018));
        assert!(data.has_table(well_known::TABLE_OTHER_SITES_2023));
        assert!(data.hemato().count(RelationshipKind::SamePrimary) > 0);
        assert!(data.hemato().count(RelationshipKind::TransformTo) > 0);
        assert!(data.hemato().count(RelationshipKind::TransformFrom) > 0);
    }

    #[test]
    fn test_every_well_known_table_is_embedded() {
        let data = ReferenceData::load_embedded().unwrap();
        for id in [
            well_known::TABLE_HEMATO_ICDO2,
            well_known::TABLE_SOLID_PRE_2007,
            well_known::TABLE_PAIRED_SITES_2007,
            well_known::TABLE_PAIRED_SITES_2018,
            well_known::TABLE_BENIGN_BRAIN_2007,
            well_known::TABLE_MALIGNANT_BRAIN_2007,
            well_known::TABLE_NONMALIGNANT_CNS_2018,
            well_known::TABLE_MALIGNANT_CNS_2018,
            well_known::TABLE_HEAD_NECK_2018,
            well_known::TABLE_COLON_2018,
            well_known::TABLE_LUNG_2018,
            well_known::TABLE_MELANOMA_2018,
            well_known::TABLE_BREAST_2018,
            well_known::TABLE_BREAST_2023,
            well_known::TABLE_KIDNEY_2018,
            well_known::TABLE_URINARY_2018,
            well_known::TABLE_OTHER_SITES_2018,
            well_known::TABLE_OTHER_SITES_2023,
        ] {
            assert!(data.has_table(id), "missing table {id}");
        }
    }

    #[test]
    fn test_missing_hemato_dataset_is_fatal() {
        let hemato = vec![(RelationshipKind::SamePrimary, HEMATO_HEADER)];
        let err = ReferenceData::from_sources(Vec::new(), hemato).unwrap_err();
        match err {
            DataError::RequiredFileMissing { name, .. } => {
                assert!(name.contains("hemato_transform_to"));
                assert!(name.contains("hemato_transform_from"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_code_is_fatal() {
        let text = format!("{TABLE_HEADER}8140,,,8480\n8500,,,8480\n");
        let err = ReferenceData::from_sources(vec![("bad", text.as_str())], empty_hemato()).unwrap_err();
        assert!(matches!(err, DataError::DuplicateCode { .. }));
    }

    #[test]
    fn test_with_table_replaces() {
        let original = format!("{TABLE_HEADER}8140,,,8480\n");
        let data = ReferenceData::from_sources(vec![("t", original.as_str())], empty_hemato()).unwrap();
        assert_eq!(data.stats().table_rows, 1);

        let replacement = HistologyTable::from_text("t", &format!("{TABLE_HEADER}8140,,,\n8480,,,\n")).unwrap();
        let data = data.with_table(replacement);
        assert_eq!(data.stats().tables, 1);
        assert_eq!(data.stats().table_rows, 2);
        assert_eq!(data.table("t").unwrap().row_index("8480"), Some(1));
        assert_eq!(data.table_ids(), vec!["t"]);
    }
}

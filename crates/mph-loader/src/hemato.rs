//! Hematopoietic relationship dataset parser and store.
//!
//! Parses the `morphology,start_year,end_year,related` files for the
//! same-primary, transform-to and transform-from datasets.

use std::collections::HashMap;

use csv::StringRecord;
use mph_types::{HematoRelationship, RelationshipKind};

use crate::parser::{parse, TableParser, TableRecord};
use crate::types::{DataError, DataResult};

/// Expected columns in a hematopoietic relationship file.
const RELATIONSHIP_COLUMNS: &[&str] = &["morphology", "start_year", "end_year", "related"];

impl TableRecord for HematoRelationship {
    const EXPECTED_COLUMNS: &'static [&'static str] = RELATIONSHIP_COLUMNS;

    fn from_record(record: &StringRecord) -> DataResult<Self> {
        let start_year = parse::optional_year(record.get(1).unwrap_or(""))?;
        let end_year = parse::optional_year(record.get(2).unwrap_or(""))?;
        if let (Some(start), Some(end)) = (start_year, end_year) {
            if end < start {
                return Err(DataError::InvalidYear {
                    value: format!("{start}-{end}"),
                });
            }
        }

        Ok(HematoRelationship {
            morphology: parse::single_code(record.get(0).unwrap_or(""))?,
            start_year,
            end_year,
            related: parse::single_code(record.get(3).unwrap_or(""))?,
        })
    }
}

/// The three hematopoietic relationship datasets, keyed by morphology.
#[derive(Debug, Clone, Default)]
pub struct HematoDataset {
    same_primary: HashMap<String, Vec<HematoRelationship>>,
    transform_to: HashMap<String, Vec<HematoRelationship>>,
    transform_from: HashMap<String, Vec<HematoRelationship>>,
}

impl HematoDataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one dataset from CSV text and adds it.
    pub fn load_text(&mut self, kind: RelationshipKind, text: &str) -> DataResult<usize> {
        let parser = TableParser::<_, HematoRelationship>::from_text(kind.file_stem(), text)?;
        let mut count = 0;

        for result in parser {
            self.insert(kind, result?);
            count += 1;
        }

        Ok(count)
    }

    /// Adds one relationship.
    pub fn insert(&mut self, kind: RelationshipKind, relationship: HematoRelationship) {
        self.map_mut(kind)
            .entry(relationship.morphology.clone())
            .or_default()
            .push(relationship);
    }

    /// Returns every relationship of `kind` keyed by `morphology`.
    pub fn relationships(&self, kind: RelationshipKind, morphology: &str) -> &[HematoRelationship] {
        self.map(kind)
            .get(morphology)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns true if `morphology` lists `related` under `kind` with a
    /// validity range covering both years.
    pub fn has_relationship(
        &self,
        kind: RelationshipKind,
        morphology: &str,
        related: &str,
        year1: i32,
        year2: i32,
    ) -> bool {
        self.relationships(kind, morphology)
            .iter()
            .any(|rel| rel.related == related && rel.is_valid_for(year1) && rel.is_valid_for(year2))
    }

    /// Returns the number of relationships of `kind`.
    pub fn count(&self, kind: RelationshipKind) -> usize {
        self.map(kind).values().map(Vec::len).sum()
    }

    /// Returns the number of relationships across all datasets.
    pub fn total_count(&self) -> usize {
        RelationshipKind::ALL.iter().map(|kind| self.count(*kind)).sum()
    }

    fn map(&self, kind: RelationshipKind) -> &HashMap<String, Vec<HematoRelationship>> {
        match kind {
            RelationshipKind::SamePrimary => &self.same_primary,
            RelationshipKind::TransformTo => &self.transform_to,
            RelationshipKind::TransformFrom => &self.transform_from,
        }
    }

    fn map_mut(&mut self, kind: RelationshipKind) -> &mut HashMap<String, Vec<HematoRelationship>> {
        match kind {
            RelationshipKind::SamePrimary => &mut self.same_primary,
            RelationshipKind::TransformTo => &mut self.transform_to,
            RelationshipKind::TransformFrom => &mut self.transform_from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "morphology,start_year,end_year,related\n";

    fn make_record(fields: &[&str]) -> StringRecord {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field);
        }
        record
    }

    #[test]
    fn test_parse_relationship_record() {
        let rel = HematoRelationship::from_record(&make_record(&["9863", "2010", "", "9861"])).unwrap();
        assert_eq!(rel.morphology, "9863");
        assert_eq!(rel.start_year, Some(2010));
        assert_eq!(rel.end_year, None);
        assert_eq!(rel.related, "9861");
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let record = make_record(&["9863", "2010", "2001", "9861"]);
        assert!(matches!(
            HematoRelationship::from_record(&record),
            Err(DataError::InvalidYear { .. })
        ));
    }

    #[test]
    fn test_multiple_related_codes_rejected() {
        let record = make_record(&["9863", "", "", "9861 9875"]);
        assert!(HematoRelationship::from_record(&record).is_err());
    }

    #[test]
    fn test_dataset_lookup_respects_years() {
        let mut dataset = HematoDataset::new();
        let text = format!("{HEADER}9823,2001,2009,9670\n9823,2010,,9823\n");
        let count = dataset.load_text(RelationshipKind::SamePrimary, &text).unwrap();
        assert_eq!(count, 2);

        assert!(dataset.has_relationship(RelationshipKind::SamePrimary, "9823", "9670", 2003, 2008));
        assert!(!dataset.has_relationship(RelationshipKind::SamePrimary, "9823", "9670", 2003, 2011));
        assert!(!dataset.has_relationship(RelationshipKind::TransformTo, "9823", "9670", 2003, 2008));
        assert_eq!(dataset.count(RelationshipKind::SamePrimary), 2);
        assert_eq!(dataset.total_count(), 2);
    }

    #[test]
    fn test_unknown_morphology_has_no_relationships() {
        let dataset = HematoDataset::new();
        assert!(dataset
            .relationships(RelationshipKind::TransformFrom, "9861")
            .is_empty());
    }
}

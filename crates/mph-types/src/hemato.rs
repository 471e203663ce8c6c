//! Hematopoietic disease relationship type.
//!
//! This module provides the `HematoRelationship` struct representing one row
//! of the hematopoietic same-primary, transform-to or transform-from
//! datasets.

/// Which hematopoietic dataset a relationship belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationshipKind {
    /// The two morphologies are the same primary.
    SamePrimary,
    /// The morphology can transform to the related morphology.
    TransformTo,
    /// The morphology can arise by transformation from the related morphology.
    TransformFrom,
}

impl RelationshipKind {
    /// All relationship kinds.
    pub const ALL: [RelationshipKind; 3] = [Self::SamePrimary, Self::TransformTo, Self::TransformFrom];

    /// Returns the data file stem holding this dataset.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::SamePrimary => "hemato_same_primary",
            Self::TransformTo => "hemato_transform_to",
            Self::TransformFrom => "hemato_transform_from",
        }
    }
}

/// A relationship between two hematopoietic morphologies.
///
/// # Examples
///
/// ```
/// use mph_types::HematoRelationship;
///
/// let rel = HematoRelationship {
///     morphology: "9863".to_string(),
///     start_year: Some(2010),
///     end_year: None,
///     related: "9861".to_string(),
/// };
///
/// assert!(rel.is_valid_for(2015));
/// assert!(!rel.is_valid_for(2005));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HematoRelationship {
    /// The morphology this row is keyed by.
    pub morphology: String,
    /// First diagnosis year the relationship applies to (`None` = no lower bound).
    pub start_year: Option<i32>,
    /// Last diagnosis year the relationship applies to (`None` = still valid).
    pub end_year: Option<i32>,
    /// The related morphology.
    pub related: String,
}

impl HematoRelationship {
    /// Returns true if `year` falls inside the validity range.
    pub fn is_valid_for(&self, year: i32) -> bool {
        self.start_year.map_or(true, |start| year >= start)
            && self.end_year.map_or(true, |end| year <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_ranges() {
        let rel = HematoRelationship {
            morphology: "9823".to_string(),
            start_year: None,
            end_year: Some(2009),
            related: "9670".to_string(),
        };
        assert!(rel.is_valid_for(1990));
        assert!(rel.is_valid_for(2009));
        assert!(!rel.is_valid_for(2010));
    }

    #[test]
    fn test_file_stems_are_distinct() {
        let stems: Vec<_> = RelationshipKind::ALL.iter().map(|k| k.file_stem()).collect();
        assert_eq!(stems.len(), 3);
        assert!(stems.iter().all(|s| s.starts_with("hemato_")));
        assert_ne!(stems[1], stems[2]);
    }
}

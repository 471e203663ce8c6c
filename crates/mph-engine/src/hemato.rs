//! Hematopoietic relationship lookups.
//!
//! Same-primary relationships are symmetric; transformations are directional.
//! Every relationship applies only when both diagnosis years fall inside
//! its validity range.

use mph_loader::HematoDataset;
use mph_types::RelationshipKind;

/// Returns true if the two histologies are the same primary, in either
/// direction.
pub fn is_same_primary(data: &HematoDataset, first: &str, second: &str, year1: i32, year2: i32) -> bool {
    data.has_relationship(RelationshipKind::SamePrimary, first, second, year1, year2)
        || data.has_relationship(RelationshipKind::SamePrimary, second, first, year1, year2)
}

/// Returns true if the chronic neoplasm `chronic` can transform to the
/// acute neoplasm `acute`.
pub fn is_chronic_to_acute_transformation(
    data: &HematoDataset,
    chronic: &str,
    acute: &str,
    year1: i32,
    year2: i32,
) -> bool {
    data.has_relationship(RelationshipKind::TransformTo, chronic, acute, year1, year2)
}

/// Returns true if the acute neoplasm `acute` can revert to the chronic
/// neoplasm `chronic`.
pub fn is_acute_to_chronic_transformation(
    data: &HematoDataset,
    acute: &str,
    chronic: &str,
    year1: i32,
    year2: i32,
) -> bool {
    data.has_relationship(RelationshipKind::TransformFrom, acute, chronic, year1, year2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "morphology,start_year,end_year,related\n";

    fn dataset() -> HematoDataset {
        let mut data = HematoDataset::new();
        data.load_text(RelationshipKind::SamePrimary, &format!("{HEADER}9591,2010,,9680\n"))
            .unwrap();
        data.load_text(RelationshipKind::TransformTo, &format!("{HEADER}9863,2010,,9861\n"))
            .unwrap();
        data.load_text(RelationshipKind::TransformFrom, &format!("{HEADER}9861,,2015,9863\n"))
            .unwrap();
        data
    }

    #[test]
    fn test_same_primary_is_symmetric() {
        let data = dataset();
        assert!(is_same_primary(&data, "9591", "9680", 2012, 2014));
        assert!(is_same_primary(&data, "9680", "9591", 2012, 2014));
        assert!(!is_same_primary(&data, "9591", "9680", 2009, 2014));
    }

    #[test]
    fn test_transformations_are_directional() {
        let data = dataset();
        assert!(is_chronic_to_acute_transformation(&data, "9863", "9861", 2011, 2012));
        assert!(!is_chronic_to_acute_transformation(&data, "9861", "9863", 2011, 2012));
        assert!(is_acute_to_chronic_transformation(&data, "9861", "9863", 2011, 2012));
        assert!(!is_acute_to_chronic_transformation(&data, "9863", "9861", 2011, 2012));
    }

    #[test]
    fn test_open_start_and_closed_end() {
        let data = dataset();
        assert!(is_acute_to_chronic_transformation(&data, "9861", "9863", 1990, 2015));
        assert!(!is_acute_to_chronic_transformation(&data, "9861", "9863", 2014, 2016));
    }

    #[test]
    fn test_absent_relationship_is_false() {
        let data = dataset();
        assert!(!is_same_primary(&data, "9823", "9823", 2015, 2015));
    }
}

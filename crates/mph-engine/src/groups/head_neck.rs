//! Head and neck groups.

use mph_types::well_known;

use super::common::{self, Unmatched, MALIGNANT};
use crate::group::{Applicability, CodeRanges, RuleGroup};
use crate::rule::Verdict;

const SITES: CodeRanges = &[(0, 148), (300, 329)];
const HEAD_NECK_2018_NOS: &[&str] = &["8000", "8010"];

pub fn head_neck_2007() -> RuleGroup {
    RuleGroup::new(
        well_known::HEAD_NECK_2007,
        "Head and Neck 2007",
        vec![Applicability::years(2007, Some(2017), MALIGNANT)
            .sites(SITES)
            .solid_site_specific()],
        vec![
            common::paired_sites_both_sides(
                "M3",
                "Are there tumors on both the right side and the left side of a site listed as a paired organ?",
                "Tumors on both sides of a paired head and neck site are multiple primaries.",
                well_known::TABLE_PAIRED_SITES_2007,
            ),
            common::topography_major_differs(
                "M4",
                "Are there tumors in sites with ICD-O-3 topography codes that are different at the second (Cxx) and/or third (Cxx) character?",
                "Tumors in different head and neck sites are multiple primaries.",
            ),
            common::years_apart(
                "M5",
                "Are there tumors diagnosed more than five (5) years apart?",
                "Tumors diagnosed more than five years apart are multiple primaries.",
                5,
            ),
            common::invasive_after_in_situ(
                "M6",
                "Is there an invasive tumor following an in situ tumor more than 60 days after diagnosis?",
                "An invasive tumor more than 60 days after an in situ tumor is a multiple primary.",
                60,
            ),
            common::histology_family_differs(
                "M7",
                "Are there tumors with ICD-O-3 histology codes that are different at the first, second or third number?",
                "Tumors with histologies differing at the first three digits are multiple primaries.",
            ),
            common::catch_all(
                "M8",
                "Does not meet any of the above criteria?",
                "Tumors that do not meet any of the above criteria are a single primary.",
                Verdict::Single,
            ),
        ],
    )
}

pub fn head_neck_2018() -> RuleGroup {
    let table = well_known::TABLE_HEAD_NECK_2018;
    RuleGroup::new(
        well_known::HEAD_NECK_2018,
        "2018 Head and Neck",
        vec![Applicability::years(2018, None, MALIGNANT)
            .sites(SITES)
            .solid_site_specific()],
        vec![
            common::paired_sites_both_sides(
                "M3",
                "Are there tumors on both the right side and the left side of a site listed as a paired organ?",
                "Tumors on both sides of a paired head and neck site are multiple primaries.",
                well_known::TABLE_PAIRED_SITES_2018,
            ),
            common::topography_major_differs(
                "M4",
                "Are there tumors in sites with ICD-O-3 topography codes that are different at the second (Cxx) and/or third (Cxx) character?",
                "Tumors in different head and neck sites are multiple primaries.",
            ),
            common::disease_free_years_apart(
                "M5",
                "Is there a subsequent tumor more than five (5) years after the patient was clinically disease-free?",
                "A tumor more than five years after the patient was disease-free is a multiple primary.",
                5,
            ),
            common::in_situ_after_invasive(
                "M6",
                "Is there an in situ tumor following an invasive tumor?",
                "An in situ tumor following an invasive tumor is a recurrence and a single primary.",
            ),
            common::invasive_after_in_situ(
                "M7",
                "Is there an invasive tumor following an in situ tumor more than 60 days after diagnosis?",
                "An invasive tumor more than 60 days after an in situ tumor is a multiple primary.",
                60,
            ),
            common::different_subtypes(
                "M8",
                "Are there tumors with two or more different subtypes/variants in the head and neck histology table?",
                "Different subtypes/variants of the same histology are multiple primaries.",
                table,
            ),
            common::same_row(
                "M9",
                "Are there tumors with ICD-O-3 histology codes on the same row of the head and neck histology table?",
                "Tumors on the same row are a single primary.",
                table,
                HEAD_NECK_2018_NOS,
            ),
            common::different_rows(
                "M10",
                "Are there tumors with ICD-O-3 histology codes on different rows of the head and neck histology table?",
                "Tumors on different rows are multiple primaries.",
                table,
                HEAD_NECK_2018_NOS,
                Unmatched::PotentialMultiple,
                Unmatched::Continue,
            ),
            common::catch_all(
                "M11",
                "Does not meet any of the above criteria?",
                "Tumors that do not meet any of the above criteria are a single primary.",
                Verdict::Single,
            ),
        ],
    )
}

//! Cutaneous melanoma groups.

use mph_types::well_known;

use super::common::{self, Unmatched, MALIGNANT};
use crate::group::{Applicability, CodeRanges, RuleGroup};
use crate::rule::{Rule, Verdict};

const SITES: CodeRanges = &[(440, 449)];

fn skin_site(step: &'static str) -> Rule {
    common::topography_differs(
        step,
        "Are there tumors in sites with ICD-O-3 topography codes that are different at the fourth character (C44x)?",
        "Melanomas of different skin sites are multiple primaries.",
    )
}

fn both_sides(step: &'static str) -> Rule {
    common::opposite_sides(
        step,
        "Are there tumors on both the right side and the left side of the body?",
        "Melanomas on opposite sides of the body are multiple primaries.",
    )
}

fn sixty_days(step: &'static str) -> Rule {
    common::days_apart(
        step,
        "Are there melanomas diagnosed more than 60 days apart?",
        "Melanomas diagnosed more than 60 days apart are multiple primaries.",
        60,
    )
}

pub fn melanoma_2007() -> RuleGroup {
    RuleGroup::new(
        well_known::MELANOMA_2007,
        "Melanoma 2007",
        vec![Applicability::years(2007, Some(2017), MALIGNANT)
            .sites(SITES)
            .histologies(&[(8720, 8780)])],
        vec![
            skin_site("M3"),
            both_sides("M4"),
            sixty_days("M5"),
            common::in_situ_after_invasive(
                "M6",
                "Is there an in situ melanoma following an invasive melanoma?",
                "An in situ melanoma following an invasive melanoma is a single primary.",
            ),
            common::histology_family_differs(
                "M7",
                "Are there tumors with ICD-O-3 histology codes that are different at the first, second or third number?",
                "Melanomas with histologies differing at the first three digits are multiple primaries.",
            ),
            common::catch_all(
                "M8",
                "Does not meet any of the above criteria?",
                "Melanomas that do not meet any of the above criteria are a single primary.",
                Verdict::Single,
            ),
        ],
    )
}

pub fn melanoma_2018() -> RuleGroup {
    let table = well_known::TABLE_MELANOMA_2018;
    RuleGroup::new(
        well_known::MELANOMA_2018,
        "2018 Cutaneous Melanoma",
        vec![Applicability::years(2018, None, MALIGNANT)
            .sites(SITES)
            .histologies(&[(8720, 8790)])],
        vec![
            skin_site("M3"),
            both_sides("M4"),
            sixty_days("M5"),
            common::different_subtypes(
                "M6",
                "Are there melanomas with two or more different subtypes in the melanoma table?",
                "Different melanoma subtypes are multiple primaries.",
                table,
            ),
            common::same_row(
                "M7",
                "Are there melanomas with ICD-O-3 histology codes on the same row of the melanoma table?",
                "Melanomas on the same row are a single primary.",
                table,
                &[],
            ),
            common::different_rows(
                "M8",
                "Are there melanomas with ICD-O-3 histology codes on different rows of the melanoma table?",
                "Melanomas on different rows are multiple primaries.",
                table,
                &[],
                Unmatched::PotentialMultiple,
                Unmatched::Continue,
            ),
            common::catch_all(
                "M9",
                "Does not meet any of the above criteria?",
                "Melanomas that do not meet any of the above criteria are a single primary.",
                Verdict::Single,
            ),
        ],
    )
}

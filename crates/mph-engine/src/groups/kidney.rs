//! Kidney groups.

use mph_types::well_known;

use super::common::{self, Unmatched, MALIGNANT};
use crate::group::{Applicability, CodeRanges, RuleGroup};
use crate::rule::{Rule, RuleResult, Verdict};

const SITES: CodeRanges = &[(649, 649)];
const WILMS: u16 = 8960;
const KIDNEY_2018_NOS: &[&str] = &["8000", "8010"];

fn wilms(step: &'static str) -> Rule {
    Rule::new(
        step,
        "Are there tumors that are Wilms tumors?",
        "Wilms tumors are a single primary.",
        |_, pair| RuleResult::when(pair.both(|t| t.histology_is(&[WILMS])), Verdict::Single),
    )
}

fn both_kidneys(step: &'static str) -> Rule {
    common::opposite_sides(
        step,
        "Are there tumors in both the right kidney and the left kidney?",
        "Tumors in both kidneys are multiple primaries.",
    )
}

pub fn kidney_2007() -> RuleGroup {
    RuleGroup::new(
        well_known::KIDNEY_2007,
        "Kidney 2007",
        vec![Applicability::years(2007, Some(2017), MALIGNANT)
            .sites(SITES)
            .solid_site_specific()],
        vec![
            wilms("M3"),
            both_kidneys("M4"),
            common::years_apart(
                "M5",
                "Are there tumors diagnosed more than three (3) years apart?",
                "Tumors diagnosed more than three years apart are multiple primaries.",
                3,
            ),
            common::histology_family_differs(
                "M6",
                "Are there tumors with ICD-O-3 histology codes that are different at the first, second or third number?",
                "Tumors with histologies differing at the first three digits are multiple primaries.",
            ),
            common::catch_all(
                "M7",
                "Does not meet any of the above criteria?",
                "Tumors that do not meet any of the above criteria are a single primary.",
                Verdict::Single,
            ),
        ],
    )
}

pub fn kidney_2018() -> RuleGroup {
    let table = well_known::TABLE_KIDNEY_2018;
    RuleGroup::new(
        well_known::KIDNEY_2018,
        "2018 Kidney",
        vec![Applicability::years(2018, None, MALIGNANT)
            .sites(SITES)
            .solid_site_specific()],
        vec![
            common::disease_free_years_apart(
                "M3",
                "Is there a subsequent tumor more than three (3) years after the patient was clinically disease-free?",
                "A tumor more than three years after the patient was disease-free is a multiple primary.",
                3,
            ),
            wilms("M4"),
            common::different_rows(
                "M5",
                "Are there tumors with ICD-O-3 histology codes on different rows of the kidney histology table?",
                "Tumors on different rows are multiple primaries.",
                table,
                KIDNEY_2018_NOS,
                Unmatched::PotentialMultiple,
                Unmatched::Continue,
            ),
            both_kidneys("M6"),
            common::different_subtypes(
                "M7",
                "Are there tumors with two or more different subtypes/variants in the kidney histology table?",
                "Different subtypes/variants of the same histology are multiple primaries.",
                table,
            ),
            common::invasive_after_in_situ(
                "M8",
                "Is there an invasive tumor following an in situ tumor more than 60 days after diagnosis?",
                "An invasive tumor more than 60 days after an in situ tumor is a multiple primary.",
                60,
            ),
            common::same_row(
                "M9",
                "Are there tumors with ICD-O-3 histology codes on the same row of the kidney histology table?",
                "Tumors on the same row are a single primary.",
                table,
                KIDNEY_2018_NOS,
            ),
            common::catch_all(
                "M10",
                "Does not meet any of the above criteria?",
                "Tumors that do not meet any of the above criteria are a single primary.",
                Verdict::Single,
            ),
        ],
    )
}

//! Renal pelvis, ureter, bladder and other urinary groups.

use mph_types::well_known;

use super::common::{self, Unmatched, MALIGNANT};
use crate::group::{Applicability, CodeRanges, RuleGroup};
use crate::rule::{Rule, RuleResult, Verdict};
use crate::validate::ParsedTumor;

const SITES: CodeRanges = &[(659, 659), (669, 669), (670, 679), (680, 689)];
const URINARY_2018_NOS: &[&str] = &["8000", "8010"];

fn is_upper_tract(tumor: &ParsedTumor) -> bool {
    tumor.site_in(659, 659) || tumor.site_in(669, 669)
}

/// Multiple primaries for tumors in both renal pelves or both ureters.
fn both_upper_tracts(step: &'static str) -> Rule {
    Rule::new(
        step,
        "Are there tumors of the renal pelvis or ureter on both the right side and the left side?",
        "Tumors of both renal pelves or both ureters are multiple primaries.",
        |_, pair| {
            let multiple = pair.first.site == pair.second.site
                && pair.both(is_upper_tract)
                && pair.first.laterality.is_opposite(pair.second.laterality);
            RuleResult::when(multiple, Verdict::Multiple)
        },
    )
}

pub fn urinary_2007() -> RuleGroup {
    RuleGroup::new(
        well_known::URINARY_2007,
        "Urinary 2007",
        vec![Applicability::years(2007, Some(2017), MALIGNANT)
            .sites(SITES)
            .solid_site_specific()],
        vec![
            Rule::new(
                "M3",
                "Is there a papillary urothelial carcinoma and a urothelial carcinoma?",
                "Papillary urothelial and urothelial carcinoma are a single primary.",
                |_, pair| {
                    let mixed = pair
                        .split(|t| t.histology_is(&[8130]), |t| t.histology_is(&[8120]))
                        .is_some();
                    RuleResult::when(mixed, Verdict::Single)
                },
            ),
            common::years_apart(
                "M4",
                "Are there tumors diagnosed more than three (3) years apart?",
                "Tumors diagnosed more than three years apart are multiple primaries.",
                3,
            ),
            both_upper_tracts("M5"),
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

pub fn urinary_2018() -> RuleGroup {
    let table = well_known::TABLE_URINARY_2018;
    RuleGroup::new(
        well_known::URINARY_2018,
        "2018 Urinary Sites",
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
            both_upper_tracts("M4"),
            common::invasive_after_in_situ(
                "M5",
                "Is there an invasive tumor following an in situ tumor more than 60 days after diagnosis?",
                "An invasive tumor more than 60 days after an in situ tumor is a multiple primary.",
                60,
            ),
            common::different_subtypes(
                "M6",
                "Are there tumors with two or more different subtypes/variants in the urinary histology table?",
                "Different subtypes/variants of the same histology are multiple primaries.",
                table,
            ),
            common::same_row(
                "M7",
                "Are there tumors with ICD-O-3 histology codes on the same row of the urinary histology table?",
                "Tumors on the same row are a single primary.",
                table,
                URINARY_2018_NOS,
            ),
            common::different_rows(
                "M8",
                "Are there tumors with ICD-O-3 histology codes on different rows of the urinary histology table?",
                "Tumors on different rows are multiple primaries.",
                table,
                URINARY_2018_NOS,
                Unmatched::PotentialMultiple,
                Unmatched::Continue,
            ),
            common::catch_all(
                "M9",
                "Does not meet any of the above criteria?",
                "Tumors that do not meet any of the above criteria are a single primary.",
                Verdict::Single,
            ),
        ],
    )
}

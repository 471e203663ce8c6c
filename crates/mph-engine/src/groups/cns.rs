//! Brain and central nervous system groups.

use mph_types::well_known;

use super::common::{self, Unmatched, INVASIVE, NON_MALIGNANT};
use crate::group::{Applicability, RuleGroup};
use crate::rule::{Rule, RuleResult, Verdict};
use crate::temporal::DateComparison;
use crate::validate::ParsedTumor;

const NONMALIGNANT_CNS_2018_NOS: &[&str] = &["8000"];
const MALIGNANT_CNS_2018_NOS: &[&str] = &["8000", "8001"];

fn is_glioblastoma(tumor: &ParsedTumor) -> bool {
    tumor.histology_in(9440, 9442)
}

fn is_lower_grade_glial(tumor: &ParsedTumor) -> bool {
    tumor.histology_in(9380, 9460) && !is_glioblastoma(tumor)
}

/// Single primary for a glioblastoma following a lower grade glial tumor.
fn glioblastoma_after_glial(step: &'static str) -> Rule {
    Rule::new(
        step,
        "Is there a glioblastoma following a glial tumor?",
        "A glioblastoma following a glial tumor is a single primary.",
        |_, pair| {
            let Some((glioblastoma, glial)) = pair.split(is_glioblastoma, is_lower_grade_glial) else {
                return RuleResult::Continue;
            };
            match pair.compare_dates() {
                DateComparison::Unknown => RuleResult::Potential(
                    Verdict::Single,
                    "Unable to verify that the glioblastoma followed the glial tumor".to_string(),
                ),
                _ => RuleResult::when(pair.is_later(glial, glioblastoma), Verdict::Single),
            }
        },
    )
}

fn topography(step: &'static str) -> Rule {
    common::topography_differs(
        step,
        "Are there tumors in sites with ICD-O-3 topography codes that are different at the second (Cx), third (Cxx) and/or fourth (Cxxx) characters?",
        "Tumors in different CNS sites are multiple primaries.",
    )
}

fn both_sides(step: &'static str) -> Rule {
    common::opposite_sides(
        step,
        "Are there tumors on both the right side and the left side of a paired site?",
        "Tumors on both sides of a paired CNS site are multiple primaries.",
    )
}

fn family(step: &'static str) -> Rule {
    common::histology_family_differs(
        step,
        "Are there tumors with ICD-O-3 histology codes that are different at the first, second or third number?",
        "Tumors with histologies differing at the first three digits are multiple primaries.",
    )
}

fn catch_all(step: &'static str) -> Rule {
    common::catch_all(
        step,
        "Does not meet any of the above criteria?",
        "Tumors that do not meet any of the above criteria are a single primary.",
        Verdict::Single,
    )
}

pub fn benign_brain_2007() -> RuleGroup {
    let table = well_known::TABLE_BENIGN_BRAIN_2007;
    RuleGroup::new(
        well_known::BENIGN_BRAIN_2007,
        "Benign Brain 2007",
        vec![Applicability::years(2007, Some(2017), NON_MALIGNANT)
            .sites(well_known::CNS_SITES)
            .solid()],
        vec![
            topography("M3"),
            both_sides("M4"),
            common::same_row(
                "M5",
                "Are there tumors with ICD-O-3 histology codes on the same branch of the benign brain histology chart?",
                "Tumors on the same branch are a single primary.",
                table,
                &[],
            ),
            common::different_rows(
                "M6",
                "Are there tumors with ICD-O-3 histology codes on different branches of the benign brain histology chart?",
                "Tumors on different branches are multiple primaries.",
                table,
                &[],
                Unmatched::Continue,
                Unmatched::Continue,
            ),
            family("M7"),
            catch_all("M8"),
        ],
    )
}

pub fn malignant_brain_2007() -> RuleGroup {
    let table = well_known::TABLE_MALIGNANT_BRAIN_2007;
    RuleGroup::new(
        well_known::MALIGNANT_BRAIN_2007,
        "Malignant Brain 2007",
        vec![Applicability::years(2007, Some(2017), INVASIVE)
            .sites(well_known::CNS_SITES)
            .solid()],
        vec![
            glioblastoma_after_glial("M3"),
            topography("M4"),
            both_sides("M5"),
            common::same_row(
                "M6",
                "Are there tumors with ICD-O-3 histology codes on the same branch of the malignant brain histology chart?",
                "Tumors on the same branch are a single primary.",
                table,
                &[],
            ),
            common::different_rows(
                "M7",
                "Are there tumors with ICD-O-3 histology codes on different branches of the malignant brain histology chart?",
                "Tumors on different branches are multiple primaries.",
                table,
                &[],
                Unmatched::Continue,
                Unmatched::Continue,
            ),
            family("M8"),
            catch_all("M9"),
        ],
    )
}

pub fn nonmalignant_cns_2018() -> RuleGroup {
    let table = well_known::TABLE_NONMALIGNANT_CNS_2018;
    RuleGroup::new(
        well_known::NONMALIGNANT_CNS_2018,
        "2018 Non-Malignant CNS Tumors",
        vec![Applicability::years(2018, None, NON_MALIGNANT)
            .sites(well_known::CNS_SITES)
            .solid()],
        vec![
            topography("M3"),
            both_sides("M4"),
            common::different_subtypes(
                "M5",
                "Are there tumors with two or more different subtypes/variants in the non-malignant CNS histology table?",
                "Different subtypes/variants of the same histology are multiple primaries.",
                table,
            ),
            common::nos_vs_subtype(
                "M6",
                "Is there a NOS histology and a more specific histology of the same row?",
                "A NOS and a subtype/variant of the NOS are a single primary.",
                table,
            ),
            common::same_row(
                "M7",
                "Are there tumors with ICD-O-3 histology codes on the same row of the non-malignant CNS histology table?",
                "Tumors on the same row are a single primary.",
                table,
                NONMALIGNANT_CNS_2018_NOS,
            ),
            common::different_rows(
                "M8",
                "Are there tumors with ICD-O-3 histology codes on different rows of the non-malignant CNS histology table?",
                "Tumors on different rows are multiple primaries.",
                table,
                NONMALIGNANT_CNS_2018_NOS,
                Unmatched::PotentialMultiple,
                Unmatched::Continue,
            ),
            catch_all("M9"),
        ],
    )
}

pub fn malignant_cns_2018() -> RuleGroup {
    let table = well_known::TABLE_MALIGNANT_CNS_2018;
    RuleGroup::new(
        well_known::MALIGNANT_CNS_2018,
        "2018 Malignant CNS and Peripheral Nerves",
        vec![Applicability::years(2018, None, INVASIVE)
            .sites(well_known::CNS_SITES)
            .solid()],
        vec![
            glioblastoma_after_glial("M3"),
            topography("M4"),
            both_sides("M5"),
            common::different_subtypes(
                "M6",
                "Are there tumors with two or more different subtypes/variants in the malignant CNS histology table?",
                "Different subtypes/variants of the same histology are multiple primaries.",
                table,
            ),
            common::nos_vs_subtype(
                "M7",
                "Is there a NOS histology and a more specific histology of the same row?",
                "A NOS and a subtype/variant of the NOS are a single primary.",
                table,
            ),
            common::same_row(
                "M8",
                "Are there tumors with ICD-O-3 histology codes on the same row of the malignant CNS histology table?",
                "Tumors on the same row are a single primary.",
                table,
                MALIGNANT_CNS_2018_NOS,
            ),
            common::different_rows(
                "M9",
                "Are there tumors with ICD-O-3 histology codes on different rows of the malignant CNS histology table?",
                "Tumors on different rows are multiple primaries.",
                table,
                MALIGNANT_CNS_2018_NOS,
                Unmatched::PotentialMultiple,
                Unmatched::Undetermined,
            ),
            catch_all("M10"),
        ],
    )
}

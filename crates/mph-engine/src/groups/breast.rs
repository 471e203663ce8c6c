//! Breast groups.

use mph_types::well_known;

use super::common::{self, Unmatched, MALIGNANT};
use crate::group::{Applicability, CodeRanges, RuleGroup};
use crate::rule::{Rule, RuleResult, Verdict};
use crate::validate::ParsedTumor;

const SITES: CodeRanges = &[(500, 509)];
const INFLAMMATORY: u16 = 8530;
const BREAST_2018_NOS: &[&str] = &["8000", "8010"];
const BREAST_2023_NOS: &[&str] = &["8000", "8001", "8010"];

fn is_paget(tumor: &ParsedTumor) -> bool {
    tumor.histology_in(8540, 8543)
}

fn is_inflammatory(tumor: &ParsedTumor) -> bool {
    tumor.histology_is(&[INFLAMMATORY])
}

fn not_paget(tumor: &ParsedTumor) -> bool {
    !is_paget(tumor)
}

fn on_opposite_sides(first: &ParsedTumor, second: &ParsedTumor) -> bool {
    first.laterality.is_opposite(second.laterality)
}

fn inflammatory_2007(step: &'static str) -> Rule {
    Rule::new(
        step,
        "Is there inflammatory carcinoma in one or both breasts?",
        "Inflammatory carcinoma in one or both breasts is a single primary.",
        |_, pair| RuleResult::when(pair.either(is_inflammatory), Verdict::Single),
    )
}

fn inflammatory(step: &'static str) -> Rule {
    Rule::new(
        step,
        "Is there inflammatory carcinoma in both breasts, or inflammatory carcinoma and another carcinoma in the same breast?",
        "Inflammatory carcinoma in both breasts or with another carcinoma in the same breast is a single primary.",
        |_, pair| {
            let single = pair.both(is_inflammatory)
                || (pair.either(is_inflammatory) && !on_opposite_sides(&pair.first, &pair.second));
            RuleResult::when(single, Verdict::Single)
        },
    )
}

fn paget_same_breast(step: &'static str) -> Rule {
    Rule::new(
        step,
        "Is there Paget disease and an underlying tumor in the same breast?",
        "Paget disease with an underlying tumor in the same breast is a single primary.",
        |_, pair| {
            let single = pair.split(is_paget, not_paget).is_some() && !on_opposite_sides(&pair.first, &pair.second);
            RuleResult::when(single, Verdict::Single)
        },
    )
}

fn paget_other_breast(step: &'static str) -> Rule {
    Rule::new(
        step,
        "Is there Paget disease in one breast and a tumor in the other breast?",
        "Paget disease and a tumor in the other breast are multiple primaries.",
        |_, pair| {
            let multiple = pair.either(is_paget) && on_opposite_sides(&pair.first, &pair.second);
            RuleResult::when(multiple, Verdict::Multiple)
        },
    )
}

/// Lobular and duct carcinoma in the same breast, with the codes each
/// rule book recognizes.
fn lobular_and_duct(
    step: &'static str,
    lobular: &'static [u16],
    duct: &'static [u16],
) -> Rule {
    Rule::new(
        step,
        "Are there tumors that are lobular and intraductal or duct carcinoma?",
        "Lobular and duct carcinoma in the same breast are a single primary.",
        move |_, pair| {
            let mixed = pair
                .split(|t| t.histology_is(lobular), |t| t.histology_is(duct))
                .is_some();
            RuleResult::when(mixed && !on_opposite_sides(&pair.first, &pair.second), Verdict::Single)
        },
    )
}

fn both_breasts(step: &'static str) -> Rule {
    common::opposite_sides(
        step,
        "Are there tumors on both sides (right and left breast)?",
        "Tumors in both breasts are multiple primaries.",
    )
}

fn invasive_after_in_situ(step: &'static str) -> Rule {
    common::invasive_after_in_situ(
        step,
        "Is there an invasive tumor following an in situ tumor more than 60 days after diagnosis?",
        "An invasive tumor more than 60 days after an in situ tumor is a multiple primary.",
        60,
    )
}

fn in_situ_after_invasive(step: &'static str) -> Rule {
    common::in_situ_after_invasive(
        step,
        "Is there an in situ tumor following an invasive tumor?",
        "An in situ tumor following an invasive tumor is a single primary.",
    )
}

fn disease_free(step: &'static str) -> Rule {
    common::disease_free_years_apart(
        step,
        "Is there a subsequent tumor more than five (5) years after the patient was clinically disease-free?",
        "A tumor more than five years after the patient was disease-free is a multiple primary.",
        5,
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

pub fn breast_2007() -> RuleGroup {
    RuleGroup::new(
        well_known::BREAST_2007,
        "Breast 2007",
        vec![Applicability::years(2007, Some(2017), MALIGNANT)
            .sites(SITES)
            .solid_site_specific()],
        vec![
            inflammatory_2007("M3"),
            both_breasts("M4"),
            common::years_apart(
                "M5",
                "Are there tumors diagnosed more than five (5) years apart?",
                "Tumors diagnosed more than five years apart are multiple primaries.",
                5,
            ),
            lobular_and_duct("M6", &[8520], &[8500, 8522]),
            invasive_after_in_situ("M7"),
            in_situ_after_invasive("M8"),
            common::histology_family_differs(
                "M9",
                "Are there tumors with ICD-O-3 histology codes that are different at the first, second or third number?",
                "Tumors with histologies differing at the first three digits are multiple primaries.",
            ),
            catch_all("M10"),
        ],
    )
}

pub fn breast_2018() -> RuleGroup {
    let table = well_known::TABLE_BREAST_2018;
    RuleGroup::new(
        well_known::BREAST_2018,
        "2018 Breast",
        vec![Applicability::years(2018, Some(2022), MALIGNANT)
            .sites(SITES)
            .solid_site_specific()],
        vec![
            disease_free("M3"),
            paget_same_breast("M4"),
            paget_other_breast("M5"),
            inflammatory("M6"),
            both_breasts("M7"),
            invasive_after_in_situ("M8"),
            lobular_and_duct("M9", &[8520], &[8500]),
            common::same_row(
                "M10",
                "Are there tumors with ICD-O-3 histology codes on the same row of the breast histology table?",
                "Tumors on the same row are a single primary.",
                table,
                BREAST_2018_NOS,
            ),
            common::different_rows(
                "M11",
                "Are there tumors with ICD-O-3 histology codes on different rows of the breast histology table?",
                "Tumors on different rows are multiple primaries.",
                table,
                BREAST_2018_NOS,
                Unmatched::PotentialMultiple,
                Unmatched::Continue,
            ),
            in_situ_after_invasive("M12"),
            catch_all("M13"),
        ],
    )
}

pub fn breast_2023() -> RuleGroup {
    let table = well_known::TABLE_BREAST_2023;
    RuleGroup::new(
        well_known::BREAST_2023,
        "2023 Breast",
        vec![Applicability::years(2023, None, MALIGNANT)
            .sites(SITES)
            .solid_site_specific()],
        vec![
            disease_free("M3"),
            paget_same_breast("M4"),
            paget_other_breast("M5"),
            inflammatory("M6"),
            both_breasts("M7"),
            invasive_after_in_situ("M8"),
            lobular_and_duct(
                "M9",
                &[8520, 8521, 8522, 8524],
                &[8500, 8501, 8502, 8507, 8508, 8509],
            ),
            common::nos_vs_subtype(
                "M10",
                "Is there a NOS histology and a more specific histology of the same row?",
                "A NOS and a subtype/variant of the NOS are a single primary.",
                table,
            ),
            common::different_subtypes(
                "M11",
                "Are there tumors with two or more different subtypes/variants in the breast histology table?",
                "Different subtypes/variants of the same histology are multiple primaries.",
                table,
            ),
            common::same_row(
                "M12",
                "Are there tumors with ICD-O-3 histology codes on the same row of the breast histology table?",
                "Tumors on the same row are a single primary.",
                table,
                BREAST_2023_NOS,
            ),
            common::different_rows(
                "M13",
                "Are there tumors with ICD-O-3 histology codes on different rows of the breast histology table?",
                "Tumors on different rows are multiple primaries.",
                table,
                BREAST_2023_NOS,
                Unmatched::PotentialMultiple,
                Unmatched::Continue,
            ),
            catch_all("M14"),
        ],
    )
}

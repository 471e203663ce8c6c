//! Colon and rectum groups.

use mph_types::well_known;

use super::common::{self, Unmatched, MALIGNANT};
use crate::group::{Applicability, CodeRanges, RuleGroup};
use crate::rule::{Rule, RuleResult, Verdict};
use crate::validate::ParsedTumor;

const COLON: CodeRanges = &[(180, 189)];
const COLON_RECTUM: CodeRanges = &[(180, 189), (199, 199), (209, 209)];
const COLON_2018_NOS: &[&str] = &["8000", "8010"];

/// Adenocarcinoma in a polyp.
const POLYP_HISTOLOGIES: &[u16] = &[8210, 8261, 8263];
/// Familial adenomatous polyposis.
const FAP_HISTOLOGIES: &[u16] = &[8220, 8221];

fn is_polyp(tumor: &ParsedTumor) -> bool {
    tumor.histology_is(POLYP_HISTOLOGIES)
}

fn is_frank_adenocarcinoma(tumor: &ParsedTumor) -> bool {
    tumor.histology_is(&[8140])
}

/// Single primary for an adenocarcinoma in a polyp and a frank
/// adenocarcinoma in the same segment.
pub(super) fn polyp_and_adenocarcinoma(step: &'static str) -> Rule {
    Rule::new(
        step,
        "Is there an adenocarcinoma in adenomatous polyp and a frank adenocarcinoma in the same segment?",
        "An adenocarcinoma in a polyp and a frank adenocarcinoma in the same segment are a single primary.",
        |_, pair| {
            let found = pair.first.site == pair.second.site
                && pair.split(is_polyp, is_frank_adenocarcinoma).is_some();
            RuleResult::when(found, Verdict::Single)
        },
    )
}

/// Single primary when either tumor is familial adenomatous polyposis.
pub(super) fn familial_polyposis(step: &'static str) -> Rule {
    Rule::new(
        step,
        "Is there a tumor diagnosed as familial adenomatous polyposis (FAP)?",
        "Familial adenomatous polyposis with a tumor in the colon or rectum is a single primary.",
        |_, pair| RuleResult::when(pair.either(|t| t.histology_is(FAP_HISTOLOGIES)), Verdict::Single),
    )
}

pub fn colon_2007() -> RuleGroup {
    RuleGroup::new(
        well_known::COLON_2007,
        "Colon 2007",
        vec![Applicability::years(2007, Some(2017), MALIGNANT)
            .sites(COLON)
            .solid_site_specific()],
        vec![
            polyp_and_adenocarcinoma("M3"),
            common::topography_differs(
                "M4",
                "Are there tumors in sites with ICD-O-3 topography codes that are different at the fourth character (C18x)?",
                "Tumors in different segments of the colon are multiple primaries.",
            ),
            common::years_apart(
                "M5",
                "Are there tumors diagnosed more than one (1) year apart?",
                "Tumors diagnosed more than one year apart are multiple primaries.",
                1,
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

pub fn colon_2018() -> RuleGroup {
    let table = well_known::TABLE_COLON_2018;
    RuleGroup::new(
        well_known::COLON_2018,
        "2018 Colon and Rectum",
        vec![Applicability::years(2018, None, MALIGNANT)
            .sites(COLON_RECTUM)
            .solid_site_specific()],
        vec![
            familial_polyposis("M3"),
            common::topography_differs(
                "M4",
                "Are there tumors in sites with ICD-O-3 topography codes that are different at the second (Cxx), third (Cxx) or fourth (C18x) character?",
                "Tumors in different segments of the colon or rectum are multiple primaries.",
            ),
            common::disease_free_years_apart(
                "M5",
                "Is there a subsequent tumor more than one (1) year after the patient was clinically disease-free?",
                "A tumor more than one year after the patient was disease-free is a multiple primary.",
                1,
            ),
            polyp_and_adenocarcinoma("M6"),
            common::invasive_after_in_situ(
                "M7",
                "Is there an invasive tumor following an in situ tumor more than 60 days after diagnosis?",
                "An invasive tumor more than 60 days after an in situ tumor is a multiple primary.",
                60,
            ),
            common::different_subtypes(
                "M8",
                "Are there tumors with two or more different subtypes/variants in the colon histology table?",
                "Different subtypes/variants of the same histology are multiple primaries.",
                table,
            ),
            common::same_row(
                "M9",
                "Are there tumors with ICD-O-3 histology codes on the same row of the colon histology table?",
                "Tumors on the same row are a single primary.",
                table,
                COLON_2018_NOS,
            ),
            common::different_rows(
                "M10",
                "Are there tumors with ICD-O-3 histology codes on different rows of the colon histology table?",
                "Tumors on different rows are multiple primaries.",
                table,
                COLON_2018_NOS,
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

//! Lung groups.

use mph_types::well_known;

use super::common::{self, Unmatched, MALIGNANT};
use crate::group::{Applicability, CodeRanges, RuleGroup};
use crate::histology::{self, RowMatch};
use crate::rule::{Rule, RuleResult, Verdict};

const SITES: CodeRanges = &[(340, 349)];
const LUNG_2018_NOS: &[&str] = &["8000", "8010"];

pub fn lung_2007() -> RuleGroup {
    RuleGroup::new(
        well_known::LUNG_2007,
        "Lung 2007",
        vec![Applicability::years(2007, Some(2017), MALIGNANT)
            .sites(SITES)
            .solid_site_specific()],
        vec![
            common::years_apart(
                "M3",
                "Are there tumors diagnosed more than three (3) years apart?",
                "Tumors diagnosed more than three years apart are multiple primaries.",
                3,
            ),
            common::invasive_after_in_situ(
                "M4",
                "Is there an invasive tumor following an in situ tumor more than 60 days after diagnosis?",
                "An invasive tumor more than 60 days after an in situ tumor is a multiple primary.",
                60,
            ),
            Rule::new(
                "M5",
                "Are there tumors in both lungs with ICD-O-3 histology codes that are different at the first, second or third number?",
                "Tumors of different histologies in opposite lungs are multiple primaries.",
                |_, pair| {
                    let (a, b) = (&pair.first, &pair.second);
                    RuleResult::when(
                        a.laterality.is_opposite(b.laterality) && a.histology.family() != b.histology.family(),
                        Verdict::Multiple,
                    )
                },
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

pub fn lung_2018() -> RuleGroup {
    let table = well_known::TABLE_LUNG_2018;
    RuleGroup::new(
        well_known::LUNG_2018,
        "2018 Lung",
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
            common::invasive_after_in_situ(
                "M4",
                "Is there an invasive tumor following an in situ tumor more than 60 days after diagnosis?",
                "An invasive tumor more than 60 days after an in situ tumor is a multiple primary.",
                60,
            ),
            common::different_subtypes(
                "M5",
                "Are there tumors with two or more different subtypes/variants in the lung histology table?",
                "Different subtypes/variants of the same histology are multiple primaries.",
                table,
            ),
            Rule::new(
                "M6",
                "Are there tumors in both lungs on different rows of the lung histology table?",
                "Tumors on different rows in opposite lungs are multiple primaries.",
                move |ctx, pair| {
                    if !pair.first.laterality.is_opposite(pair.second.laterality) {
                        return RuleResult::Continue;
                    }
                    common::with_table(ctx, table, |t| {
                        let found = histology::same_row(
                            t,
                            pair.first.morphology(),
                            pair.second.morphology(),
                            ctx.matching(),
                            LUNG_2018_NOS,
                        );
                        RuleResult::when(found == RowMatch::Different, Verdict::Multiple)
                    })
                },
            )
            .uses_table(table),
            common::same_row(
                "M7",
                "Are there tumors with ICD-O-3 histology codes on the same row of the lung histology table?",
                "Tumors on the same row are a single primary.",
                table,
                LUNG_2018_NOS,
            ),
            common::different_rows(
                "M8",
                "Are there tumors with ICD-O-3 histology codes on different rows of the lung histology table?",
                "Tumors on different rows are multiple primaries.",
                table,
                LUNG_2018_NOS,
                Unmatched::PotentialMultiple,
                Unmatched::Undetermined,
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

//! Hematopoietic and lymphoid neoplasm groups.

use mph_types::{well_known, Behavior, TxStatus};

use super::common::{self, INVASIVE};
use crate::group::{Applicability, RuleGroup};
use crate::hemato as resolver;
use crate::histology::{self, RowMatch};
use crate::rule::{Rule, RuleContext, RuleResult, TumorPair, Verdict};
use crate::temporal::Separation;

/// Days within which a transformation is the same disease process.
const TRANSFORMATION_DAYS: i64 = 21;

pub fn hemato_pre2001() -> RuleGroup {
    RuleGroup::new(
        well_known::HEMATO_PRE_2001,
        "Hematopoietic Pre-2001",
        vec![
            Applicability::years(1, Some(2000), INVASIVE).histologies(&[(9590, 9989)]),
            Applicability::years(1, Some(2000), &[Behavior::Borderline]).histologies(&[(9950, 9989)]),
        ],
        vec![
            Rule::new(
                "M1",
                "Are both ICD-O-2 histologies in the same row of the ICD-O-2 hematopoietic table?",
                "ICD-O-2 histologies in the same hematopoietic group are a single primary.",
                |ctx, pair| {
                    let (Some(a), Some(b)) = (pair.first.morphology_icdo2(), pair.second.morphology_icdo2()) else {
                        return RuleResult::Continue;
                    };
                    common::with_table(ctx, well_known::TABLE_HEMATO_ICDO2, |t| {
                        RuleResult::when(
                            histology::same_row(t, a, b, ctx.matching(), &[]) == RowMatch::Same,
                            Verdict::Single,
                        )
                    })
                },
            )
            .uses_table(well_known::TABLE_HEMATO_ICDO2),
            common::catch_all(
                "M2",
                "Does not meet any of the above criteria?",
                "ICD-O-2 histologies in different hematopoietic groups are multiple primaries.",
                Verdict::Multiple,
            ),
        ],
    )
    .requiring_icdo2()
}

pub fn hemato_2001_2009() -> RuleGroup {
    RuleGroup::new(
        well_known::HEMATO_2001_2009,
        "Hematopoietic 2001-2009",
        vec![Applicability::years(2001, Some(2009), INVASIVE).histologies(&[(9590, 9989)])],
        vec![
            common::identical_histology(
                "M1",
                "Do both tumors have the same histology?",
                "Identical hematopoietic histologies are a single primary.",
            ),
            same_primary_rule(
                "M2",
                "Are the histologies listed as the same primary in the hematopoietic database?",
            ),
            common::catch_all(
                "M3",
                "Does not meet any of the above criteria?",
                "Hematopoietic neoplasms not listed as the same primary are multiple primaries.",
                Verdict::Multiple,
            ),
        ],
    )
}

pub fn hemato_2010() -> RuleGroup {
    RuleGroup::new(
        well_known::HEMATO_2010,
        "Hematopoietic 2010+",
        vec![Applicability::years(2010, None, INVASIVE).histologies(&[well_known::HEMATO_HISTOLOGY])],
        vec![
            common::identical_histology(
                "M1",
                "Do both tumors have the same histology?",
                "Identical hematopoietic histologies are a single primary.",
            ),
            Rule::new(
                "M2",
                "Is there a chronic and an acute neoplasm diagnosed within 21 days of each other?",
                "A chronic and an acute neoplasm diagnosed within 21 days are a single primary.",
                |ctx, pair| {
                    if !is_transformation(ctx, pair) {
                        return RuleResult::Continue;
                    }
                    match pair.days_apart(TRANSFORMATION_DAYS) {
                        Separation::Within => RuleResult::SINGLE,
                        Separation::Apart => RuleResult::Continue,
                        Separation::Unknown => RuleResult::Potential(
                            Verdict::Single,
                            "Unable to verify whether the transformation occurred within 21 days".to_string(),
                        ),
                    }
                },
            ),
            Rule::new(
                "M3",
                "Is there a chronic neoplasm followed more than 21 days later by an acute neoplasm, or after treatment?",
                "An acute neoplasm arising more than 21 days after, or after treatment of, a chronic neoplasm is a multiple primary.",
                |ctx, pair| {
                    let Some((earlier, later)) = pair.ordered() else {
                        return RuleResult::Continue;
                    };
                    let transforms = resolver::is_chronic_to_acute_transformation(
                        ctx.hemato(),
                        earlier.histology_code(),
                        later.histology_code(),
                        earlier.year(),
                        later.year(),
                    );
                    if !transforms {
                        return RuleResult::Continue;
                    }
                    match pair.days_apart(TRANSFORMATION_DAYS) {
                        Separation::Apart => RuleResult::MULTIPLE,
                        _ if earlier.tx_status == TxStatus::Treated => RuleResult::MULTIPLE,
                        Separation::Within => RuleResult::Continue,
                        Separation::Unknown => RuleResult::Potential(
                            Verdict::Multiple,
                            "Unable to verify whether the acute neoplasm arose more than 21 days after the chronic neoplasm"
                                .to_string(),
                        ),
                    }
                },
            ),
            Rule::new(
                "M4",
                "Is there an acute neoplasm followed by a chronic neoplasm?",
                "A chronic neoplasm following an acute neoplasm is a multiple primary.",
                |ctx, pair| {
                    let reverted = pair.ordered().is_some_and(|(earlier, later)| {
                        resolver::is_acute_to_chronic_transformation(
                            ctx.hemato(),
                            earlier.histology_code(),
                            later.histology_code(),
                            earlier.year(),
                            later.year(),
                        )
                    });
                    RuleResult::when(reverted, Verdict::Multiple)
                },
            ),
            same_primary_rule(
                "M5",
                "Are the histologies listed as the same primary in the hematopoietic database?",
            ),
            common::catch_all(
                "M6",
                "Does not meet any of the above criteria?",
                "Hematopoietic neoplasms not listed as the same primary are multiple primaries.",
                Verdict::Multiple,
            ),
        ],
    )
}

fn same_primary_rule(step: &'static str, question: &'static str) -> Rule {
    Rule::new(
        step,
        question,
        "Histologies listed as the same primary are a single primary.",
        |ctx, pair| {
            RuleResult::when(
                resolver::is_same_primary(
                    ctx.hemato(),
                    pair.first.histology_code(),
                    pair.second.histology_code(),
                    pair.first.year(),
                    pair.second.year(),
                ),
                Verdict::Single,
            )
        },
    )
}

/// Returns true if either histology transforms to or from the other.
fn is_transformation(ctx: &RuleContext<'_>, pair: &TumorPair) -> bool {
    let (a, b) = (&pair.first, &pair.second);
    let data = ctx.hemato();
    let (h1, h2, y1, y2) = (a.histology_code(), b.histology_code(), a.year(), b.year());

    resolver::is_chronic_to_acute_transformation(data, h1, h2, y1, y2)
        || resolver::is_chronic_to_acute_transformation(data, h2, h1, y2, y1)
        || resolver::is_acute_to_chronic_transformation(data, h1, h2, y1, y2)
        || resolver::is_acute_to_chronic_transformation(data, h2, h1, y2, y1)
}

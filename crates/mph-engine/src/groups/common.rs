//! Rule builders shared by several groups.
//!
//! Each builder returns a fresh [`Rule`]; groups own their rules and only
//! share the construction code.

use mph_loader::HistologyTable;
use mph_types::Behavior;

use crate::histology::{self, RowMatch};
use crate::rule::{Rule, RuleContext, RuleResult, TumorPair, Verdict};
use crate::temporal::Separation;
use crate::validate::ParsedTumor;

/// In situ and malignant.
pub const MALIGNANT: &[Behavior] = &[Behavior::InSitu, Behavior::Malignant];
/// Benign and borderline.
pub const NON_MALIGNANT: &[Behavior] = &[Behavior::Benign, Behavior::Borderline];
/// Malignant only.
pub const INVASIVE: &[Behavior] = &[Behavior::Malignant];

/// What a table rule does with histologies missing from its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmatched {
    /// Move on to the next rule.
    Continue,
    /// Remember a tentative multiple-primaries answer.
    PotentialMultiple,
    /// Stop with a questionable outcome.
    Undetermined,
}

impl Unmatched {
    fn result(self, table: &str) -> RuleResult {
        match self {
            Self::Continue => RuleResult::Continue,
            Self::PotentialMultiple => RuleResult::Potential(
                Verdict::Multiple,
                format!("One histology is not listed in table {table}"),
            ),
            Self::Undetermined => {
                RuleResult::Undetermined(format!("Neither histology is listed in table {table}"))
            }
        }
    }
}

/// Runs `f` against a loaded table.
pub fn with_table(
    ctx: &RuleContext<'_>,
    id: &str,
    f: impl FnOnce(&HistologyTable) -> RuleResult,
) -> RuleResult {
    match ctx.table(id) {
        Some(table) => f(table),
        None => RuleResult::Undetermined(format!("Table {id} is not loaded")),
    }
}

fn is_in_situ(tumor: &ParsedTumor) -> bool {
    tumor.behavior.is_in_situ()
}

fn is_invasive(tumor: &ParsedTumor) -> bool {
    tumor.behavior.is_invasive()
}

/// Resolves to `verdict` unconditionally.
pub fn catch_all(step: &'static str, question: &'static str, reason: &'static str, verdict: Verdict) -> Rule {
    Rule::new(step, question, reason, move |_, _| RuleResult::Resolved(verdict))
}

/// Multiple primaries when the diagnoses are more than `years` apart.
///
/// An undecidable gap is a tentative multiple-primaries answer.
pub fn years_apart(step: &'static str, question: &'static str, reason: &'static str, years: u32) -> Rule {
    Rule::new(step, question, reason, move |_, pair| match pair.years_apart(years) {
        Separation::Apart => RuleResult::MULTIPLE,
        Separation::Within => RuleResult::Continue,
        Separation::Unknown => RuleResult::Potential(
            Verdict::Multiple,
            format!("Unable to verify whether the diagnoses are more than {years} years apart"),
        ),
    })
}

/// Multiple primaries when the diagnoses are more than `days` apart.
pub fn days_apart(step: &'static str, question: &'static str, reason: &'static str, days: i64) -> Rule {
    Rule::new(step, question, reason, move |_, pair| match pair.days_apart(days) {
        Separation::Apart => RuleResult::MULTIPLE,
        Separation::Within => RuleResult::Continue,
        Separation::Unknown => RuleResult::Potential(
            Verdict::Multiple,
            format!("Unable to verify whether the diagnoses are more than {days} days apart"),
        ),
    })
}

/// Multiple primaries when the later tumor occurs more than `years` after
/// the patient was clinically disease-free.
///
/// An earlier tumor that was never treated does not make the patient
/// disease-free.
pub fn disease_free_years_apart(
    step: &'static str,
    question: &'static str,
    reason: &'static str,
    years: u32,
) -> Rule {
    Rule::new(step, question, reason, move |_, pair| match pair.years_apart(years) {
        Separation::Apart => {
            let untreated = pair
                .ordered()
                .is_some_and(|(earlier, _)| earlier.tx_status.was_never_treated());
            RuleResult::when(!untreated, Verdict::Multiple)
        }
        Separation::Within => RuleResult::Continue,
        Separation::Unknown => RuleResult::Potential(
            Verdict::Multiple,
            format!("Unable to verify whether the patient was disease-free for more than {years} years"),
        ),
    })
}

/// Multiple primaries when the tumors are on opposite sides.
pub fn opposite_sides(step: &'static str, question: &'static str, reason: &'static str) -> Rule {
    Rule::new(step, question, reason, |_, pair| {
        RuleResult::when(pair.first.laterality.is_opposite(pair.second.laterality), Verdict::Multiple)
    })
}

/// Multiple primaries when both sites are the same paired organ in
/// `table` and the tumors are on opposite sides.
///
/// Only rows carrying a laterality class count as paired organs.
pub fn paired_sites_both_sides(
    step: &'static str,
    question: &'static str,
    reason: &'static str,
    table: &'static str,
) -> Rule {
    Rule::new(step, question, reason, move |ctx, pair| {
        with_table(ctx, table, |t| {
            let row1 = t.row_index(&pair.first.site.to_string());
            let row2 = t.row_index(&pair.second.site.to_string());
            let same_organ = row1 == row2
                && row1
                    .and_then(|index| t.row(index))
                    .is_some_and(|row| row.laterality.is_some());
            RuleResult::when(
                same_organ && pair.first.laterality.is_opposite(pair.second.laterality),
                Verdict::Multiple,
            )
        })
    })
    .uses_table(table)
}

/// Multiple primaries when the sites differ at the second or third
/// character (`Cxx`).
pub fn topography_major_differs(step: &'static str, question: &'static str, reason: &'static str) -> Rule {
    Rule::new(step, question, reason, |_, pair| {
        RuleResult::when(pair.first.site.major() != pair.second.site.major(), Verdict::Multiple)
    })
}

/// Multiple primaries when the sites differ at all.
pub fn topography_differs(step: &'static str, question: &'static str, reason: &'static str) -> Rule {
    Rule::new(step, question, reason, |_, pair| {
        RuleResult::when(pair.first.site != pair.second.site, Verdict::Multiple)
    })
}

/// Multiple primaries when the sites share `Cxx`, differ at the fourth
/// character, and `Cxx` is one of `majors`.
pub fn topography_subsite_differs(
    step: &'static str,
    question: &'static str,
    reason: &'static str,
    majors: &'static [u16],
) -> Rule {
    Rule::new(step, question, reason, move |_, pair| {
        let (a, b) = (pair.first.site, pair.second.site);
        RuleResult::when(
            a.major() == b.major() && a.subsite() != b.subsite() && majors.contains(&a.major()),
            Verdict::Multiple,
        )
    })
}

/// Multiple primaries for an invasive tumor diagnosed more than `days`
/// after an in situ tumor.
pub fn invasive_after_in_situ(step: &'static str, question: &'static str, reason: &'static str, days: i64) -> Rule {
    Rule::new(step, question, reason, move |_, pair| {
        let Some((in_situ, invasive)) = pair.split(is_in_situ, is_invasive) else {
            return RuleResult::Continue;
        };
        if !pair.is_later(in_situ, invasive) {
            return RuleResult::Continue;
        }
        match pair.days_apart(days) {
            Separation::Apart => RuleResult::MULTIPLE,
            Separation::Within => RuleResult::Continue,
            Separation::Unknown => RuleResult::Potential(
                Verdict::Multiple,
                format!("Unable to verify whether the invasive tumor was diagnosed more than {days} days after the in situ tumor"),
            ),
        }
    })
}

/// Single primary for an in situ tumor diagnosed after an invasive tumor.
pub fn in_situ_after_invasive(step: &'static str, question: &'static str, reason: &'static str) -> Rule {
    Rule::new(step, question, reason, |_, pair| {
        let later_in_situ = pair
            .split(is_invasive, is_in_situ)
            .is_some_and(|(invasive, in_situ)| pair.is_later(invasive, in_situ));
        RuleResult::when(later_in_situ, Verdict::Single)
    })
}

/// Multiple primaries when the histologies differ in their first three
/// digits.
pub fn histology_family_differs(step: &'static str, question: &'static str, reason: &'static str) -> Rule {
    Rule::new(step, question, reason, |_, pair| {
        RuleResult::when(
            pair.first.histology.family() != pair.second.histology.family(),
            Verdict::Multiple,
        )
    })
}

/// Single primary for identical histologies.
pub fn identical_histology(step: &'static str, question: &'static str, reason: &'static str) -> Rule {
    Rule::new(step, question, reason, |_, pair| {
        RuleResult::when(pair.first.histology == pair.second.histology, Verdict::Single)
    })
}

/// Single primary when one histology is a row's NOS code and the other a
/// subtype of that row.
pub fn nos_vs_subtype(step: &'static str, question: &'static str, reason: &'static str, table: &'static str) -> Rule {
    Rule::new(step, question, reason, move |ctx, pair| {
        with_table(ctx, table, |t| {
            RuleResult::when(
                histology::is_nos_vs_subtype(t, pair.first.morphology(), pair.second.morphology(), ctx.matching()),
                Verdict::Single,
            )
        })
    })
    .uses_table(table)
}

/// Multiple primaries for two different subtypes of one row.
pub fn different_subtypes(
    step: &'static str,
    question: &'static str,
    reason: &'static str,
    table: &'static str,
) -> Rule {
    Rule::new(step, question, reason, move |ctx, pair| {
        with_table(ctx, table, |t| {
            RuleResult::when(
                histology::different_subtypes(t, pair.first.morphology(), pair.second.morphology(), ctx.matching()),
                Verdict::Multiple,
            )
        })
    })
    .uses_table(table)
}

/// Single primary when both histologies are in the same row.
pub fn same_row(
    step: &'static str,
    question: &'static str,
    reason: &'static str,
    table: &'static str,
    nos_exceptions: &'static [&'static str],
) -> Rule {
    Rule::new(step, question, reason, move |ctx, pair| {
        with_table(ctx, table, |t| {
            let found = row_match(ctx, t, pair, nos_exceptions);
            RuleResult::when(found == RowMatch::Same, Verdict::Single)
        })
    })
    .uses_table(table)
}

/// Multiple primaries when the histologies are in different rows.
///
/// `one_missing` and `both_missing` decide what happens when one or both
/// histologies are not listed.
pub fn different_rows(
    step: &'static str,
    question: &'static str,
    reason: &'static str,
    table: &'static str,
    nos_exceptions: &'static [&'static str],
    one_missing: Unmatched,
    both_missing: Unmatched,
) -> Rule {
    Rule::new(step, question, reason, move |ctx, pair| {
        with_table(ctx, table, |t| match row_match(ctx, t, pair, nos_exceptions) {
            RowMatch::Different => RuleResult::MULTIPLE,
            RowMatch::Same => RuleResult::Continue,
            RowMatch::OneNotFound => one_missing.result(table),
            RowMatch::NotFound => both_missing.result(table),
        })
    })
    .uses_table(table)
}

fn row_match(ctx: &RuleContext<'_>, table: &HistologyTable, pair: &TumorPair, nos_exceptions: &[&str]) -> RowMatch {
    histology::same_row(
        table,
        pair.first.morphology(),
        pair.second.morphology(),
        ctx.matching(),
        nos_exceptions,
    )
}

//! Rules: single steps of a group's decision chain.

use std::fmt;

use mph_loader::{HematoDataset, HistologyTable, ReferenceData};
use mph_types::{ComputeOptions, HistologyMatching, MpResult};

use crate::temporal::{self, DateComparison, Separation};
use crate::validate::ParsedTumor;

/// A definite answer from a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The tumors are one primary.
    Single,
    /// The tumors are separate primaries.
    Multiple,
}

impl Verdict {
    /// Returns the matching outcome value.
    pub fn result(self) -> MpResult {
        match self {
            Self::Single => MpResult::SinglePrimary,
            Self::Multiple => MpResult::MultiplePrimaries,
        }
    }
}

/// Result of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleResult {
    /// The rule does not apply.
    Continue,
    /// The rule decides the comparison.
    Resolved(Verdict),
    /// A tentative answer; evaluation goes on.
    Potential(Verdict, String),
    /// The rule applies but the data cannot decide it.
    Undetermined(String),
}

impl RuleResult {
    /// Shorthand for `Resolved(Verdict::Single)`.
    pub const SINGLE: RuleResult = RuleResult::Resolved(Verdict::Single);
    /// Shorthand for `Resolved(Verdict::Multiple)`.
    pub const MULTIPLE: RuleResult = RuleResult::Resolved(Verdict::Multiple);

    /// Resolves to `verdict` when `condition` holds, otherwise continues.
    pub fn when(condition: bool, verdict: Verdict) -> Self {
        if condition {
            Self::Resolved(verdict)
        } else {
            Self::Continue
        }
    }
}

/// Read-only state available to every rule.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    data: &'a ReferenceData,
    options: &'a ComputeOptions,
}

impl<'a> RuleContext<'a> {
    /// Creates a context.
    pub fn new(data: &'a ReferenceData, options: &'a ComputeOptions) -> Self {
        Self { data, options }
    }

    /// Returns a reference table.
    pub fn table(&self, id: &str) -> Option<&'a HistologyTable> {
        self.data.table(id)
    }

    /// Returns the hematopoietic datasets.
    pub fn hemato(&self) -> &'a HematoDataset {
        self.data.hemato()
    }

    /// Returns the histology matching mode.
    pub fn matching(&self) -> HistologyMatching {
        self.options.histology_matching
    }
}

/// The two tumors being compared.
#[derive(Debug, Clone)]
pub struct TumorPair {
    /// First tumor.
    pub first: ParsedTumor,
    /// Second tumor.
    pub second: ParsedTumor,
}

impl TumorPair {
    /// Creates a pair.
    pub fn new(first: ParsedTumor, second: ParsedTumor) -> Self {
        Self { first, second }
    }

    /// Returns true if `predicate` holds for both tumors.
    pub fn both(&self, predicate: impl Fn(&ParsedTumor) -> bool) -> bool {
        predicate(&self.first) && predicate(&self.second)
    }

    /// Returns true if `predicate` holds for either tumor.
    pub fn either(&self, predicate: impl Fn(&ParsedTumor) -> bool) -> bool {
        predicate(&self.first) || predicate(&self.second)
    }

    /// Returns the tumors as (one matching `a`, other matching `b`), in
    /// either order.
    pub fn split(
        &self,
        a: impl Fn(&ParsedTumor) -> bool,
        b: impl Fn(&ParsedTumor) -> bool,
    ) -> Option<(&ParsedTumor, &ParsedTumor)> {
        if a(&self.first) && b(&self.second) {
            Some((&self.first, &self.second))
        } else if a(&self.second) && b(&self.first) {
            Some((&self.second, &self.first))
        } else {
            None
        }
    }

    /// Compares the diagnosis dates.
    pub fn compare_dates(&self) -> DateComparison {
        temporal::compare_dx_date(&self.first.date, &self.second.date)
    }

    /// Returns (earlier, later) when the order is known and the dates differ.
    pub fn ordered(&self) -> Option<(&ParsedTumor, &ParsedTumor)> {
        match self.compare_dates() {
            DateComparison::Tumor1Earlier => Some((&self.first, &self.second)),
            DateComparison::Tumor2Earlier => Some((&self.second, &self.first)),
            DateComparison::SameDay | DateComparison::Unknown => None,
        }
    }

    /// Returns true if `later` was certainly diagnosed after `earlier`.
    pub fn is_later(&self, earlier: &ParsedTumor, later: &ParsedTumor) -> bool {
        temporal::compare_dx_date(&earlier.date, &later.date) == DateComparison::Tumor1Earlier
    }

    /// Checks whether the diagnoses are more than `days` apart.
    pub fn days_apart(&self, days: i64) -> Separation {
        temporal::verify_days_apart(&self.first.date, &self.second.date, days)
    }

    /// Checks whether the diagnoses are more than `years` apart.
    pub fn years_apart(&self, years: u32) -> Separation {
        temporal::verify_years_apart(&self.first.date, &self.second.date, years)
    }
}

/// Signature of a rule body.
pub type RuleFn = dyn Fn(&RuleContext<'_>, &TumorPair) -> RuleResult + Send + Sync;

/// One numbered step of a rule group.
pub struct Rule {
    step: &'static str,
    question: &'static str,
    reason: &'static str,
    tables: Vec<&'static str>,
    eval: Box<RuleFn>,
}

impl Rule {
    /// Creates a rule.
    pub fn new(
        step: &'static str,
        question: &'static str,
        reason: &'static str,
        eval: impl Fn(&RuleContext<'_>, &TumorPair) -> RuleResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            step,
            question,
            reason,
            tables: Vec::new(),
            eval: Box::new(eval),
        }
    }

    /// Declares a reference table the rule reads.
    pub fn uses_table(mut self, table: &'static str) -> Self {
        if !self.tables.contains(&table) {
            self.tables.push(table);
        }
        self
    }

    /// Returns the step id ("M3", ...).
    pub fn step(&self) -> &'static str {
        self.step
    }

    /// Returns the rule book question.
    pub fn question(&self) -> &'static str {
        self.question
    }

    /// Returns the reason reported when the rule resolves.
    pub fn reason(&self) -> &'static str {
        self.reason
    }

    /// Returns the tables the rule reads.
    pub fn tables(&self) -> &[&'static str] {
        &self.tables
    }

    /// Evaluates the rule.
    pub fn evaluate(&self, ctx: &RuleContext<'_>, pair: &TumorPair) -> RuleResult {
        (self.eval)(ctx, pair)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("step", &self.step)
            .field("question", &self.question)
            .field("tables", &self.tables)
            .finish()
    }
}

//! The classification engine.

use std::ops::ControlFlow;
use std::sync::Arc;

use chrono::{Datelike, Local};
use mph_loader::ReferenceData;
use mph_types::{ClassificationOutcome, ComputeOptions, MpResult, TumorRecord};
use tracing::{debug, error, trace};

use crate::error::{EngineError, EngineResult};
use crate::group::RuleGroup;
use crate::groups::default_groups;
use crate::rule::{RuleContext, RuleResult, TumorPair, Verdict};
use crate::selector::GroupSelector;
use crate::validate::{InvalidField, ParsedTumor};

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Year used to reject future diagnosis dates. Defaults to the
    /// current year of the system clock.
    pub current_year: Option<i32>,
}

impl EngineConfig {
    /// Pins the current year.
    pub fn with_current_year(year: i32) -> Self {
        Self {
            current_year: Some(year),
        }
    }

    fn resolve_year(&self) -> i32 {
        self.current_year.unwrap_or_else(|| Local::now().year())
    }
}

/// A tentative answer waiting for the chain to finish.
#[derive(Debug)]
struct Pending {
    verdict: Verdict,
    step: &'static str,
    reason: String,
}

/// How a chain ended.
#[derive(Debug)]
struct Decision {
    result: MpResult,
    step: Option<&'static str>,
    reason: String,
}

impl Decision {
    fn resolved(verdict: Verdict, step: &'static str, reason: &str) -> Self {
        Self {
            result: verdict.result(),
            step: Some(step),
            reason: reason.to_string(),
        }
    }

    fn questionable(step: Option<&'static str>, reason: String) -> Self {
        Self {
            result: MpResult::Questionable,
            step,
            reason,
        }
    }
}

impl From<Pending> for Decision {
    fn from(pending: Pending) -> Self {
        Self {
            result: pending.verdict.result(),
            step: Some(pending.step),
            reason: pending.reason,
        }
    }
}

/// Multiple primary classification engine.
///
/// An engine owns its rule groups and shares immutable reference data.
/// It is `Send + Sync`; one engine can serve any number of threads.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use mph_engine::{EngineConfig, MphEngine};
/// use mph_loader::ReferenceData;
/// use mph_types::{ComputeOptions, MpResult, TumorRecord};
///
/// let data = Arc::new(ReferenceData::load_embedded().unwrap());
/// let engine = MphEngine::with_config(data, EngineConfig::with_current_year(2024)).unwrap();
///
/// let t1 = TumorRecord::new("C509", "8530", "3", "1", "2018");
/// let t2 = TumorRecord::new("C509", "8530", "3", "1", "2018").with_dx_month("5");
/// let outcome = engine.compute_primaries(&t1, &t2, &ComputeOptions::default());
/// assert_eq!(outcome.result, MpResult::SinglePrimary);
/// ```
#[derive(Debug)]
pub struct MphEngine {
    data: Arc<ReferenceData>,
    selector: GroupSelector,
    current_year: i32,
}

impl MphEngine {
    /// Creates an engine with the built-in groups and default configuration.
    pub fn new(data: Arc<ReferenceData>) -> EngineResult<Self> {
        Self::with_config(data, EngineConfig::default())
    }

    /// Creates an engine with the built-in groups.
    pub fn with_config(data: Arc<ReferenceData>, config: EngineConfig) -> EngineResult<Self> {
        Self::with_groups(data, config, default_groups())
    }

    /// Creates an engine over the embedded reference data snapshot.
    pub fn embedded() -> EngineResult<Self> {
        Self::new(Arc::new(ReferenceData::load_embedded()?))
    }

    /// Creates an engine with custom groups, in precedence order.
    ///
    /// Fails if a rule reads a table that `data` does not contain.
    pub fn with_groups(data: Arc<ReferenceData>, config: EngineConfig, groups: Vec<RuleGroup>) -> EngineResult<Self> {
        for group in &groups {
            if let Some(table) = group.tables().into_iter().find(|t| !data.has_table(t)) {
                return Err(EngineError::MissingTable {
                    group: group.id().to_string(),
                    table: table.to_string(),
                });
            }
        }

        let current_year = config.resolve_year();
        debug!(groups = groups.len(), current_year, "engine ready");

        Ok(Self {
            data,
            selector: GroupSelector::new(groups),
            current_year,
        })
    }

    /// Returns the groups in selection precedence order.
    pub fn groups(&self) -> &[RuleGroup] {
        self.selector.groups()
    }

    /// Returns the reference data.
    pub fn data(&self) -> &Arc<ReferenceData> {
        &self.data
    }

    /// Returns the year used to reject future diagnosis dates.
    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Returns the group a tumor with these properties uses, or `None` if
    /// the properties are invalid or not reportable.
    pub fn select_group(&self, site: &str, histology: &str, behavior: &str, year: &str) -> Option<&RuleGroup> {
        self.selector
            .select(site, histology, behavior, year, self.current_year)
    }

    /// Decides whether two tumors are a single primary or multiple
    /// primaries.
    pub fn compute_primaries(
        &self,
        first: &TumorRecord,
        second: &TumorRecord,
        options: &ComputeOptions,
    ) -> ClassificationOutcome {
        let parsed = (
            ParsedTumor::from_record(first, 1, self.current_year),
            ParsedTumor::from_record(second, 2, self.current_year),
        );
        let (first_tumor, second_tumor) = match parsed {
            (Ok(a), Ok(b)) => (a, b),
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => {
                debug!(error = %e, "invalid input");
                return ClassificationOutcome::invalid_input(e.to_string());
            }
            (Err(e1), Err(e2)) => {
                debug!(first = %e1, second = %e2, "invalid input");
                return ClassificationOutcome::invalid_input(format!("{e1}; {e2}"));
            }
        };

        let group1 = self.selector.select_parsed(&first_tumor);
        let group2 = self.selector.select_parsed(&second_tumor);
        debug!(
            first = group1.map(RuleGroup::id),
            second = group2.map(RuleGroup::id),
            "groups selected"
        );

        let coding = (
            check_coding(group1, &first_tumor, first, 1),
            check_coding(group2, &second_tumor, second, 2),
        );
        match coding {
            (Ok(()), Ok(())) => {}
            (Err(e), Ok(())) | (Ok(()), Err(e)) => {
                debug!(error = %e, "invalid input");
                return ClassificationOutcome::invalid_input(e.to_string());
            }
            (Err(e1), Err(e2)) => {
                debug!(first = %e1, second = %e2, "invalid input");
                return ClassificationOutcome::invalid_input(format!("{e1}; {e2}"));
            }
        }

        let group = match (group1, group2) {
            (Some(g1), Some(g2)) if g1 == g2 => g1,
            _ => return different_groups(group1, group2),
        };

        if first.same_descriptive_fields(second) {
            debug!(group = group.id(), "identical tumors");
            return ClassificationOutcome {
                result: MpResult::SinglePrimary,
                group_id: Some(group.id().to_string()),
                group_name: Some(group.name().to_string()),
                step: None,
                reason: "Identical site, histology, behavior, laterality and diagnosis date are a single primary."
                    .to_string(),
                applied_rules: Vec::new(),
            };
        }

        let ctx = RuleContext::new(&self.data, options);
        let pair = TumorPair::new(first_tumor, second_tumor);
        let outcome = run_chain(group, &ctx, &pair);
        debug!(
            group = group.id(),
            result = %outcome.result,
            step = outcome.step.as_deref(),
            "classified"
        );
        outcome
    }
}

/// Checks the codes a tumor's group needs beyond the core fields.
fn check_coding(
    group: Option<&RuleGroup>,
    tumor: &ParsedTumor,
    record: &TumorRecord,
    index: u8,
) -> Result<(), InvalidField> {
    match group {
        Some(group) if group.requires_icdo2() => tumor.require_icdo2(record, index),
        _ => Ok(()),
    }
}

fn different_groups(first: Option<&RuleGroup>, second: Option<&RuleGroup>) -> ClassificationOutcome {
    let describe = |group: Option<&RuleGroup>| group.map_or("not reportable", RuleGroup::name);
    ClassificationOutcome {
        result: MpResult::MultiplePrimaries,
        group_id: None,
        group_name: None,
        step: None,
        reason: format!(
            "Tumors use different rule groups ({} and {}) and are multiple primaries.",
            describe(first),
            describe(second)
        ),
        applied_rules: Vec::new(),
    }
}

/// Evaluates `group`'s rules in order until one decides.
fn run_chain(group: &RuleGroup, ctx: &RuleContext<'_>, pair: &TumorPair) -> ClassificationOutcome {
    let mut applied = Vec::with_capacity(group.rules().len());

    let flow = group.rules().iter().try_fold(None::<Pending>, |pending, rule| {
        let step = rule.step();
        applied.push(step.to_string());
        let result = rule.evaluate(ctx, pair);
        trace!(group = group.id(), step, ?result, "rule evaluated");

        match result {
            RuleResult::Continue => ControlFlow::Continue(pending),
            RuleResult::Resolved(verdict) => ControlFlow::Break(Decision::resolved(verdict, step, rule.reason())),
            RuleResult::Undetermined(reason) => ControlFlow::Break(Decision::questionable(Some(step), reason)),
            RuleResult::Potential(verdict, reason) => match pending {
                None => ControlFlow::Continue(Some(Pending { verdict, step, reason })),
                Some(first) if first.verdict == verdict => ControlFlow::Continue(Some(first)),
                Some(first) => ControlFlow::Break(Decision::questionable(
                    Some(step),
                    format!(
                        "Conflicting tentative results at {} ({}) and {} ({})",
                        first.step, first.reason, step, reason
                    ),
                )),
            },
        }
    });

    let decision = match flow {
        ControlFlow::Break(decision) => decision,
        ControlFlow::Continue(Some(pending)) => pending.into(),
        ControlFlow::Continue(None) => {
            error!(group = group.id(), "rule group ended without a result");
            Decision::questionable(
                last_step(group),
                format!("No rule in group {} produced a result", group.id()),
            )
        }
    };

    ClassificationOutcome {
        result: decision.result,
        group_id: Some(group.id().to_string()),
        group_name: Some(group.name().to_string()),
        step: decision.step.map(str::to_string),
        reason: decision.reason,
        applied_rules: applied,
    }
}

fn last_step(group: &RuleGroup) -> Option<&'static str> {
    group.rules().last().map(|rule| rule.step())
}

#[cfg(test)]
mod tests {
    use mph_types::well_known;

    use super::*;
    use crate::group::Applicability;
    use crate::rule::Rule;

    const MALIGNANT: &[mph_types::Behavior] = &[mph_types::Behavior::Malignant];

    fn data() -> Arc<ReferenceData> {
        Arc::new(ReferenceData::load_embedded().unwrap())
    }

    fn engine_with(rules: Vec<Rule>) -> MphEngine {
        let group = RuleGroup::new("test", "Test", vec![Applicability::years(1, None, MALIGNANT)], rules);
        MphEngine::with_groups(data(), EngineConfig::with_current_year(2024), vec![group]).unwrap()
    }

    fn classify(engine: &MphEngine) -> ClassificationOutcome {
        let t1 = TumorRecord::new("C160", "8140", "3", "0", "2019");
        let t2 = TumorRecord::new("C160", "8140", "3", "0", "2020");
        engine.compute_primaries(&t1, &t2, &ComputeOptions::default())
    }

    #[test]
    fn test_pending_is_used_on_exhaustion() {
        let engine = engine_with(vec![
            Rule::new("M1", "q", "r", |_, _| RuleResult::Potential(Verdict::Multiple, "maybe".into())),
            Rule::new("M2", "q", "r", |_, _| RuleResult::Continue),
        ]);
        let outcome = classify(&engine);
        assert_eq!(outcome.result, MpResult::MultiplePrimaries);
        assert_eq!(outcome.step.as_deref(), Some("M1"));
        assert_eq!(outcome.reason, "maybe");
        assert_eq!(outcome.applied_rules, vec!["M1", "M2"]);
    }

    #[test]
    fn test_conflicting_potentials_are_questionable() {
        let engine = engine_with(vec![
            Rule::new("M1", "q", "r", |_, _| RuleResult::Potential(Verdict::Multiple, "a".into())),
            Rule::new("M2", "q", "r", |_, _| RuleResult::Potential(Verdict::Single, "b".into())),
            Rule::new("M3", "q", "r", |_, _| RuleResult::SINGLE),
        ]);
        let outcome = classify(&engine);
        assert_eq!(outcome.result, MpResult::Questionable);
        assert_eq!(outcome.step.as_deref(), Some("M2"));
        assert!(outcome.reason.contains("M1") && outcome.reason.contains("M2"));
        assert_eq!(outcome.applied_rules.len(), 2);
    }

    #[test]
    fn test_resolved_overrides_pending() {
        let engine = engine_with(vec![
            Rule::new("M1", "q", "r", |_, _| RuleResult::Potential(Verdict::Multiple, "a".into())),
            Rule::new("M2", "q", "single", |_, _| RuleResult::SINGLE),
        ]);
        let outcome = classify(&engine);
        assert_eq!(outcome.result, MpResult::SinglePrimary);
        assert_eq!(outcome.step.as_deref(), Some("M2"));
        assert_eq!(outcome.reason, "single");
    }

    #[test]
    fn test_exhaustion_without_pending_is_questionable() {
        let engine = engine_with(vec![Rule::new("M1", "q", "r", |_, _| RuleResult::Continue)]);
        let outcome = classify(&engine);
        assert_eq!(outcome.result, MpResult::Questionable);
        assert_eq!(outcome.applied_rules, vec!["M1"]);
    }

    #[test]
    fn test_missing_table_is_rejected() {
        let group = RuleGroup::new(
            "test",
            "Test",
            vec![Applicability::years(1, None, MALIGNANT)],
            vec![Rule::new("M1", "q", "r", |_, _| RuleResult::SINGLE).uses_table("no_such_table")],
        );
        let err = MphEngine::with_groups(data(), EngineConfig::default(), vec![group]).unwrap_err();
        assert!(matches!(err, EngineError::MissingTable { ref table, .. } if table == "no_such_table"));
    }

    #[test]
    fn test_default_groups_are_complete() {
        let engine = MphEngine::with_config(data(), EngineConfig::with_current_year(2024)).unwrap();
        assert_eq!(engine.groups().len(), 26);
        assert_eq!(engine.current_year(), 2024);
        assert_eq!(
            engine.select_group("C509", "8500", "3", "2019").map(RuleGroup::id),
            Some(well_known::BREAST_2018)
        );
    }

    #[test]
    fn test_default_year_comes_from_clock() {
        let engine = MphEngine::new(data()).unwrap();
        assert!(engine.current_year() >= 2024);
    }
}

//! Routing of a tumor to its rule group.

use mph_types::{Behavior, HistologyCode, SiteCode};

use crate::group::RuleGroup;
use crate::temporal::PartialDate;
use crate::validate::ParsedTumor;

/// Finds the first group, in precedence order, that applies to a tumor.
#[derive(Debug)]
pub struct GroupSelector {
    groups: Vec<RuleGroup>,
}

impl GroupSelector {
    /// Creates a selector over `groups`, already in precedence order.
    pub fn new(groups: Vec<RuleGroup>) -> Self {
        Self { groups }
    }

    /// Returns the groups in precedence order.
    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    /// Selects a group from raw property tokens.
    ///
    /// Returns `None` when a token is syntactically invalid, the year is
    /// outside `[1, current_year]`, or no group applies (the tumor is not
    /// reportable).
    pub fn select(
        &self,
        site: &str,
        histology: &str,
        behavior: &str,
        year: &str,
        current_year: i32,
    ) -> Option<&RuleGroup> {
        let site = SiteCode::parse(site)?;
        let histology = HistologyCode::parse(histology)?;
        let behavior = Behavior::from_code(behavior)?;
        let year = PartialDate::parse(Some(year), None, None, current_year).year()?;
        self.find(site, histology, behavior, year)
    }

    /// Selects a group for a validated tumor.
    pub fn select_parsed(&self, tumor: &ParsedTumor) -> Option<&RuleGroup> {
        self.find(tumor.site, tumor.histology, tumor.behavior, tumor.year())
    }

    fn find(&self, site: SiteCode, histology: HistologyCode, behavior: Behavior, year: i32) -> Option<&RuleGroup> {
        self.groups
            .iter()
            .find(|group| group.applies_to(site, histology, behavior, year))
    }
}

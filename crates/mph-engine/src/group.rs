//! Rule groups and their applicability criteria.

use std::fmt;

use mph_types::{well_known, Behavior, HistologyCode, SiteCode};

use crate::rule::Rule;

/// Inclusive code ranges, as numbers without any prefix.
pub type CodeRanges = &'static [(u16, u16)];

/// One conjunction of conditions a tumor must meet to use a group.
///
/// Empty site or histology ranges accept any code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicability {
    first_year: i32,
    last_year: Option<i32>,
    sites: CodeRanges,
    histologies: CodeRanges,
    excluded_histologies: CodeRanges,
    behaviors: &'static [Behavior],
}

/// Hematopoietic histologies.
const HEMATO_RANGE: CodeRanges = &[well_known::HEMATO_HISTOLOGY];
/// Hematopoietic histologies and Kaposi sarcoma.
const HEMATO_AND_KAPOSI: CodeRanges = &[
    well_known::HEMATO_HISTOLOGY,
    (well_known::KAPOSI_SARCOMA, well_known::KAPOSI_SARCOMA),
];

impl Applicability {
    /// Accepts any tumor diagnosed in `[first_year, last_year]` with one of
    /// `behaviors`.
    pub fn years(first_year: i32, last_year: Option<i32>, behaviors: &'static [Behavior]) -> Self {
        Self {
            first_year,
            last_year,
            sites: &[],
            histologies: &[],
            excluded_histologies: &[],
            behaviors,
        }
    }

    /// Restricts to sites in `ranges`.
    pub fn sites(mut self, ranges: CodeRanges) -> Self {
        self.sites = ranges;
        self
    }

    /// Restricts to histologies in `ranges`.
    pub fn histologies(mut self, ranges: CodeRanges) -> Self {
        self.histologies = ranges;
        self
    }

    /// Excludes histologies in `ranges`.
    pub fn excluding(mut self, ranges: CodeRanges) -> Self {
        self.excluded_histologies = ranges;
        self
    }

    /// Excludes hematopoietic histologies.
    pub fn solid(self) -> Self {
        self.excluding(HEMATO_RANGE)
    }

    /// Excludes hematopoietic histologies and Kaposi sarcoma.
    pub fn solid_site_specific(self) -> Self {
        self.excluding(HEMATO_AND_KAPOSI)
    }

    /// Returns true if the tumor properties meet every condition.
    pub fn accepts(&self, site: SiteCode, histology: HistologyCode, behavior: Behavior, year: i32) -> bool {
        let in_any = |ranges: CodeRanges, value: u16| ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&value));

        year >= self.first_year
            && self.last_year.map_or(true, |last| year <= last)
            && self.behaviors.contains(&behavior)
            && (self.sites.is_empty() || in_any(self.sites, site.number()))
            && (self.histologies.is_empty() || in_any(self.histologies, histology.number()))
            && !in_any(self.excluded_histologies, histology.number())
    }
}

/// A rule book for one clinical area and period.
pub struct RuleGroup {
    id: &'static str,
    name: &'static str,
    criteria: Vec<Applicability>,
    rules: Vec<Rule>,
    requires_icdo2: bool,
}

impl RuleGroup {
    /// Creates a group; a tumor uses it when any of `criteria` accepts it.
    pub fn new(id: &'static str, name: &'static str, criteria: Vec<Applicability>, rules: Vec<Rule>) -> Self {
        Self {
            id,
            name,
            criteria,
            rules,
            requires_icdo2: false,
        }
    }

    /// Marks the group as coded in ICD-O-2: its tumors must carry an
    /// ICD-O-2 histology.
    pub fn requiring_icdo2(mut self) -> Self {
        self.requires_icdo2 = true;
        self
    }

    /// Returns true if the group's tumors must carry an ICD-O-2 histology.
    pub fn requires_icdo2(&self) -> bool {
        self.requires_icdo2
    }

    /// Returns the stable identifier.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the applicability criteria.
    pub fn criteria(&self) -> &[Applicability] {
        &self.criteria
    }

    /// Returns the rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the step ids in evaluation order.
    pub fn steps(&self) -> Vec<&'static str> {
        self.rules.iter().map(Rule::step).collect()
    }

    /// Returns every table read by the group's rules.
    pub fn tables(&self) -> Vec<&'static str> {
        let mut tables: Vec<&'static str> = Vec::new();
        for table in self.rules.iter().flat_map(|rule| rule.tables().iter().copied()) {
            if !tables.contains(&table) {
                tables.push(table);
            }
        }
        tables
    }

    /// Returns true if the group applies to the tumor properties.
    pub fn applies_to(&self, site: SiteCode, histology: HistologyCode, behavior: Behavior, year: i32) -> bool {
        self.criteria
            .iter()
            .any(|c| c.accepts(site, histology, behavior, year))
    }
}

impl fmt::Debug for RuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleGroup")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("steps", &self.steps())
            .finish()
    }
}

impl PartialEq for RuleGroup {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleResult;

    const MALIGNANT: &[Behavior] = &[Behavior::InSitu, Behavior::Malignant];

    fn site(code: &str) -> SiteCode {
        SiteCode::parse(code).unwrap()
    }

    fn hist(code: &str) -> HistologyCode {
        HistologyCode::parse(code).unwrap()
    }

    #[test]
    fn test_applicability() {
        let breast = Applicability::years(2018, Some(2022), MALIGNANT)
            .sites(&[(500, 509)])
            .solid_site_specific();

        assert!(breast.accepts(site("C509"), hist("8500"), Behavior::Malignant, 2018));
        assert!(breast.accepts(site("C500"), hist("8500"), Behavior::InSitu, 2022));
        assert!(!breast.accepts(site("C509"), hist("8500"), Behavior::Malignant, 2023));
        assert!(!breast.accepts(site("C509"), hist("8500"), Behavior::Benign, 2018));
        assert!(!breast.accepts(site("C619"), hist("8500"), Behavior::Malignant, 2018));
        assert!(!breast.accepts(site("C509"), hist("9140"), Behavior::Malignant, 2018));
        assert!(!breast.accepts(site("C509"), hist("9680"), Behavior::Malignant, 2018));
    }

    #[test]
    fn test_group_tables_and_steps() {
        let group = RuleGroup::new(
            "test",
            "Test",
            vec![Applicability::years(1, None, MALIGNANT)],
            vec![
                Rule::new("M1", "q", "r", |_, _| RuleResult::Continue).uses_table("a"),
                Rule::new("M2", "q", "r", |_, _| RuleResult::SINGLE)
                    .uses_table("a")
                    .uses_table("b"),
            ],
        );
        assert_eq!(group.steps(), vec!["M1", "M2"]);
        assert_eq!(group.tables(), vec!["a", "b"]);
        assert!(group.applies_to(site("C000"), hist("8000"), Behavior::Malignant, 1990));
        assert!(!group.requires_icdo2());
        assert!(group.requiring_icdo2().requires_icdo2());
    }
}

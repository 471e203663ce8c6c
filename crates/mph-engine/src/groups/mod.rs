//! The built-in rule groups.
//!
//! Every group is built by its own function and owns its rules. Shared
//! rule construction lives in [`common`].

mod breast;
mod cns;
mod colon;
mod common;
mod head_neck;
mod hemato;
mod kidney;
mod lung;
mod melanoma;
mod other_sites;
mod urinary;

use crate::group::RuleGroup;

/// Returns the built-in groups in selection precedence order.
///
/// Hematopoietic groups come first, then CNS, then the site-specific solid
/// groups and finally the other-sites groups.
pub fn default_groups() -> Vec<RuleGroup> {
    vec![
        hemato::hemato_pre2001(),
        hemato::hemato_2001_2009(),
        hemato::hemato_2010(),
        cns::benign_brain_2007(),
        cns::nonmalignant_cns_2018(),
        cns::malignant_brain_2007(),
        cns::malignant_cns_2018(),
        head_neck::head_neck_2007(),
        colon::colon_2007(),
        lung::lung_2007(),
        melanoma::melanoma_2007(),
        breast::breast_2007(),
        kidney::kidney_2007(),
        urinary::urinary_2007(),
        head_neck::head_neck_2018(),
        colon::colon_2018(),
        lung::lung_2018(),
        melanoma::melanoma_2018(),
        breast::breast_2018(),
        breast::breast_2023(),
        kidney::kidney_2018(),
        urinary::urinary_2018(),
        other_sites::solid_pre2007(),
        other_sites::other_sites_2007(),
        other_sites::other_sites_2018(),
        other_sites::other_sites_2023(),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use mph_loader::ReferenceData;
    use mph_types::{well_known, ComputeOptions, TumorRecord};

    use super::*;
    use crate::rule::{RuleContext, RuleResult, TumorPair};
    use crate::validate::ParsedTumor;

    fn pair() -> TumorPair {
        let first = TumorRecord::new("C000", "8000", "3", "0", "2020");
        let second = TumorRecord::new("C000", "8000", "3", "0", "2021");
        TumorPair::new(
            ParsedTumor::from_record(&first, 1, 2024).unwrap(),
            ParsedTumor::from_record(&second, 2, 2024).unwrap(),
        )
    }

    #[test]
    fn test_group_ids_unique() {
        let groups = default_groups();
        let ids: HashSet<_> = groups.iter().map(RuleGroup::id).collect();
        assert_eq!(ids.len(), groups.len());
        assert_eq!(groups.len(), 26);
        assert_eq!(groups[0].id(), well_known::HEMATO_PRE_2001);
        assert_eq!(groups[25].id(), well_known::OTHER_SITES_2023);
    }

    #[test]
    fn test_every_group_ends_unconditionally() {
        let data = ReferenceData::load_embedded().unwrap();
        let options = ComputeOptions::default();
        let ctx = RuleContext::new(&data, &options);
        let pair = pair();

        for group in default_groups() {
            let last = group.rules().last().unwrap();
            assert!(
                matches!(last.evaluate(&ctx, &pair), RuleResult::Resolved(_)),
                "{} does not end with a catch-all",
                group.id()
            );
            let steps: HashSet<_> = group.steps().into_iter().collect();
            assert_eq!(steps.len(), group.rules().len(), "{} repeats a step", group.id());
        }
    }

    #[test]
    fn test_referenced_tables_are_embedded() {
        let data = ReferenceData::load_embedded().unwrap();
        for group in default_groups() {
            for table in group.tables() {
                assert!(data.has_table(table), "{} needs {table}", group.id());
            }
        }
    }

    #[test]
    fn test_other_sites_2023_steps() {
        let group = other_sites::other_sites_2023();
        let steps = group.steps();
        assert_eq!(steps.first(), Some(&"M3"));
        assert_eq!(steps.last(), Some(&"M21"));
        assert_eq!(steps.len(), 19);
    }
}

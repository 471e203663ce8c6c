//! Property tests over generated tumor pairs.

use std::sync::{Arc, OnceLock};

use mph_engine::mph_loader::ReferenceData;
use mph_engine::{EngineConfig, MphEngine};
use mph_types::{ComputeOptions, MpResult, TumorRecord};
use proptest::prelude::*;

fn engine() -> &'static MphEngine {
    static ENGINE: OnceLock<MphEngine> = OnceLock::new();
    ENGINE.get_or_init(|| {
        let data = Arc::new(ReferenceData::load_embedded().unwrap());
        MphEngine::with_config(data, EngineConfig::with_current_year(2024)).unwrap()
    })
}

fn tumor() -> impl Strategy<Value = TumorRecord> {
    (
        prop::sample::select(vec!["C160", "C341", "C343", "C509", "C649", "C711", "C421", "C619"]),
        prop::sample::select(vec!["8000", "8140", "8143", "8500", "8530", "8960", "9440", "9861", "9863"]),
        prop::sample::select(vec!["0", "1", "2", "3"]),
        prop::sample::select(vec!["0", "1", "2", "9"]),
        1996i32..=2024,
        prop::option::of(1u32..=12),
    )
        .prop_map(|(site, hist, beh, lat, year, month)| {
            let record = TumorRecord::new(site, hist, beh, lat, year.to_string()).with_icdo2(hist, beh);
            match month {
                Some(m) => record.with_dx_month(m.to_string()),
                None => record,
            }
        })
}

proptest! {
    #[test]
    fn classification_is_deterministic(t1 in tumor(), t2 in tumor()) {
        let options = ComputeOptions::default();
        let first = engine().compute_primaries(&t1, &t2, &options);
        let second = engine().compute_primaries(&t1, &t2, &options);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn applied_rules_stop_at_the_deciding_step(t1 in tumor(), t2 in tumor()) {
        let outcome = engine().compute_primaries(&t1, &t2, &ComputeOptions::default());
        prop_assert_ne!(outcome.result, MpResult::InvalidInput);

        match (outcome.group_id.as_deref(), outcome.step.as_deref()) {
            (Some(id), Some(step)) => {
                let group = engine().groups().iter().find(|g| g.id() == id).unwrap();
                let steps = group.steps();
                let position = steps.iter().position(|s| *s == step).unwrap();
                prop_assert_eq!(outcome.applied_rules.len(), position + 1);
                for (applied, expected) in outcome.applied_rules.iter().zip(&steps) {
                    prop_assert_eq!(applied.as_str(), *expected);
                }
            }
            _ => prop_assert!(outcome.applied_rules.is_empty()),
        }
    }

    #[test]
    fn identical_tumors_skip_the_rules(t1 in tumor()) {
        let outcome = engine().compute_primaries(&t1, &t1, &ComputeOptions::default());
        let year = t1.dx_year.as_deref().unwrap_or_default();
        let group = engine().select_group(&t1.primary_site, &t1.histology, &t1.behavior, year);

        match group {
            Some(group) => {
                prop_assert_eq!(outcome.result, MpResult::SinglePrimary);
                prop_assert_eq!(outcome.group_id.as_deref(), Some(group.id()));
                prop_assert_eq!(outcome.step, None);
            }
            None => {
                prop_assert_eq!(outcome.result, MpResult::MultiplePrimaries);
                prop_assert_eq!(outcome.group_id, None);
            }
        }
        prop_assert!(outcome.applied_rules.is_empty());
    }

    #[test]
    fn group_routing_is_symmetric(t1 in tumor(), t2 in tumor()) {
        let options = ComputeOptions::default();
        let forward = engine().compute_primaries(&t1, &t2, &options);
        let backward = engine().compute_primaries(&t2, &t1, &options);
        prop_assert_eq!(forward.group_id, backward.group_id);
    }
}

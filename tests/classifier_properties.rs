// tests/classifier_properties.rs

use std::collections::HashSet;
use std::sync::Arc;

use jobqueue::analysis::{classify_resources, ItemStatus, JobStatus, Note};
use jobqueue::job::Resource;
use jobqueue_test_utils::resources::StubResource;
use proptest::prelude::*;

// Small path alphabet so duplicates and generated/declared overlaps happen.
fn item_strategy() -> impl Strategy<Value = (String, bool)> {
    (0..6usize, any::<bool>()).prop_map(|(i, present)| (format!("p{i}"), present))
}

fn resources(items: &[(String, bool)]) -> Vec<Arc<dyn Resource>> {
    items
        .iter()
        .map(|(path, present)| Arc::new(StubResource::new(path, *present)) as Arc<dyn Resource>)
        .collect()
}

proptest! {
    #[test]
    fn classification_preserves_declaration_order(
        inputs in proptest::collection::vec(item_strategy(), 0..6),
        outputs in proptest::collection::vec(item_strategy(), 0..6),
        generated in proptest::collection::hash_set(0..6usize, 0..4),
    ) {
        let generated: HashSet<String> = generated.into_iter().map(|i| format!("p{i}")).collect();
        let analysis = classify_resources(&resources(&inputs), &resources(&outputs), &generated);

        let in_paths: Vec<&str> = analysis.inputs.iter().map(|i| i.path.as_str()).collect();
        let out_paths: Vec<&str> = analysis.outputs.iter().map(|o| o.path.as_str()).collect();
        prop_assert_eq!(in_paths, inputs.iter().map(|(p, _)| p.as_str()).collect::<Vec<_>>());
        prop_assert_eq!(out_paths, outputs.iter().map(|(p, _)| p.as_str()).collect::<Vec<_>>());
    }

    #[test]
    fn runnable_jobs_have_usable_inputs_and_only_missing_outputs(
        inputs in proptest::collection::vec(item_strategy(), 0..6),
        outputs in proptest::collection::vec(item_strategy(), 0..6),
        generated in proptest::collection::hash_set(0..6usize, 0..4),
    ) {
        let generated: HashSet<String> = generated.into_iter().map(|i| format!("p{i}")).collect();
        let analysis = classify_resources(&resources(&inputs), &resources(&outputs), &generated);

        match analysis.status {
            JobStatus::Run => {
                prop_assert!(analysis.outputs.iter().all(|o| o.status == ItemStatus::Run));
                prop_assert!(analysis
                    .inputs
                    .iter()
                    .all(|i| matches!(i.status, ItemStatus::Available | ItemStatus::Planned)));
            }
            JobStatus::Done => {
                prop_assert!(analysis.outputs.iter().all(|o| o.status == ItemStatus::Done));
                prop_assert!(analysis.inputs.iter().all(|i| i.status != ItemStatus::Error));
            }
            JobStatus::Error => {
                let statuses: Vec<ItemStatus> = analysis
                    .input_statuses()
                    .into_iter()
                    .chain(analysis.output_statuses())
                    .collect();
                let has_error = statuses.contains(&ItemStatus::Error);
                let mixed = statuses.contains(&ItemStatus::Done) && statuses.contains(&ItemStatus::Run);
                let no_outputs = !statuses.iter().any(|s| matches!(s, ItemStatus::Done | ItemStatus::Run));
                prop_assert!(has_error || mixed || no_outputs);
            }
        }
    }

    #[test]
    fn repeated_paths_are_always_errors(
        items in proptest::collection::vec(item_strategy(), 1..6),
    ) {
        let mut doubled = items.clone();
        doubled.push(items[0].clone());
        let none = HashSet::new();

        let as_inputs = classify_resources(&resources(&doubled), &[], &none);
        prop_assert_eq!(as_inputs.status, JobStatus::Error);
        prop_assert_eq!(as_inputs.inputs.last().and_then(|i| i.note), Some(Note::InputDuplicated));

        let as_outputs = classify_resources(&[], &resources(&doubled), &none);
        prop_assert_eq!(as_outputs.status, JobStatus::Error);
        prop_assert_eq!(as_outputs.outputs.last().and_then(|o| o.note), Some(Note::ResultDuplicated));
    }

    #[test]
    fn existing_inputs_never_depend_on_the_generated_set(
        paths in proptest::collection::hash_set(0..6usize, 1..6),
        generated in proptest::collection::hash_set(0..6usize, 0..6),
    ) {
        let inputs: Vec<(String, bool)> = paths.iter().map(|i| (format!("p{i}"), true)).collect();
        let generated: HashSet<String> = generated.into_iter().map(|i| format!("p{i}")).collect();

        let analysis = classify_resources(&resources(&inputs), &[], &generated);
        prop_assert!(analysis.inputs.iter().all(|i| i.status == ItemStatus::Available));
    }
}

//! Property-based tests for grouping activities by round

use colab::model::{Activity, Round, RoundStatus};
use colab::views::group_activities;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn round(id: i64) -> Round {
    Round {
        id,
        name: format!("Round {}", id),
        description: String::new(),
        status: RoundStatus::Plan,
        iterative: true,
        process_id: Some(1),
        process_name: None,
        sub_activities: Vec::new(),
    }
}

fn activity(id: i64, parent_round_id: Option<i64>) -> Activity {
    Activity {
        id,
        name: format!("Activity {}", id),
        parent_round_id,
        ..Activity::default()
    }
}

/// Unique round ids in arbitrary order, and activities whose parent is either
/// absent or drawn from a range wider than the round ids.
fn process_strategy() -> impl Strategy<Value = (Vec<Round>, Vec<Activity>)> {
    (
        prop::collection::btree_set(1i64..12, 0..6)
            .prop_map(|ids| ids.into_iter().collect::<Vec<_>>())
            .prop_shuffle(),
        prop::collection::vec(prop::option::of(1i64..16), 0..40),
    )
        .prop_map(|(round_ids, parents)| {
            let rounds = round_ids.into_iter().map(round).collect();
            let activities = parents
                .into_iter()
                .enumerate()
                .map(|(i, parent)| activity(100 + i as i64, parent))
                .collect();
            (rounds, activities)
        })
}

proptest! {
    #[test]
    fn grouping_is_complete_and_disjoint((rounds, activities) in process_strategy()) {
        let (groups, ungrouped, orphans) = group_activities(&rounds, &activities);
        let round_ids: BTreeSet<i64> = rounds.iter().map(|r| r.id).collect();

        let mut shown: Vec<i64> = groups
            .iter()
            .flat_map(|g| g.activities.iter().map(|a| a.id))
            .chain(ungrouped.iter().map(|a| a.id))
            .collect();
        shown.sort_unstable();

        let mut expected: Vec<i64> = activities
            .iter()
            .filter(|a| a.parent_round_id.map_or(true, |id| round_ids.contains(&id)))
            .map(|a| a.id)
            .collect();
        expected.sort_unstable();
        prop_assert_eq!(&shown, &expected);

        // Every input activity lands in exactly one bucket.
        prop_assert_eq!(shown.len() + orphans.len(), activities.len());
        for orphan in &orphans {
            prop_assert!(!round_ids.contains(&orphan.missing_round_id));
            prop_assert_eq!(orphan.activity.parent_round_id, Some(orphan.missing_round_id));
        }
    }

    #[test]
    fn grouping_preserves_input_order((rounds, activities) in process_strategy()) {
        let (groups, ungrouped, _) = group_activities(&rounds, &activities);

        let group_ids: Vec<i64> = groups.iter().map(|g| g.round.id).collect();
        let round_ids: Vec<i64> = rounds.iter().map(|r| r.id).collect();
        prop_assert_eq!(group_ids, round_ids);

        for group in &groups {
            prop_assert!(group.activities.iter().all(|a| a.parent_round_id == Some(group.round.id)));
            let expected: Vec<i64> = activities
                .iter()
                .filter(|a| a.parent_round_id == Some(group.round.id))
                .map(|a| a.id)
                .collect();
            let actual: Vec<i64> = group.activities.iter().map(|a| a.id).collect();
            prop_assert_eq!(actual, expected);
        }

        let expected: Vec<i64> = activities
            .iter()
            .filter(|a| a.parent_round_id.is_none())
            .map(|a| a.id)
            .collect();
        let actual: Vec<i64> = ungrouped.iter().map(|a| a.id).collect();
        prop_assert_eq!(actual, expected);
    }
}

/// Grouping the same input twice yields the same buckets.
#[test]
fn test_grouping_is_idempotent_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&process_strategy(), |(rounds, activities)| {
            let first = group_activities(&rounds, &activities);
            let second = group_activities(&rounds, &activities);
            assert_eq!(first.0, second.0);
            assert_eq!(first.1, second.1);
            assert_eq!(first.2, second.2);
            Ok(())
        })
        .unwrap();
}

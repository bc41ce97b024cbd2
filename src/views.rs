//! Process Views
//!
//! Assembles the grouped presentation model for the process detail view:
//! activities bucketed under their parent round (round order, then input
//! order), activities without a parent round, and activities whose parent
//! round is not part of the process.

use crate::model::{Activity, FullProcess, Process, Round};
use serde::Serialize;
use tracing::warn;

/// A round and the activities that belong to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundGroup {
    pub round: Round,
    pub activities: Vec<Activity>,
}

/// An activity pointing at a round that is absent from the process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrphanActivity {
    pub activity: Activity,
    pub missing_round_id: i64,
}

/// Grouped view of one process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessView {
    pub process: Process,
    pub groups: Vec<RoundGroup>,
    pub ungrouped: Vec<Activity>,
    pub orphans: Vec<OrphanActivity>,
}

/// Bucket `activities` by `parent_round_id` over `rounds`.
///
/// Pure and deterministic. Returns `(groups, ungrouped, orphans)`.
pub fn group_activities(
    rounds: &[Round],
    activities: &[Activity],
) -> (Vec<RoundGroup>, Vec<Activity>, Vec<OrphanActivity>) {
    let mut groups: Vec<RoundGroup> = rounds
        .iter()
        .map(|round| RoundGroup {
            round: round.clone(),
            activities: Vec::new(),
        })
        .collect();
    let mut ungrouped = Vec::new();
    let mut orphans = Vec::new();

    for activity in activities {
        match activity.parent_round_id {
            None => ungrouped.push(activity.clone()),
            Some(round_id) => {
                // First round with the id wins if the payload repeats one.
                match groups.iter_mut().find(|group| group.round.id == round_id) {
                    Some(group) => group.activities.push(activity.clone()),
                    None => orphans.push(OrphanActivity {
                        activity: activity.clone(),
                        missing_round_id: round_id,
                    }),
                }
            }
        }
    }

    (groups, ungrouped, orphans)
}

impl ProcessView {
    pub fn assemble(full: &FullProcess) -> Self {
        let (groups, ungrouped, orphans) = group_activities(&full.rounds, &full.activities);

        for orphan in &orphans {
            warn!(
                process_id = full.process.id,
                activity_id = orphan.activity.id,
                missing_round_id = orphan.missing_round_id,
                "Activity references a round that is not part of the process"
            );
        }

        Self {
            process: full.process.clone(),
            groups,
            ungrouped,
            orphans,
        }
    }

    /// Activities shown in the view (grouped then ungrouped).
    pub fn shown_activity_count(&self) -> usize {
        self.groups.iter().map(|g| g.activities.len()).sum::<usize>() + self.ungrouped.len()
    }
}

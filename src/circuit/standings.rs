use std::collections::BTreeMap;

use crate::scoring::types::Group;

use super::snapshot::{CircuitSnapshot, GroupRanks};

/// One row of the published standings: a group and its four ranks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingsEntry {
    pub group: Group,
    pub ranks: GroupRanks,
}

/// Group every group into threshold buckets.
///
/// A group's bucket is the worst of its four ranks (missing ranks count as
/// the total group count), so a group only reaches a threshold it meets on
/// every metric simultaneously. Buckets are keyed ascending; within a bucket
/// groups are sorted lexicographically regardless of insertion order.
pub fn bucketize(snapshot: &CircuitSnapshot) -> BTreeMap<usize, Vec<StandingsEntry>> {
    let mut buckets: BTreeMap<usize, Vec<StandingsEntry>> = BTreeMap::new();

    // `groups` iterates in lexicographic order, so each bucket's entries
    // arrive already sorted.
    for group in &snapshot.groups {
        let ranks = snapshot.group_ranks(group);
        buckets.entry(ranks.worst()).or_default().push(StandingsEntry {
            group: group.clone(),
            ranks,
        });
    }

    buckets
}

/// The qualification-cutoff query: every group whose four ranks are all
/// within `threshold`. Equivalent to the union of all buckets <= threshold.
pub fn select_groups(snapshot: &CircuitSnapshot, threshold: usize) -> Vec<Group> {
    snapshot
        .groups
        .iter()
        .filter(|group| snapshot.group_ranks(group).within(threshold))
        .cloned()
        .collect()
}

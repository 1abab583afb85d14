use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::types::Group;

/// Convert a group -> statistic map into a group -> rank map.
///
/// Competition ranking, 1 = highest value: groups are walked in descending
/// order of value and assigned their 1-based position, except that a group
/// whose value exactly equals the previous group's value shares that group's
/// rank. The rank after a tied block skips the positions the tie consumed,
/// so values `[10, 10, 8]` rank `[1, 1, 3]`.
///
/// No secondary tie-break is applied here; exact ties are genuinely equal.
pub fn rank_groups(stats: &BTreeMap<Group, f64>) -> BTreeMap<Group, usize> {
    let mut pairs: Vec<(&Group, f64)> = stats.iter().map(|(g, &v)| (g, v)).collect();
    pairs.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    let mut ranks = BTreeMap::new();
    let mut prev_value = f64::NAN;
    let mut prev_rank = 0;

    for (position, (group, value)) in pairs.into_iter().enumerate() {
        let rank = if value == prev_value {
            prev_rank
        } else {
            position + 1
        };
        ranks.insert(group.clone(), rank);
        prev_value = value;
        prev_rank = rank;
    }

    ranks
}

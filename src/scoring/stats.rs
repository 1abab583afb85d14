use std::collections::BTreeMap;

use super::types::Group;

/// Arithmetic mean. The mean of an empty slice is 0 so that downstream
/// arithmetic stays total.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of a slice. Even-length input yields the mean of the two middle
/// sorted values. Empty input yields 0; circuit groups always carry at least
/// one score, so that case only arises from misuse.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Reduce each group's score list to its median and mean.
pub fn group_stats(
    scores: &BTreeMap<Group, Vec<f64>>,
) -> (BTreeMap<Group, f64>, BTreeMap<Group, f64>) {
    let mut medians = BTreeMap::new();
    let mut means = BTreeMap::new();

    for (group, values) in scores {
        medians.insert(group.clone(), median(values));
        means.insert(group.clone(), mean(values));
    }

    (medians, means)
}

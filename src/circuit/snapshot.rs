use std::collections::{BTreeMap, BTreeSet};

use crate::scoring::stats::{group_stats, mean};
use crate::scoring::types::{EventResult, Group};
use crate::scoring::rank_groups;

use super::aggregate::{attendance, build_totals};

/// A group's four circuit statistics. Missing entries default to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStats {
    /// Median of raw scores across the circuit.
    pub absolute_median: f64,
    /// Mean of raw scores across the circuit.
    pub absolute_mean: f64,
    /// Median of normalized scores across the circuit.
    pub relative_median: f64,
    /// Mean of normalized scores across the circuit.
    pub relative_mean: f64,
}

/// A group's four circuit ranks plus the field size.
///
/// A group missing from a rank map is ranked at `total`, the worst possible
/// position; it is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRanks {
    pub absolute_median: usize,
    pub absolute_mean: usize,
    pub relative_median: usize,
    pub relative_mean: usize,
    pub total: usize,
}

impl GroupRanks {
    /// The worst of the four ranks, i.e. the group's threshold bucket.
    pub fn worst(&self) -> usize {
        self.absolute_median
            .max(self.absolute_mean)
            .max(self.relative_median)
            .max(self.relative_mean)
    }

    /// Whether every rank is within the given qualification threshold.
    pub fn within(&self, threshold: usize) -> bool {
        self.worst() <= threshold
    }
}

/// The state of the circuit after a selected prefix of the season's events.
///
/// Assembled in one shot once every selected event's result is available,
/// then never mutated; a new selection builds a wholly new snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitSnapshot {
    pub season: String,
    /// The selected event ids, in season order.
    pub selected_events: Vec<String>,
    pub event_results: BTreeMap<String, EventResult>,
    /// Union of every event's competing groups.
    pub groups: BTreeSet<Group>,
    /// Events each group appeared at, in selection order.
    pub attendance: BTreeMap<Group, Vec<String>>,

    pub absolute_median: BTreeMap<Group, f64>,
    pub absolute_mean: BTreeMap<Group, f64>,
    pub relative_median: BTreeMap<Group, f64>,
    pub relative_mean: BTreeMap<Group, f64>,

    pub absolute_median_rank: BTreeMap<Group, usize>,
    pub absolute_mean_rank: BTreeMap<Group, usize>,
    pub relative_median_rank: BTreeMap<Group, usize>,
    pub relative_mean_rank: BTreeMap<Group, usize>,

    pub avg_groups_per_event: f64,
    pub avg_judges_per_event: f64,
    pub avg_events_per_group: f64,
}

impl CircuitSnapshot {
    /// Build the snapshot from per-event results: concatenate totals, reduce
    /// to the four statistic maps, rank each, and compute circuit-wide
    /// summary averages.
    pub fn assemble(
        season: impl Into<String>,
        selected_events: Vec<String>,
        event_results: BTreeMap<String, EventResult>,
    ) -> Self {
        let totals = build_totals(&selected_events, &event_results);
        let groups: BTreeSet<Group> = totals.raw.keys().cloned().collect();
        let attendance = attendance(&selected_events, &event_results);

        let (absolute_median, absolute_mean) = group_stats(&totals.raw);
        let (relative_median, relative_mean) = group_stats(&totals.normalized);

        let absolute_median_rank = rank_groups(&absolute_median);
        let absolute_mean_rank = rank_groups(&absolute_mean);
        let relative_median_rank = rank_groups(&relative_median);
        let relative_mean_rank = rank_groups(&relative_mean);

        let groups_per_event: Vec<f64> = event_results
            .values()
            .map(|result| result.raw.len() as f64)
            .collect();
        let judges_per_event: Vec<f64> = event_results
            .values()
            .map(|result| result.judge_averages.len() as f64)
            .collect();
        let events_per_group: Vec<f64> =
            attendance.values().map(|events| events.len() as f64).collect();

        Self {
            season: season.into(),
            selected_events,
            event_results,
            groups,
            attendance,
            absolute_median,
            absolute_mean,
            relative_median,
            relative_mean,
            absolute_median_rank,
            absolute_mean_rank,
            relative_median_rank,
            relative_mean_rank,
            avg_groups_per_event: mean(&groups_per_event),
            avg_judges_per_event: mean(&judges_per_event),
            avg_events_per_group: mean(&events_per_group),
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// One group's four statistics, 0 where the group has no entry.
    pub fn group_stats(&self, group: &str) -> GroupStats {
        GroupStats {
            absolute_median: self.absolute_median.get(group).copied().unwrap_or(0.0),
            absolute_mean: self.absolute_mean.get(group).copied().unwrap_or(0.0),
            relative_median: self.relative_median.get(group).copied().unwrap_or(0.0),
            relative_mean: self.relative_mean.get(group).copied().unwrap_or(0.0),
        }
    }

    /// One group's four ranks, defaulting to the total group count where the
    /// group is unranked.
    pub fn group_ranks(&self, group: &str) -> GroupRanks {
        let total = self.group_count();
        GroupRanks {
            absolute_median: self.absolute_median_rank.get(group).copied().unwrap_or(total),
            absolute_mean: self.absolute_mean_rank.get(group).copied().unwrap_or(total),
            relative_median: self.relative_median_rank.get(group).copied().unwrap_or(total),
            relative_mean: self.relative_mean_rank.get(group).copied().unwrap_or(total),
            total,
        }
    }
}

use std::collections::BTreeMap;

use crate::scoring::types::{EventResult, Group};

/// Every group's scores concatenated across the selected events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CircuitTotals {
    pub raw: BTreeMap<Group, Vec<f64>>,
    pub normalized: BTreeMap<Group, Vec<f64>>,
}

/// Concatenate each group's raw and normalized score lists across events,
/// in the given event order.
///
/// A group absent from an event contributes nothing for that event, not a
/// zero-filled gap. The normalized concatenation is position-for-position
/// aligned with the raw one.
pub fn build_totals(order: &[String], results: &BTreeMap<String, EventResult>) -> CircuitTotals {
    let mut totals = CircuitTotals::default();

    for event in order {
        let Some(result) = results.get(event) else {
            continue;
        };
        for (group, scores) in &result.raw {
            totals
                .raw
                .entry(group.clone())
                .or_default()
                .extend_from_slice(scores);
            if let Some(normalized) = result.normalized.get(group) {
                totals
                    .normalized
                    .entry(group.clone())
                    .or_default()
                    .extend_from_slice(normalized);
            }
        }
    }

    totals
}

/// For each group, the events it appeared at, in selection order.
pub fn attendance(
    order: &[String],
    results: &BTreeMap<String, EventResult>,
) -> BTreeMap<Group, Vec<String>> {
    let mut attended: BTreeMap<Group, Vec<String>> = BTreeMap::new();

    for event in order {
        let Some(result) = results.get(event) else {
            continue;
        };
        for group in result.raw.keys() {
            attended.entry(group.clone()).or_default().push(event.clone());
        }
    }

    attended
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::normalize_event;
    use crate::scoring::types::{FetchStatus, ScoreMatrix};

    fn event(rows: &[(&str, &[f64])], judges: usize) -> EventResult {
        let raw: ScoreMatrix = rows
            .iter()
            .map(|(group, scores)| (group.to_string(), scores.to_vec()))
            .collect();
        normalize_event(raw, judges, FetchStatus::Fetched)
    }

    #[test]
    fn test_concatenation_preserves_event_order() {
        let order = vec!["e1".to_string(), "e2".to_string()];
        let mut results = BTreeMap::new();
        results.insert("e1".to_string(), event(&[("Alpha", &[80.0, 90.0])], 2));
        results.insert("e2".to_string(), event(&[("Alpha", &[70.0, 60.0])], 2));

        let totals = build_totals(&order, &results);

        assert_eq!(totals.raw["Alpha"], vec![80.0, 90.0, 70.0, 60.0]);
        assert_eq!(totals.normalized["Alpha"].len(), 4);
    }

    #[test]
    fn test_absence_contributes_nothing() {
        let order = vec!["e1".to_string(), "e2".to_string()];
        let mut results = BTreeMap::new();
        results.insert(
            "e1".to_string(),
            event(&[("Alpha", &[80.0]), ("Beta", &[75.0])], 1),
        );
        results.insert("e2".to_string(), event(&[("Alpha", &[85.0])], 1));

        let totals = build_totals(&order, &results);

        assert_eq!(totals.raw["Alpha"].len(), 2);
        assert_eq!(totals.raw["Beta"], vec![75.0]);
    }

    #[test]
    fn test_attendance_in_selection_order() {
        let order = vec!["e1".to_string(), "e2".to_string(), "e3".to_string()];
        let mut results = BTreeMap::new();
        results.insert("e1".to_string(), event(&[("Alpha", &[80.0])], 1));
        results.insert("e2".to_string(), event(&[("Beta", &[70.0])], 1));
        results.insert(
            "e3".to_string(),
            event(&[("Alpha", &[85.0]), ("Beta", &[72.0])], 1),
        );

        let attended = attendance(&order, &results);

        assert_eq!(attended["Alpha"], vec!["e1".to_string(), "e3".to_string()]);
        assert_eq!(attended["Beta"], vec!["e2".to_string(), "e3".to_string()]);
    }

    #[test]
    fn test_empty_event_adds_no_groups() {
        let order = vec!["e1".to_string()];
        let mut results = BTreeMap::new();
        results.insert("e1".to_string(), event(&[], 0));

        let totals = build_totals(&order, &results);
        assert!(totals.raw.is_empty());
        assert!(attendance(&order, &results).is_empty());
    }
}

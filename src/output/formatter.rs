use std::collections::BTreeMap;
use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::circuit::snapshot::{CircuitSnapshot, GroupRanks, GroupStats};
use crate::circuit::standings::StandingsEntry;
use crate::config::SeasonConfig;
use crate::scoring::types::FetchStatus;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a statistic with two decimals, the precision shown on the sheets
pub fn format_stat(value: f64) -> String {
    format!("{:.2}", value)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a group name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn status_label(status: &FetchStatus) -> String {
    match status {
        FetchStatus::Cached => "cached".to_string(),
        FetchStatus::Fetched => "fetched".to_string(),
        FetchStatus::MissingSheet => "no sheet".to_string(),
        FetchStatus::Failed(reason) => format!("failed: {}", reason),
    }
}

/// Format the published standings as a table.
///
/// One line per group: threshold bucket, group name, then the four ranks
/// (absolute median/mean, relative median/mean) behind it.
pub fn format_standings_table(
    buckets: &BTreeMap<usize, Vec<StandingsEntry>>,
    use_colors: bool,
) -> String {
    if buckets.is_empty() {
        return "No groups found.".to_string();
    }

    let name_width = buckets
        .values()
        .flatten()
        .map(|entry| entry.group.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(5, max_name_width());

    let header = format!(
        "{:>4}  {:<name_width$}  {:>4} {:>5} {:>4} {:>5}",
        "Thr", "Group", "aMed", "aMean", "rMed", "rMean",
        name_width = name_width
    );

    let mut lines = Vec::with_capacity(1 + buckets.values().map(Vec::len).sum::<usize>());
    lines.push(if use_colors {
        header.dimmed().to_string()
    } else {
        header
    });

    for (bucket, entries) in buckets {
        for entry in entries {
            let ranks = &entry.ranks;
            let line = format!(
                "{:>4}  {:<name_width$}  {:>4} {:>5} {:>4} {:>5}",
                bucket,
                truncate_name(&entry.group, name_width),
                ranks.absolute_median,
                ranks.absolute_mean,
                ranks.relative_median,
                ranks.relative_mean,
                name_width = name_width
            );
            lines.push(if use_colors {
                // The bucket column is the headline number.
                let colored_bucket = format!("{:>4}", bucket).bold().to_string();
                format!("{}{}", colored_bucket, &line[4..])
            } else {
                line
            });
        }
    }

    lines.join("\n")
}

/// Keep the group column from swallowing a narrow terminal.
fn max_name_width() -> usize {
    match get_terminal_width() {
        Some(width) if width > 40 => width - 30,
        Some(_) => 20,
        None => 64,
    }
}

/// Format the standings in the circuit's interchange CSV shape:
/// `Threshold,Groups` with space-joined group names per threshold.
pub fn format_standings_csv(buckets: &BTreeMap<usize, Vec<StandingsEntry>>) -> String {
    let mut out = String::from("Threshold,Groups\n");
    for (bucket, entries) in buckets {
        let groups: Vec<&str> = entries.iter().map(|e| e.group.as_str()).collect();
        out.push_str(&format!("{},{}\n", bucket, groups.join(" ")));
    }
    out
}

/// Format a single group with detailed multi-line output
pub fn format_group_detail(
    group: &str,
    stats: &GroupStats,
    ranks: &GroupRanks,
    attendance: &[String],
    use_colors: bool,
) -> String {
    let attended = if attendance.is_empty() {
        "none".to_string()
    } else {
        attendance.join(", ")
    };

    if use_colors {
        format!(
            "{}\n  Absolute median: {} (rank {} of {})\n  Absolute mean:   {} (rank {} of {})\n  Relative median: {} (rank {} of {})\n  Relative mean:   {} (rank {} of {})\n  Attended: {}",
            group.bold(),
            format_stat(stats.absolute_median),
            ranks.absolute_median,
            ranks.total,
            format_stat(stats.absolute_mean),
            ranks.absolute_mean,
            ranks.total,
            format_stat(stats.relative_median),
            ranks.relative_median,
            ranks.total,
            format_stat(stats.relative_mean),
            ranks.relative_mean,
            ranks.total,
            attended.cyan()
        )
    } else {
        format!(
            "{}\n  Absolute median: {} (rank {} of {})\n  Absolute mean:   {} (rank {} of {})\n  Relative median: {} (rank {} of {})\n  Relative mean:   {} (rank {} of {})\n  Attended: {}",
            group,
            format_stat(stats.absolute_median),
            ranks.absolute_median,
            ranks.total,
            format_stat(stats.absolute_mean),
            ranks.absolute_mean,
            ranks.total,
            format_stat(stats.relative_median),
            ranks.relative_median,
            ranks.total,
            format_stat(stats.relative_mean),
            ranks.relative_mean,
            ranks.total,
            attended
        )
    }
}

/// Format a per-event summary of the snapshot, one line per selected event
pub fn format_events_summary(
    snapshot: &CircuitSnapshot,
    season_cfg: &SeasonConfig,
    use_colors: bool,
) -> String {
    if snapshot.selected_events.is_empty() {
        return "No events selected.".to_string();
    }

    snapshot
        .selected_events
        .iter()
        .map(|event| {
            let Some(result) = snapshot.event_results.get(event) else {
                return format!("{}: no result", event);
            };
            let name = season_cfg.event_name(event);
            let status = status_label(&result.status);

            let line = format!(
                "{}  {} groups, {} judges  max {} min {}",
                name,
                result.raw.len(),
                result.judge_averages.len(),
                format_stat(result.max),
                format_stat(result.min),
            );

            if use_colors {
                let status = if result.status.is_ok() {
                    format!("[{}]", status).dimmed().to_string()
                } else {
                    format!("[{}]", status).red().to_string()
                };
                format!("{}  {}", line, status)
            } else {
                format!("{}  [{}]", line, status)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::snapshot::GroupRanks;

    fn entry(group: &str, ranks: [usize; 4], total: usize) -> StandingsEntry {
        StandingsEntry {
            group: group.to_string(),
            ranks: GroupRanks {
                absolute_median: ranks[0],
                absolute_mean: ranks[1],
                relative_median: ranks[2],
                relative_mean: ranks[3],
                total,
            },
        }
    }

    fn sample_buckets() -> BTreeMap<usize, Vec<StandingsEntry>> {
        let mut buckets = BTreeMap::new();
        buckets.insert(1, vec![entry("Alpha", [1, 1, 1, 1], 3)]);
        buckets.insert(
            3,
            vec![
                entry("Beta", [2, 3, 2, 1], 3),
                entry("Gamma", [3, 2, 3, 3], 3),
            ],
        );
        buckets
    }

    #[test]
    fn test_format_standings_table_empty() {
        let buckets = BTreeMap::new();
        assert_eq!(format_standings_table(&buckets, false), "No groups found.");
    }

    #[test]
    fn test_format_standings_table_rows() {
        let result = format_standings_table(&sample_buckets(), false);
        let lines: Vec<&str> = result.lines().collect();

        // Header plus three group rows, buckets ascending.
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Group"));
        assert!(lines[1].contains("Alpha"));
        assert!(lines[1].trim_start().starts_with('1'));
        assert!(lines[2].contains("Beta"));
        assert!(lines[3].contains("Gamma"));
    }

    #[test]
    fn test_format_standings_csv() {
        let result = format_standings_csv(&sample_buckets());
        assert_eq!(result, "Threshold,Groups\n1,Alpha\n3,Beta Gamma\n");
    }

    #[test]
    fn test_format_standings_csv_empty() {
        let buckets = BTreeMap::new();
        assert_eq!(format_standings_csv(&buckets), "Threshold,Groups\n");
    }

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat(98.456), "98.46");
        assert_eq!(format_stat(100.0), "100.00");
    }

    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("Short", 20), "Short");
    }

    #[test]
    fn test_truncate_name_long() {
        assert_eq!(truncate_name("The Longest Group Name", 12), "The Longe...");
    }

    #[test]
    fn test_truncate_name_very_narrow() {
        assert_eq!(truncate_name("Hello world", 3), "Hel");
    }

    #[test]
    fn test_format_group_detail() {
        let stats = GroupStats {
            absolute_median: 88.5,
            absolute_mean: 87.25,
            relative_median: 101.0,
            relative_mean: 100.5,
        };
        let ranks = GroupRanks {
            absolute_median: 2,
            absolute_mean: 1,
            relative_median: 3,
            relative_mean: 1,
            total: 12,
        };
        let attendance = vec!["jamhattan".to_string(), "bosstown".to_string()];

        let result = format_group_detail("Alpha", &stats, &ranks, &attendance, false);

        assert!(result.contains("Alpha"));
        assert!(result.contains("Absolute median: 88.50 (rank 2 of 12)"));
        assert!(result.contains("Relative mean:   100.50 (rank 1 of 12)"));
        assert!(result.contains("Attended: jamhattan, bosstown"));
    }

    #[test]
    fn test_format_group_detail_no_attendance() {
        let stats = GroupStats {
            absolute_median: 0.0,
            absolute_mean: 0.0,
            relative_median: 0.0,
            relative_mean: 0.0,
        };
        let ranks = GroupRanks {
            absolute_median: 5,
            absolute_mean: 5,
            relative_median: 5,
            relative_mean: 5,
            total: 5,
        };

        let result = format_group_detail("Ghost", &stats, &ranks, &[], false);
        assert!(result.contains("Attended: none"));
    }

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(&FetchStatus::Cached), "cached");
        assert_eq!(
            status_label(&FetchStatus::Failed("timeout".to_string())),
            "failed: timeout"
        );
    }
}

use anyhow::{bail, Context, Result};

use crate::scoring::types::ScoreMatrix;

/// Column header that closes the raw-score block.
const CONVERTED_MARKER: &str = "Converted Scores";

/// Trailing per-row result columns (average, sanity, placing) that sit to
/// the right of the converted-score block.
const RESULT_COLUMNS: usize = 3;

/// Extract the raw score matrix and judge count from a sheet's cell grid.
///
/// The first header row carries the column markers: the raw block is headed
/// by the last `...Scores...` column before `Converted Scores` (usually
/// "Raw Scores", after a penalty "Scores after Time Deduction") and
/// the judge count is the distance between the two markers. Each group row
/// has the group name in column 0 and its raw scores in the block
/// `[len - 3 - 2*judges, len - 3 - judges)`.
pub fn parse_score_matrix(values: &[Vec<String>]) -> Result<(ScoreMatrix, usize)> {
    let header = values.first().context("Sheet has no header row")?;

    let converted_idx = header
        .iter()
        .position(|cell| cell == CONVERTED_MARKER)
        .context("Sheet has no 'Converted Scores' column")?;
    let raw_idx = header
        .iter()
        .rposition(|cell| cell.contains("Scores") && cell != CONVERTED_MARKER)
        .context("Sheet has no raw-score column marker")?;

    if converted_idx <= raw_idx {
        bail!("Score column markers are out of order");
    }
    let judge_count = converted_idx - raw_idx;

    let mut matrix = ScoreMatrix::new();

    // The two header rows are followed by one row per competing group.
    for row in values.iter().skip(2) {
        let Some(group) = row.first().filter(|name| !name.is_empty()) else {
            continue;
        };

        let needed = 1 + 2 * judge_count + RESULT_COLUMNS;
        if row.len() < needed {
            bail!(
                "Row for '{}' has {} columns, expected at least {}",
                group,
                row.len(),
                needed
            );
        }

        let start = row.len() - RESULT_COLUMNS - 2 * judge_count;
        let end = row.len() - RESULT_COLUMNS - judge_count;
        let scores = row[start..end]
            .iter()
            .map(|cell| {
                cell.trim()
                    .parse::<f64>()
                    .with_context(|| format!("Bad score '{}' for group '{}'", cell, group))
            })
            .collect::<Result<Vec<f64>>>()?;

        matrix.insert(group.clone(), scores);
    }

    Ok((matrix, judge_count))
}

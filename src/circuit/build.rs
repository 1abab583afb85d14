use std::collections::BTreeMap;

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};

use crate::config::SeasonConfig;
use crate::scoring::normalize_event;
use crate::scoring::types::EventResult;
use crate::sheets::RawScoreProvider;

/// Fetch, normalize, and assemble a circuit snapshot for a prefix of the
/// season's events.
///
/// `events` selects the first N events of the season order; `None` selects
/// them all. Requesting more events than the season defines is rejected
/// before any fetch is issued.
///
/// Fetches run concurrently: each event's result depends only on its own
/// matrix, and the provider serializes its cache writes. Results are
/// reassembled in season order, so completion order never affects the
/// snapshot.
pub async fn build_snapshot<P: RawScoreProvider>(
    provider: &P,
    season: &str,
    season_cfg: &SeasonConfig,
    events: Option<usize>,
    verbose: bool,
) -> Result<super::CircuitSnapshot> {
    let available = season_cfg.order.len();
    let count = events.unwrap_or(available);
    if count > available {
        anyhow::bail!(
            "Invalid selection: {} events requested but season {} defines {}",
            count,
            season,
            available
        );
    }

    let selected: Vec<String> = season_cfg.order[..count].to_vec();

    let mut futures = FuturesUnordered::new();
    for event in selected.clone() {
        futures.push(async move {
            let scores = provider.get_raw_scores(season, &event).await;
            (event, scores)
        });
    }

    let mut results: BTreeMap<String, EventResult> = BTreeMap::new();
    while let Some((event, scores)) = futures.next().await {
        if verbose {
            eprintln!(
                "  {}: {} groups, {} judges ({:?})",
                event,
                scores.matrix.len(),
                scores.judge_count,
                scores.status
            );
        }
        results.insert(
            event,
            normalize_event(scores.matrix, scores.judge_count, scores.status),
        );
    }

    Ok(super::CircuitSnapshot::assemble(season, selected, results))
}

use std::collections::BTreeMap;

use chrono::Utc;

use crate::config::Config;
use crate::scoring::types::{FetchStatus, RawScores};

use super::cache::{CachedScores, ScoreCache};
use super::client::SheetsClient;
use super::fetch::fetch_sheet_values;
use super::parse::parse_score_matrix;
use super::RawScoreProvider;

/// Score provider backed by Google Sheets with an on-disk cache.
///
/// Fail-open: a missing sheet id, a network error, or a parse error all
/// degrade to an empty event with the reason in the status, logged to
/// stderr. Callers treat that as "event contributed nothing".
pub struct GSheetsProvider {
    client: SheetsClient,
    cache: ScoreCache,
    /// season id -> event id -> spreadsheet id, from the season catalog.
    sheet_ids: BTreeMap<String, BTreeMap<String, String>>,
    use_cache: bool,
}

impl GSheetsProvider {
    pub fn new(client: SheetsClient, config: &Config, cache: ScoreCache, use_cache: bool) -> Self {
        let sheet_ids = config
            .seasons
            .iter()
            .map(|(season, season_cfg)| (season.clone(), season_cfg.sheet_ids.clone()))
            .collect();

        Self {
            client,
            cache,
            sheet_ids,
            use_cache,
        }
    }

    fn sheet_id(&self, season: &str, event: &str) -> Option<&String> {
        self.sheet_ids.get(season).and_then(|events| events.get(event))
    }
}

impl RawScoreProvider for GSheetsProvider {
    async fn get_raw_scores(&self, season: &str, event: &str) -> RawScores {
        if self.use_cache {
            if let Some(hit) = self.cache.get(season, event) {
                return RawScores {
                    matrix: hit.matrix,
                    judge_count: hit.judge_count,
                    status: FetchStatus::Cached,
                };
            }
        }

        let Some(sheet_id) = self.sheet_id(season, event) else {
            return RawScores::empty(FetchStatus::MissingSheet);
        };

        let fetched = match fetch_sheet_values(&self.client, sheet_id).await {
            Ok(values) => parse_score_matrix(&values),
            Err(e) => Err(e),
        };

        match fetched {
            Ok((matrix, judge_count)) => {
                self.cache.put(
                    season,
                    event,
                    CachedScores {
                        matrix: matrix.clone(),
                        judge_count,
                        fetched_at: Utc::now(),
                    },
                );
                RawScores {
                    matrix,
                    judge_count,
                    status: FetchStatus::Fetched,
                }
            }
            Err(e) => {
                eprintln!("Warning: failed to load scores for {} / {}: {}", season, event, e);
                RawScores::empty(FetchStatus::Failed(e.to_string()))
            }
        }
    }
}

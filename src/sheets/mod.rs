pub mod cache;
pub mod client;
pub mod fetch;
pub mod parse;
pub mod provider;

pub use cache::{clear_cache, get_cache_path, CachedScores, ScoreCache};
pub use client::{create_client, SheetsClient};
pub use provider::GSheetsProvider;

use crate::scoring::types::RawScores;

/// Source of raw score matrices, one call per (season, event).
///
/// Total by contract: any failure degrades to an empty matrix with a judge
/// count of 0 and a status explaining why, so one bad event never aborts a
/// circuit build.
pub trait RawScoreProvider {
    fn get_raw_scores(
        &self,
        season: &str,
        event: &str,
    ) -> impl std::future::Future<Output = RawScores> + Send;
}

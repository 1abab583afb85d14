use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::config::SeasonConfig;
use crate::sheets::RawScoreProvider;

use super::build::build_snapshot;
use super::snapshot::CircuitSnapshot;

/// Proof of which build request a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildTicket {
    generation: u64,
}

/// Publishes circuit snapshots, newest request wins.
///
/// Every request takes a ticket from a monotonically increasing generation
/// counter; a finished build is only published while its ticket is still the
/// newest. A slow build superseded by a later request is discarded instead
/// of overwriting the newer result.
#[derive(Default)]
pub struct CircuitService {
    generation: AtomicU64,
    latest: Mutex<Option<Arc<CircuitSnapshot>>>,
}

impl CircuitService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new build request, superseding any in flight.
    pub fn begin(&self) -> BuildTicket {
        BuildTicket {
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Publish a finished build. Returns `None`, leaving the current snapshot
    /// untouched, when a newer request has started since the ticket was
    /// taken.
    pub fn publish(
        &self,
        ticket: BuildTicket,
        snapshot: CircuitSnapshot,
    ) -> Option<Arc<CircuitSnapshot>> {
        if self.generation.load(Ordering::SeqCst) != ticket.generation {
            return None;
        }

        let snapshot = Arc::new(snapshot);
        *self.latest.lock().unwrap() = Some(snapshot.clone());
        Some(snapshot)
    }

    /// The most recently published snapshot, if any.
    pub fn latest(&self) -> Option<Arc<CircuitSnapshot>> {
        self.latest.lock().unwrap().clone()
    }

    /// Build and publish in one step. Fails if the build itself fails or if
    /// the request was superseded while the build ran.
    pub async fn request<P: RawScoreProvider>(
        &self,
        provider: &P,
        season: &str,
        season_cfg: &SeasonConfig,
        events: Option<usize>,
        verbose: bool,
    ) -> Result<Arc<CircuitSnapshot>> {
        let ticket = self.begin();
        let snapshot = build_snapshot(provider, season, season_cfg, events, verbose).await?;
        self.publish(ticket, snapshot)
            .ok_or_else(|| anyhow::anyhow!("Build superseded by a newer request"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn snapshot(season: &str) -> CircuitSnapshot {
        CircuitSnapshot::assemble(season, vec![], BTreeMap::new())
    }

    #[test]
    fn test_current_build_publishes() {
        let service = CircuitService::new();

        let ticket = service.begin();
        let published = service.publish(ticket, snapshot("a"));

        assert!(published.is_some());
        assert_eq!(service.latest().unwrap().season, "a");
    }

    #[test]
    fn test_stale_build_is_discarded() {
        let service = CircuitService::new();

        let stale = service.begin();
        let current = service.begin();

        // The newer request finishes first.
        assert!(service.publish(current, snapshot("new")).is_some());

        // The older build completes afterwards and must not overwrite it.
        assert!(service.publish(stale, snapshot("old")).is_none());
        assert_eq!(service.latest().unwrap().season, "new");
    }

    #[test]
    fn test_stale_build_with_nothing_published_yet() {
        let service = CircuitService::new();

        let stale = service.begin();
        let _current = service.begin();

        assert!(service.publish(stale, snapshot("old")).is_none());
        assert!(service.latest().is_none());
    }
}

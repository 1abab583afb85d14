use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::scoring::types::ScoreMatrix;

/// Get the platform-appropriate score cache directory
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("circuit-standings/score-cache"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/circuit-standings/score-cache",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Clear the score cache directory
pub fn clear_cache() -> Result<()> {
    let cache_path = get_cache_path();
    match std::fs::remove_dir_all(&cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}

/// One cached fetch result for a (season, event) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedScores {
    pub matrix: ScoreMatrix,
    pub judge_count: usize,
    pub fetched_at: DateTime<Utc>,
}

/// Disk-persistent score cache keyed by (season, event).
///
/// Uses cacache for disk persistence and an in-memory HashMap for fast
/// repeat access. All mutation goes through one lock, and the disk write
/// happens while it is held, so concurrent per-event fetches cannot
/// interleave writes to the store.
#[derive(Clone)]
pub struct ScoreCache {
    inner: Arc<Mutex<HashMap<String, CachedScores>>>,
    cache_path: PathBuf,
}

impl ScoreCache {
    pub fn new(cache_path: PathBuf) -> Self {
        // Disk entries are loaded on demand, not pre-loaded.
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            cache_path,
        }
    }

    fn key(season: &str, event: &str) -> String {
        format!("{}/{}", season, event)
    }

    /// Look up a (season, event) pair, falling back to disk on a memory miss.
    pub fn get(&self, season: &str, event: &str) -> Option<CachedScores> {
        let key = Self::key(season, event);

        {
            let data = self.inner.lock().unwrap();
            if let Some(entry) = data.get(&key) {
                return Some(entry.clone());
            }
        }

        self.load_from_disk(&key)
    }

    /// Store a fetch result in memory and on disk.
    pub fn put(&self, season: &str, event: &str, entry: CachedScores) {
        let key = Self::key(season, event);

        let mut data = self.inner.lock().unwrap();
        data.insert(key.clone(), entry.clone());

        // Disk write is best effort; a failed write only costs a refetch.
        if let Ok(serialized) = serde_json::to_vec(&entry) {
            let _ = cacache::write_sync(&self.cache_path, &key, &serialized);
        }
    }

    fn load_from_disk(&self, key: &str) -> Option<CachedScores> {
        let bytes = cacache::read_sync(&self.cache_path, key).ok()?;
        let entry: CachedScores = serde_json::from_slice(&bytes).ok()?;

        // Populate the in-memory layer for subsequent hits.
        let mut data = self.inner.lock().unwrap();
        data.insert(key.to_string(), entry.clone());

        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache(name: &str) -> ScoreCache {
        let path = std::env::temp_dir().join(format!("circuit-standings-test-{}", name));
        let _ = std::fs::remove_dir_all(&path);
        ScoreCache::new(path)
    }

    fn entry(score: f64) -> CachedScores {
        let mut matrix = ScoreMatrix::new();
        matrix.insert("Alpha".to_string(), vec![score, score + 1.0]);
        CachedScores {
            matrix,
            judge_count: 2,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_miss_on_empty_cache() {
        let cache = temp_cache("miss");
        assert!(cache.get("2023-2024", "jamhattan").is_none());
    }

    #[test]
    fn test_put_then_get_roundtrip() {
        let cache = temp_cache("roundtrip");
        cache.put("2023-2024", "jamhattan", entry(88.0));

        let hit = cache.get("2023-2024", "jamhattan").unwrap();
        assert_eq!(hit.judge_count, 2);
        assert_eq!(hit.matrix["Alpha"], vec![88.0, 89.0]);
    }

    #[test]
    fn test_survives_memory_loss() {
        let path = std::env::temp_dir().join("circuit-standings-test-disk");
        let _ = std::fs::remove_dir_all(&path);

        ScoreCache::new(path.clone()).put("2023-2024", "bosstown", entry(75.0));

        // A fresh instance has an empty memory layer and must hit disk.
        let reopened = ScoreCache::new(path);
        let hit = reopened.get("2023-2024", "bosstown").unwrap();
        assert_eq!(hit.matrix["Alpha"], vec![75.0, 76.0]);
    }

    #[test]
    fn test_seasons_do_not_collide() {
        let cache = temp_cache("seasons");
        cache.put("2022-2023", "jamhattan", entry(60.0));
        cache.put("2023-2024", "jamhattan", entry(90.0));

        assert_eq!(
            cache.get("2022-2023", "jamhattan").unwrap().matrix["Alpha"],
            vec![60.0, 61.0]
        );
        assert_eq!(
            cache.get("2023-2024", "jamhattan").unwrap().matrix["Alpha"],
            vec![90.0, 91.0]
        );
    }
}

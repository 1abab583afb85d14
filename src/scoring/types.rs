use std::collections::BTreeMap;

/// A competing group, identified by its display name.
pub type Group = String;

/// Raw or normalized scores for one event: group -> one score per judge.
///
/// Positions are aligned across groups: index `i` in every row refers to the
/// same judge. All rows in a matrix have the same length, the event's judge
/// count. A zero-length row set is legal and means "no data".
pub type ScoreMatrix = BTreeMap<Group, Vec<f64>>;

/// How an event's raw scores were obtained.
///
/// Carried through `EventResult` so a fetch failure stays distinguishable
/// from an event that genuinely had no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// Served from the on-disk score cache.
    Cached,
    /// Fetched from the remote sheet during this run.
    Fetched,
    /// No sheet id configured for this event; nothing was fetched.
    MissingSheet,
    /// The fetch or parse failed; the event contributed no scores.
    Failed(String),
}

impl FetchStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, FetchStatus::Cached | FetchStatus::Fetched)
    }
}

/// One event's scores as returned by a score provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RawScores {
    pub matrix: ScoreMatrix,
    pub judge_count: usize,
    pub status: FetchStatus,
}

impl RawScores {
    /// An event that contributed nothing, with the reason recorded.
    pub fn empty(status: FetchStatus) -> Self {
        Self {
            matrix: ScoreMatrix::new(),
            judge_count: 0,
            status,
        }
    }
}

/// A single event's scores after judge-bias correction.
///
/// Built once per (season, event) fetch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EventResult {
    /// Scores as entered by the judges.
    pub raw: ScoreMatrix,
    /// Scores rescaled so every judge's average across the field is 100.
    pub normalized: ScoreMatrix,
    /// Per-judge mean of the raw column, one entry per judge.
    pub judge_averages: Vec<f64>,
    pub raw_average: BTreeMap<Group, f64>,
    pub normalized_average: BTreeMap<Group, f64>,
    pub normalized_median: BTreeMap<Group, f64>,
    /// Highest normalized average at this event, 0 when no groups competed.
    pub max: f64,
    /// Lowest normalized average at this event, 0 when no groups competed.
    pub min: f64,
    pub status: FetchStatus,
}

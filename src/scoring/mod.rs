pub mod normalize;
pub mod ranking;
pub mod stats;
pub mod types;

pub use normalize::normalize_event;
pub use ranking::rank_groups;
pub use stats::{group_stats, mean, median};
pub use types::{EventResult, FetchStatus, Group, RawScores, ScoreMatrix};

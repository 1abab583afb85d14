pub mod aggregate;
pub mod build;
pub mod service;
pub mod snapshot;
pub mod standings;

pub use build::build_snapshot;
pub use service::{BuildTicket, CircuitService};
pub use snapshot::{CircuitSnapshot, GroupRanks, GroupStats};
pub use standings::{bucketize, select_groups, StandingsEntry};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The season catalog: every season this tool knows how to score.
///
/// Example YAML:
/// ```yaml
/// default_season: "2023-2024"
/// seasons:
///   "2023-2024":
///     order: [jamhattan, bosstown, mayhem]
///     names:
///       jamhattan: "Jamhattan Classic"
///     sheet_ids:
///       jamhattan: 1AbCdEfGh
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Season used when `--season` is not given.
    #[serde(default)]
    pub default_season: Option<String>,

    #[serde(default)]
    pub seasons: BTreeMap<String, SeasonConfig>,
}

/// One season's ordered event list and per-event metadata.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct SeasonConfig {
    /// Event ids in competition order. Authoritative for the event-count
    /// selection prefix.
    pub order: Vec<String>,

    /// Display names; an event missing here is shown by its id.
    #[serde(default)]
    pub names: BTreeMap<String, String>,

    /// Spreadsheet id per event. Events without one simply contribute no
    /// scores.
    #[serde(default)]
    pub sheet_ids: BTreeMap<String, String>,
}

impl SeasonConfig {
    pub fn event_name<'a>(&'a self, event: &'a str) -> &'a str {
        self.names.get(event).map(String::as_str).unwrap_or(event)
    }
}

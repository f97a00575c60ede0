use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use crate::show::ShowId;

/// Context lists whose shows count as watched.
pub const WATCHED_LISTS: [&str; 4] = ["watched", "currentlyWatching", "droppedShows", "pausedShows"];

/// Context list holding watchlisted seasons.
pub const WATCHLIST_LIST: &str = "watchlist";

/// Raw `user_information` payload.
///
/// Lists are kept as JSON values so that lists with unknown names (and unknown
/// shapes) never fail deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default)]
    pub context: serde_json::Map<String, serde_json::Value>,
}

/// A season-level entry of one of the user's lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    pub show_id: ShowId,
    #[serde(default)]
    pub date_added: Option<String>,
}

/// The user's library after reduction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    /// Shows the user watched, is watching, dropped or paused
    pub watched: BTreeSet<ShowId>,
    /// Watchlisted show -> earliest date it was added
    pub watchlist: BTreeMap<ShowId, String>,
}

impl Library {
    pub fn is_empty(&self) -> bool {
        self.watched.is_empty() && self.watchlist.is_empty()
    }
}

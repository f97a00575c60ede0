use serde::{Deserialize, Serialize};
use crate::episode_ids::EpisodeIdentifierSet;
use crate::show::{Season, ShowDetails, ShowId};

/// One entry of the user's personal watch log for a season.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeLogEntry {
    pub episode_number: u32,
    pub date_added: String,
}

/// A logged episode joined with its resolved identifiers and the show/season it belongs to.
///
/// Only lives between the join step and the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedEpisode {
    pub show_id: ShowId,
    pub show_name: String,
    pub season_id: u64,
    pub season_name: String,
    pub season_number: u32,
    pub episode_number: u32,
    pub watched_at: String,
    pub ids: EpisodeIdentifierSet,
}

impl EnrichedEpisode {
    pub fn new(
        show: &ShowDetails,
        season: &Season,
        entry: &EpisodeLogEntry,
        ids: EpisodeIdentifierSet,
    ) -> Self {
        Self {
            show_id: show.id,
            show_name: show.name.clone(),
            season_id: season.id,
            season_name: season.name.clone(),
            season_number: season.season_number,
            episode_number: entry.episode_number,
            watched_at: entry.date_added.clone(),
            ids,
        }
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cross-reference ids Trakt reports for a single episode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraktEpisodeIds {
    pub trakt_id: u64,
    pub tvdb_id: Option<u64>,
    pub tmdb_id: Option<u64>,
    pub imdb_id: Option<String>,
}

/// Identifiers resolved for one (show, season, episode number) triple.
///
/// The variant depends on the resolution strategy: the Trakt strategies return
/// the four-way bundle, the Serializd catalog returns its own episode id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum EpisodeIdentifierSet {
    Trakt(TraktEpisodeIds),
    Internal { episode_id: u64 },
}

impl EpisodeIdentifierSet {
    /// The id written to the export file for this episode.
    pub fn export_id(&self) -> ExternalId {
        match self {
            EpisodeIdentifierSet::Trakt(ids) => ExternalId::Trakt(ids.trakt_id),
            // Serializd's internal episode ids are TMDB episode ids
            EpisodeIdentifierSet::Internal { episode_id } => ExternalId::Tmdb(*episode_id),
        }
    }
}

/// Episode number within a season -> identifiers. An empty map means nothing was resolvable.
pub type EpisodeIdMap = BTreeMap<u32, EpisodeIdentifierSet>;

/// The id family an export record is keyed by.
///
/// Serialized as a single `trakt_id` / `tmdb_id` field when flattened into a record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExternalId {
    #[serde(rename = "trakt_id")]
    Trakt(u64),
    #[serde(rename = "tmdb_id")]
    Tmdb(u64),
}

use serializd_models::{EnrichedEpisode, ExportRecord, ExternalId, ShowId};

/// A watchlisted show whose export id has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistExport {
    pub show_id: ShowId,
    pub id: ExternalId,
    pub watchlisted_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRecords {
    pub watched: Vec<ExportRecord>,
    pub watchlist: Vec<ExportRecord>,
}

impl ExportRecords {
    /// Watched records followed by watchlist records.
    pub fn combined(&self) -> Vec<ExportRecord> {
        self.watched.iter().chain(self.watchlist.iter()).cloned().collect()
    }
}

/// Reshape enriched episodes and resolved watchlist entries into import records.
pub fn format_records(episodes: &[EnrichedEpisode], watchlist: &[WatchlistExport]) -> ExportRecords {
    ExportRecords {
        watched: episodes
            .iter()
            .map(|episode| ExportRecord::watched_episode(episode.ids.export_id(), episode.watched_at.clone()))
            .collect(),
        watchlist: watchlist
            .iter()
            .map(|entry| ExportRecord::watchlisted_show(entry.id, entry.watchlisted_at.clone()))
            .collect(),
    }
}

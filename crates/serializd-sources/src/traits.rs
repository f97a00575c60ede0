use async_trait::async_trait;
use serializd_models::{EpisodeIdMap, EpisodeLogEntry, ExternalId, Season, ShowDetails, ShowId, UserContext};
use crate::error::SourceError;

/// Read access to the user's Serializd library.
#[async_trait]
pub trait LibrarySource: Send + Sync {
    async fn fetch_user_context(&self) -> Result<UserContext, SourceError>;

    /// Show name and seasons. Missing name or seasons is a show-level error.
    async fn fetch_show(&self, show_id: ShowId) -> Result<ShowDetails, SourceError>;

    /// First page of the user's watch log for a season.
    async fn fetch_episode_logs(&self, show_id: ShowId, season_id: u64) -> Result<Vec<EpisodeLogEntry>, SourceError>;
}

/// Per-show key used for season lookups (a Trakt or Serializd slug).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowKey {
    pub slug: String,
}

/// Maps episode numbers of a season to external identifiers.
#[async_trait]
pub trait EpisodeIdResolver: Send + Sync {
    fn strategy_name(&self) -> &str;

    async fn show_key(&self, show: &ShowDetails) -> Result<ShowKey, SourceError>;

    /// Identifiers for every episode the upstream knows in `season`.
    ///
    /// A lookup the upstream answers with 404 yields an empty map, not an error.
    async fn resolve_season(
        &self,
        show: &ShowDetails,
        key: &ShowKey,
        season: &Season,
    ) -> Result<EpisodeIdMap, SourceError>;

    /// Id used for a watchlisted show, `None` when it cannot be resolved.
    async fn watchlist_id(&self, show_id: ShowId) -> Result<Option<ExternalId>, SourceError>;
}

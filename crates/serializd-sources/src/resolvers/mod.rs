//! Episode id resolution strategies.
//!
//! - [`TraktSearchResolver`]: Trakt search by TMDB id, then the Trakt season endpoint
//! - [`TraktSlugResolver`]: Trakt season endpoint with a slug guessed from the show name
//! - [`SerializdCatalogResolver`]: Serializd's own per-season episode catalog

mod serializd_catalog;
mod trakt_search;
mod trakt_slug;

pub use serializd_catalog::SerializdCatalogResolver;
pub use trakt_search::TraktSearchResolver;
pub use trakt_slug::TraktSlugResolver;

use serializd_models::{EpisodeIdMap, ExternalId, ShowId};
use tracing::warn;
use crate::error::SourceError;
use crate::trakt::TraktClient;

/// Season lookup shared by both Trakt strategies: a 404 is logged and resolves to nothing.
pub(crate) async fn trakt_season(
    trakt: &TraktClient,
    show_name: &str,
    slug: &str,
    season_number: u32,
) -> Result<EpisodeIdMap, SourceError> {
    match trakt.season_episode_ids(slug, season_number).await? {
        Some(ids) => Ok(ids),
        None => {
            warn!(
                show = show_name,
                slug,
                season_number,
                "Error fetching season [number={}] for show [name={}, slug={}]: HTTP 404",
                season_number,
                show_name,
                slug
            );
            Ok(EpisodeIdMap::new())
        }
    }
}

/// Trakt id of a watchlisted show via the TMDB search endpoint.
pub(crate) async fn trakt_watchlist_id(trakt: &TraktClient, show_id: ShowId) -> Result<Option<ExternalId>, SourceError> {
    Ok(trakt
        .search_show_by_tmdb(show_id)
        .await?
        .map(|show| ExternalId::Trakt(show.trakt_id)))
}

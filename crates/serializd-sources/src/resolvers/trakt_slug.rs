use async_trait::async_trait;
use serializd_models::{EpisodeIdMap, ExternalId, Season, ShowDetails, ShowId};
use crate::error::SourceError;
use crate::resolvers::{trakt_season, trakt_watchlist_id};
use crate::slug::slugify;
use crate::traits::{EpisodeIdResolver, ShowKey};
use crate::trakt::TraktClient;

/// Guesses the Trakt slug from the show name instead of searching.
///
/// Guesses can miss; a missed guess surfaces as a 404 on the season lookup and
/// the season is skipped.
pub struct TraktSlugResolver {
    trakt: TraktClient,
}

impl TraktSlugResolver {
    pub fn new(trakt: TraktClient) -> Self {
        Self { trakt }
    }
}

#[async_trait]
impl EpisodeIdResolver for TraktSlugResolver {
    fn strategy_name(&self) -> &str {
        "trakt-slug"
    }

    async fn show_key(&self, show: &ShowDetails) -> Result<ShowKey, SourceError> {
        Ok(ShowKey {
            slug: slugify(&show.name),
        })
    }

    async fn resolve_season(
        &self,
        show: &ShowDetails,
        key: &ShowKey,
        season: &Season,
    ) -> Result<EpisodeIdMap, SourceError> {
        trakt_season(&self.trakt, &show.name, &key.slug, season.season_number).await
    }

    async fn watchlist_id(&self, show_id: ShowId) -> Result<Option<ExternalId>, SourceError> {
        trakt_watchlist_id(&self.trakt, show_id).await
    }
}

use async_trait::async_trait;
use serializd_models::{EpisodeIdMap, ExternalId, Season, ShowDetails, ShowId};
use tracing::debug;
use crate::error::SourceError;
use crate::resolvers::{trakt_season, trakt_watchlist_id};
use crate::traits::{EpisodeIdResolver, ShowKey};
use crate::trakt::TraktClient;

pub struct TraktSearchResolver {
    trakt: TraktClient,
}

impl TraktSearchResolver {
    pub fn new(trakt: TraktClient) -> Self {
        Self { trakt }
    }
}

#[async_trait]
impl EpisodeIdResolver for TraktSearchResolver {
    fn strategy_name(&self) -> &str {
        "trakt-search"
    }

    async fn show_key(&self, show: &ShowDetails) -> Result<ShowKey, SourceError> {
        let found = self.trakt.search_show_by_tmdb(show.id).await?;
        let show_ref = found.ok_or_else(|| SourceError::ShowNotFound {
            id: show.id,
            name: show.name.clone(),
            service: "trakt",
        })?;
        debug!(show_id = show.id, slug = %show_ref.slug, "Resolved Trakt slug");
        Ok(ShowKey { slug: show_ref.slug })
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

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use serializd_config::TraktConfig;

    fn resolver_for(server: &mockito::ServerGuard) -> TraktSearchResolver {
        let config = TraktConfig {
            base_url: server.url(),
            ..TraktConfig::default()
        };
        TraktSearchResolver::new(TraktClient::new(&config, "key".to_string()))
    }

    fn show() -> ShowDetails {
        ShowDetails {
            id: 100,
            name: "Severance".to_string(),
            seasons: vec![Season { id: 11, name: "Season 1".to_string(), season_number: 1 }],
        }
    }

    #[tokio::test]
    async fn test_show_key_from_search() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex(r"^/search/tmdb/100".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!([{"show": {"ids": {"trakt": 1, "slug": "severance-2022"}}}]).to_string())
            .create_async()
            .await;

        let resolver = resolver_for(&server);
        let key = resolver.show_key(&show()).await.unwrap();
        assert_eq!(key.slug, "severance-2022");
    }

    #[tokio::test]
    async fn test_show_key_not_found_is_show_level() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex(r"^/search/tmdb/100".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let resolver = resolver_for(&server);
        let err = resolver.show_key(&show()).await.unwrap_err();
        assert!(err.is_show_level());
    }

    #[tokio::test]
    async fn test_season_404_resolves_to_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/shows/severance-2022/seasons/1")
            .with_status(404)
            .create_async()
            .await;

        let resolver = resolver_for(&server);
        let key = ShowKey { slug: "severance-2022".to_string() };
        let show = show();
        let ids = resolver.resolve_season(&show, &key, &show.seasons[0]).await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_watchlist_id_uses_trakt_show_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex(r"^/search/tmdb/200".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!([{"show": {"ids": {"trakt": 777, "slug": "dark"}}}]).to_string())
            .create_async()
            .await;

        let resolver = resolver_for(&server);
        assert_eq!(resolver.watchlist_id(200).await.unwrap(), Some(ExternalId::Trakt(777)));
    }
}

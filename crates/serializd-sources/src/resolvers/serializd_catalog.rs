use async_trait::async_trait;
use serializd_models::{EpisodeIdMap, ExternalId, Season, ShowDetails, ShowId};
use tracing::warn;
use crate::error::SourceError;
use crate::serializd::SerializdClient;
use crate::slug::slugify;
use crate::traits::{EpisodeIdResolver, ShowKey};

/// Reads episode ids from Serializd's own season pages; needs no Trakt key.
pub struct SerializdCatalogResolver {
    serializd: SerializdClient,
    data_version: String,
}

impl SerializdCatalogResolver {
    pub fn new(serializd: SerializdClient, data_version: String) -> Self {
        Self {
            serializd,
            data_version,
        }
    }
}

#[async_trait]
impl EpisodeIdResolver for SerializdCatalogResolver {
    fn strategy_name(&self) -> &str {
        "serializd-catalog"
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
        let catalog = self
            .serializd
            .get_season_catalog(&self.data_version, &key.slug, show.id, season.season_number)
            .await?;

        match catalog {
            Some(ids) => Ok(ids),
            None => {
                warn!(
                    show = %show.name,
                    slug = %key.slug,
                    season_number = season.season_number,
                    "Season catalog not found for season [number={}] of show [name={}, slug={}]",
                    season.season_number,
                    show.name,
                    key.slug
                );
                Ok(EpisodeIdMap::new())
            }
        }
    }

    /// Serializd show ids are TMDB ids and are exported as such.
    async fn watchlist_id(&self, show_id: ShowId) -> Result<Option<ExternalId>, SourceError> {
        Ok(Some(ExternalId::Tmdb(show_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serializd_config::SerializdConfig;
    use serializd_models::EpisodeIdentifierSet;

    fn resolver_for(server: &mockito::ServerGuard) -> SerializdCatalogResolver {
        let client = SerializdClient::new(&SerializdConfig {
            base_url: server.url(),
            data_version: None,
        });
        SerializdCatalogResolver::new(client, "abc".to_string())
    }

    fn show() -> ShowDetails {
        ShowDetails {
            id: 95396,
            name: "Severance".to_string(),
            seasons: vec![Season { id: 1, name: "Season 1".to_string(), season_number: 1 }],
        }
    }

    #[tokio::test]
    async fn test_resolve_season_from_catalog() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/_next/data/abc/show/severance-95396/season/1.json")
            .with_status(200)
            .with_body(
                json!({"pageProps": {"seasonDetails": {"episodes": [{"episodeNumber": 1, "episodeId": 1981033}]}}})
                    .to_string(),
            )
            .create_async()
            .await;

        let resolver = resolver_for(&server);
        let show = show();
        let key = resolver.show_key(&show).await.unwrap();
        let ids = resolver.resolve_season(&show, &key, &show.seasons[0]).await.unwrap();
        assert_eq!(ids.get(&1), Some(&EpisodeIdentifierSet::Internal { episode_id: 1981033 }));
    }

    #[tokio::test]
    async fn test_missing_season_details_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/_next/data/abc/show/severance-95396/season/1.json")
            .with_status(200)
            .with_body(r#"{"pageProps": {}}"#)
            .create_async()
            .await;

        let resolver = resolver_for(&server);
        let show = show();
        let key = resolver.show_key(&show).await.unwrap();
        let ids = resolver.resolve_season(&show, &key, &show.seasons[0]).await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_watchlist_id_is_raw_show_id() {
        let server = mockito::Server::new_async().await;
        let resolver = resolver_for(&server);
        assert_eq!(resolver.watchlist_id(200).await.unwrap(), Some(ExternalId::Tmdb(200)));
    }
}

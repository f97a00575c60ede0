use reqwest::Client;
use serializd_config::TraktConfig;
use serializd_models::{EpisodeIdMap, ShowId};
use std::sync::Arc;
use crate::error::SourceError;
use crate::trakt::api::{self, TraktShowRef};

#[derive(Clone)]
pub struct TraktClient {
    client: Arc<Client>,
    base_url: String,
    client_id: String,
    api_version: String,
}

impl TraktClient {
    pub fn new(config: &TraktConfig, client_id: String) -> Self {
        Self {
            client: Arc::new(api::create_trakt_client()), // Use client with browser-like headers
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id,
            api_version: config.api_version.clone(),
        }
    }

    pub async fn search_show_by_tmdb(&self, show_id: ShowId) -> Result<Option<TraktShowRef>, SourceError> {
        api::search_show_by_tmdb(&self.client, &self.base_url, &self.client_id, &self.api_version, show_id).await
    }

    /// Episode ids for a season, `None` if Trakt has no such show/season (404).
    pub async fn season_episode_ids(
        &self,
        show_slug: &str,
        season_number: u32,
    ) -> Result<Option<EpisodeIdMap>, SourceError> {
        let episodes = api::get_season_episodes(
            &self.client,
            &self.base_url,
            &self.client_id,
            &self.api_version,
            show_slug,
            season_number,
        )
        .await?;
        Ok(episodes.map(api::episode_id_map))
    }
}

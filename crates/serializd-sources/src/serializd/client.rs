use async_trait::async_trait;
use reqwest::Client;
use serializd_config::SerializdConfig;
use serializd_models::{EpisodeIdMap, EpisodeLogEntry, ShowDetails, ShowId, UserContext};
use std::sync::Arc;
use tracing::info;
use crate::error::SourceError;
use crate::serializd::{api, auth};
use crate::traits::LibrarySource;

#[derive(Clone)]
pub struct SerializdClient {
    client: Arc<Client>,
    base_url: String,
    token: Option<String>,
}

impl SerializdClient {
    pub fn new(config: &SerializdConfig) -> Self {
        Self {
            client: Arc::new(auth::create_serializd_client()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Log in and keep the session token for the rest of the run.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), SourceError> {
        let token = auth::login(&self.client, &self.base_url, email, password).await?;
        self.token = Some(token);
        info!("Authenticated to Serializd");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn token(&self) -> Result<&str, SourceError> {
        self.token.as_deref().ok_or(SourceError::NotAuthenticated)
    }

    /// Serializd's own episode ids for a season; `None` when the season page is missing.
    pub async fn get_season_catalog(
        &self,
        data_version: &str,
        show_slug: &str,
        show_id: ShowId,
        season_number: u32,
    ) -> Result<Option<EpisodeIdMap>, SourceError> {
        api::get_season_catalog(
            &self.client,
            &self.base_url,
            self.token.as_deref(),
            data_version,
            show_slug,
            show_id,
            season_number,
        )
        .await
    }
}

#[async_trait]
impl LibrarySource for SerializdClient {
    async fn fetch_user_context(&self) -> Result<UserContext, SourceError> {
        api::get_user_context(&self.client, &self.base_url, self.token()?).await
    }

    async fn fetch_show(&self, show_id: ShowId) -> Result<ShowDetails, SourceError> {
        api::get_show(&self.client, &self.base_url, show_id).await
    }

    async fn fetch_episode_logs(&self, show_id: ShowId, season_id: u64) -> Result<Vec<EpisodeLogEntry>, SourceError> {
        api::get_episode_logs(&self.client, &self.base_url, self.token()?, show_id, season_id).await
    }
}

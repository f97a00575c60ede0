use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serializd_models::{EpisodeIdMap, EpisodeIdentifierSet, ShowId, TraktEpisodeIds};
use tracing::debug;
use crate::error::SourceError;
use crate::slug::path_segment;

const SERVICE: &str = "trakt";

/// Create a reqwest Client with browser-like headers to bypass Cloudflare
pub fn create_trakt_client() -> Client {
    Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36")
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktIds {
    pub trakt: Option<u64>,
    pub slug: Option<String>,
    pub tvdb: Option<u64>,
    pub tmdb: Option<u64>,
    pub imdb: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TraktShow {
    ids: TraktIds,
}

#[derive(Debug, Deserialize)]
struct TraktSearchResult {
    show: Option<TraktShow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraktEpisode {
    pub number: u32,
    pub ids: TraktIds,
}

/// Slug and numeric id of a show on Trakt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraktShowRef {
    pub slug: String,
    pub trakt_id: u64,
}

fn api_headers(client_id: &str, api_version: &str) -> Result<HeaderMap, SourceError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        "trakt-api-key",
        HeaderValue::from_str(client_id)
            .map_err(|_| SourceError::Configuration("Trakt client id contains invalid characters".to_string()))?,
    );
    headers.insert(
        "trakt-api-version",
        HeaderValue::from_str(api_version)
            .map_err(|_| SourceError::Configuration("Trakt API version contains invalid characters".to_string()))?,
    );
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// GET a Trakt endpoint. `Ok(None)` on 404, error on any other non-200 status.
async fn get_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    client_id: &str,
    api_version: &str,
) -> Result<Option<T>, SourceError> {
    debug!(endpoint, "Trakt request");
    let response = client
        .get(format!("{}{}", base_url, endpoint))
        .headers(api_headers(client_id, api_version)?)
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if status != StatusCode::OK {
        let error_text = response.text().await.unwrap_or_default();
        return Err(SourceError::UnexpectedStatus {
            service: SERVICE,
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body: error_text,
        });
    }

    Ok(Some(response.json().await?))
}

/// Look a show up by its TMDB id (Serializd show ids are TMDB ids).
///
/// Returns the first show result, `None` if Trakt has no match.
pub async fn search_show_by_tmdb(
    client: &Client,
    base_url: &str,
    client_id: &str,
    api_version: &str,
    show_id: ShowId,
) -> Result<Option<TraktShowRef>, SourceError> {
    let endpoint = format!("/search/tmdb/{}?type=show", show_id);
    let results: Option<Vec<TraktSearchResult>> =
        get_json(client, base_url, &endpoint, client_id, api_version).await?;

    let ids = results
        .unwrap_or_default()
        .into_iter()
        .find_map(|result| result.show)
        .map(|show| show.ids);

    match ids {
        Some(TraktIds {
            slug: Some(slug),
            trakt: Some(trakt_id),
            ..
        }) => Ok(Some(TraktShowRef { slug, trakt_id })),
        Some(_) => Err(SourceError::MalformedResponse {
            endpoint,
            message: "show result without slug or trakt id".to_string(),
        }),
        None => Ok(None),
    }
}

/// Episodes of one season by show slug. `None` when Trakt answers 404.
pub async fn get_season_episodes(
    client: &Client,
    base_url: &str,
    client_id: &str,
    api_version: &str,
    show_slug: &str,
    season_number: u32,
) -> Result<Option<Vec<TraktEpisode>>, SourceError> {
    let endpoint = format!("/shows/{}/seasons/{}", path_segment(show_slug), season_number);
    get_json(client, base_url, &endpoint, client_id, api_version).await
}

/// Episode number -> four-way id bundle. Episodes Trakt lists without a trakt id are left out.
pub fn episode_id_map(episodes: Vec<TraktEpisode>) -> EpisodeIdMap {
    episodes
        .into_iter()
        .filter_map(|episode| {
            let trakt_id = episode.ids.trakt?;
            Some((
                episode.number,
                EpisodeIdentifierSet::Trakt(TraktEpisodeIds {
                    trakt_id,
                    tvdb_id: episode.ids.tvdb,
                    tmdb_id: episode.ids.tmdb,
                    imdb_id: episode.ids.imdb,
                }),
            ))
        })
        .collect()
}

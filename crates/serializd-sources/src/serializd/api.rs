use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serializd_models::{
    EpisodeIdMap, EpisodeIdentifierSet, EpisodeLogEntry, Season, ShowDetails, ShowId, UserContext,
};
use tracing::{debug, warn};
use crate::error::SourceError;
use crate::serializd::auth::CREDENTIALS_COOKIE;
use crate::slug::path_segment;

const SERVICE: &str = "serializd";

#[derive(Debug, Deserialize)]
struct ShowResponse {
    name: Option<String>,
    seasons: Option<Vec<Season>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EpisodeLogPage {
    #[serde(default)]
    episode_logs: Vec<EpisodeLogEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogPage {
    page_props: Option<CatalogProps>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogProps {
    season_details: Option<CatalogSeason>,
}

#[derive(Debug, Deserialize)]
struct CatalogSeason {
    #[serde(default)]
    episodes: Vec<CatalogEpisode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEpisode {
    episode_number: u32,
    episode_id: u64,
}

fn cookie(token: &str) -> String {
    format!("{}={}", CREDENTIALS_COOKIE, token)
}

async fn ensure_success(response: Response, endpoint: &str) -> Result<Response, SourceError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();
    Err(SourceError::UnexpectedStatus {
        service: SERVICE,
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body: error_text,
    })
}

/// Fetch the user's named show lists
pub async fn get_user_context(client: &Client, base_url: &str, token: &str) -> Result<UserContext, SourceError> {
    let endpoint = "/api/user_information?shouldGetUserContext=true";
    debug!(endpoint, "Fetching Serializd user context");

    let response = client
        .get(format!("{}{}", base_url, endpoint))
        .header("Cookie", cookie(token))
        .send()
        .await?;
    let response = ensure_success(response, endpoint).await?;

    Ok(response.json().await?)
}

/// Fetch show name and seasons from the generic show endpoint
pub async fn get_show(client: &Client, base_url: &str, show_id: ShowId) -> Result<ShowDetails, SourceError> {
    let endpoint = format!("/api/show/{}", show_id);
    debug!(endpoint = %endpoint, "Fetching Serializd show");

    let response = client.get(format!("{}{}", base_url, endpoint)).send().await?;
    // Unknown or deleted shows answer 404 without a name
    if response.status() == StatusCode::NOT_FOUND {
        return Err(SourceError::MissingShowName(show_id));
    }
    let response = ensure_success(response, &endpoint).await?;
    let show: ShowResponse = response.json().await?;

    let name = show
        .name
        .filter(|name| !name.is_empty())
        .ok_or(SourceError::MissingShowName(show_id))?;

    let seasons = match show.seasons {
        Some(seasons) if !seasons.is_empty() => seasons,
        _ => return Err(SourceError::MissingSeasons { id: show_id, name }),
    };

    Ok(ShowDetails {
        id: show_id,
        name,
        seasons,
    })
}

/// Fetch page 0 of the user's watch log for a season
pub async fn get_episode_logs(
    client: &Client,
    base_url: &str,
    token: &str,
    show_id: ShowId,
    season_id: u64,
) -> Result<Vec<EpisodeLogEntry>, SourceError> {
    let endpoint = format!(
        "/mobile/page/show/{}/season_v2_part_3/0?season_id={}",
        show_id, season_id
    );
    debug!(endpoint = %endpoint, "Fetching Serializd episode logs");

    let response = client
        .get(format!("{}{}", base_url, endpoint))
        .header("Cookie", cookie(token))
        .send()
        .await?;
    if response.status() == StatusCode::NOT_FOUND {
        warn!(show_id, season_id, "No episode log page for season, treating as empty");
        return Ok(Vec::new());
    }
    let response = ensure_success(response, &endpoint).await?;
    let page: EpisodeLogPage = response.json().await?;

    Ok(page.episode_logs)
}

/// Fetch Serializd's own episode catalog for a season via the versioned data path.
///
/// Returns `None` when the page does not exist (404).
pub async fn get_season_catalog(
    client: &Client,
    base_url: &str,
    token: Option<&str>,
    data_version: &str,
    show_slug: &str,
    show_id: ShowId,
    season_number: u32,
) -> Result<Option<EpisodeIdMap>, SourceError> {
    let endpoint = format!(
        "/_next/data/{}/show/{}-{}/season/{}.json",
        path_segment(data_version),
        path_segment(show_slug),
        show_id,
        season_number
    );
    debug!(endpoint = %endpoint, "Fetching Serializd season catalog");

    let mut request = client.get(format!("{}{}", base_url, endpoint));
    if let Some(token) = token {
        request = request.header("Cookie", cookie(token));
    }
    let response = request.send().await?;

    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let response = ensure_success(response, &endpoint).await?;
    let page: CatalogPage = response.json().await?;

    let episodes = page
        .page_props
        .and_then(|props| props.season_details)
        .map(|season| season.episodes)
        .unwrap_or_default();

    Ok(Some(
        episodes
            .into_iter()
            .map(|episode| {
                (
                    episode.episode_number,
                    EpisodeIdentifierSet::Internal {
                        episode_id: episode.episode_id,
                    },
                )
            })
            .collect(),
    ))
}

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use crate::error::SourceError;

/// Header Serializd's web app sends with every API call.
pub(crate) const REQUESTED_WITH: &str = "serializd_vercel";

/// Cookie carrying the session token.
pub(crate) const CREDENTIALS_COOKIE: &str = "tvproject_credentials";

/// Create a reqwest Client with the headers the Serializd web app sends
pub fn create_serializd_client() -> Client {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert("x-requested-with", HeaderValue::from_static(REQUESTED_WITH));

    Client::builder()
        .default_headers(headers)
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// Exchange account credentials for a session token.
pub async fn login(client: &Client, base_url: &str, email: &str, password: &str) -> Result<String, SourceError> {
    if email.trim().is_empty() {
        return Err(SourceError::InvalidCredentials("email cannot be empty".to_string()));
    }
    if password.is_empty() {
        return Err(SourceError::InvalidCredentials("password cannot be empty".to_string()));
    }

    let payload = serde_json::json!({
        "email": email,
        "password": password,
    });

    debug!("Logging in to Serializd");
    let response = client
        .post(format!("{}/api/login", base_url))
        // The site posts JSON as text/plain
        .header("Content-Type", "text/plain")
        .body(serde_json::to_string(&payload)?)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    let parsed: LoginResponse = serde_json::from_str(&body)
        .map_err(|e| SourceError::Login(format!("unreadable response (HTTP {}): {}", status, e)))?;

    parsed
        .token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| SourceError::Login(format!("no token in response (HTTP {})", status)))
}

use serializd_models::ShowId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Serializd login failed: {0}")]
    Login(String),

    #[error("Not authenticated with Serializd")]
    NotAuthenticated,

    #[error("{service} returned HTTP {status} for {endpoint}: {body}")]
    UnexpectedStatus {
        service: &'static str,
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("Show name not found for show [id={0}]")]
    MissingShowName(ShowId),

    #[error("No seasons found for show [name={name}, id={id}]")]
    MissingSeasons { id: ShowId, name: String },

    #[error("Show [name={name}, id={id}] not found on {service}")]
    ShowNotFound {
        id: ShowId,
        name: String,
        service: &'static str,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SourceError {
    /// Failures scoped to a single show; the caller's policy decides whether they abort the run.
    pub fn is_show_level(&self) -> bool {
        matches!(
            self,
            SourceError::MissingShowName(_)
                | SourceError::MissingSeasons { .. }
                | SourceError::ShowNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_level_classification() {
        assert!(SourceError::MissingShowName(1).is_show_level());
        assert!(SourceError::MissingSeasons { id: 1, name: "X".to_string() }.is_show_level());
        assert!(!SourceError::NotAuthenticated.is_show_level());
        assert!(!SourceError::UnexpectedStatus {
            service: "trakt",
            endpoint: "/shows/x/seasons/1".to_string(),
            status: 500,
            body: String::new(),
        }
        .is_show_level());
    }

    #[test]
    fn test_missing_seasons_message() {
        let err = SourceError::MissingSeasons { id: 7, name: "Dark".to_string() };
        assert_eq!(err.to_string(), "No seasons found for show [name=Dark, id=7]");
    }
}

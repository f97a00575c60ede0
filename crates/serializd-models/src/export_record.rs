use serde::{Deserialize, Serialize};
use crate::episode_ids::ExternalId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Episode,
    Show,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecordTimestamp {
    #[serde(rename = "watched_at")]
    Watched(String),
    #[serde(rename = "watchlisted_at")]
    Watchlisted(String),
}

/// One object of the Trakt bulk-import array.
///
/// Serializes flat, e.g. `{"trakt_id": 555, "watched_at": "2024-01-01", "type": "episode"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportRecord {
    #[serde(flatten)]
    pub id: ExternalId,
    #[serde(flatten)]
    pub timestamp: RecordTimestamp,
    #[serde(rename = "type")]
    pub kind: RecordKind,
}

impl ExportRecord {
    pub fn watched_episode(id: ExternalId, watched_at: impl Into<String>) -> Self {
        Self {
            id,
            timestamp: RecordTimestamp::Watched(watched_at.into()),
            kind: RecordKind::Episode,
        }
    }

    pub fn watchlisted_show(id: ExternalId, watchlisted_at: impl Into<String>) -> Self {
        Self {
            id,
            timestamp: RecordTimestamp::Watchlisted(watchlisted_at.into()),
            kind: RecordKind::Show,
        }
    }
}

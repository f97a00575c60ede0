pub mod episode;
pub mod episode_ids;
pub mod export_record;
pub mod library;
pub mod show;
pub mod timestamp;

pub use episode::{EnrichedEpisode, EpisodeLogEntry};
pub use episode_ids::{EpisodeIdMap, EpisodeIdentifierSet, ExternalId, TraktEpisodeIds};
pub use export_record::{ExportRecord, RecordKind, RecordTimestamp};
pub use library::{Library, ListEntry, UserContext, WATCHED_LISTS, WATCHLIST_LIST};
pub use show::{Season, ShowDetails, ShowId};
pub use timestamp::{compare_timestamps, earliest};

use serializd_models::{EnrichedEpisode, EpisodeIdMap, EpisodeLogEntry, Season, ShowDetails};

/// Result of joining one season's watch log with its resolved ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonJoin {
    pub episodes: Vec<EnrichedEpisode>,
    /// Logged episode numbers with no entry in the id map
    pub unmatched: Vec<u32>,
    /// The id map was empty, so the whole season was dropped
    pub skipped: bool,
}

/// Join a season's watch log with the identifiers resolved for it.
///
/// An empty id map drops the season outright (the season is unreleased or the
/// lookup missed). Otherwise episodes are matched one by one and only the
/// unmatched ones are dropped.
pub fn join_season(
    show: &ShowDetails,
    season: &Season,
    logs: &[EpisodeLogEntry],
    ids: &EpisodeIdMap,
) -> SeasonJoin {
    if ids.is_empty() {
        return SeasonJoin {
            skipped: true,
            ..SeasonJoin::default()
        };
    }

    let mut join = SeasonJoin::default();
    for entry in logs {
        match ids.get(&entry.episode_number) {
            Some(episode_ids) => join
                .episodes
                .push(EnrichedEpisode::new(show, season, entry, episode_ids.clone())),
            None => join.unmatched.push(entry.episode_number),
        }
    }
    join
}

#[cfg(test)]
mod tests {
    use super::*;
    use serializd_models::{EpisodeIdentifierSet, TraktEpisodeIds};

    fn show() -> ShowDetails {
        ShowDetails {
            id: 100,
            name: "Severance".to_string(),
            seasons: vec![season()],
        }
    }

    fn season() -> Season {
        Season {
            id: 11,
            name: "Season 1".to_string(),
            season_number: 1,
        }
    }

    fn log(number: u32, date: &str) -> EpisodeLogEntry {
        EpisodeLogEntry {
            episode_number: number,
            date_added: date.to_string(),
        }
    }

    fn trakt(id: u64) -> EpisodeIdentifierSet {
        EpisodeIdentifierSet::Trakt(TraktEpisodeIds {
            trakt_id: id,
            tvdb_id: None,
            tmdb_id: None,
            imdb_id: None,
        })
    }

    #[test]
    fn test_join_carries_show_and_season_context() {
        let ids: EpisodeIdMap = [(1, trakt(555))].into_iter().collect();
        let join = join_season(&show(), &season(), &[log(1, "2024-01-01")], &ids);

        assert_eq!(join.episodes.len(), 1);
        let episode = &join.episodes[0];
        assert_eq!(episode.show_id, 100);
        assert_eq!(episode.show_name, "Severance");
        assert_eq!(episode.season_id, 11);
        assert_eq!(episode.season_number, 1);
        assert_eq!(episode.episode_number, 1);
        assert_eq!(episode.watched_at, "2024-01-01");
        assert_eq!(episode.ids, trakt(555));
    }

    #[test]
    fn test_unmatched_episodes_are_dropped_and_reported() {
        let ids: EpisodeIdMap = [(1, trakt(1)), (2, trakt(2))].into_iter().collect();
        let logs = [log(1, "a"), log(2, "b"), log(9, "c")];
        let join = join_season(&show(), &season(), &logs, &ids);

        assert_eq!(join.episodes.len(), 2);
        assert_eq!(join.unmatched, vec![9]);
        assert!(!join.skipped);
        assert!(join.episodes.len() <= logs.len());
    }

    #[test]
    fn test_empty_id_map_skips_season() {
        let join = join_season(&show(), &season(), &[log(1, "2024-01-01")], &EpisodeIdMap::new());
        assert!(join.skipped);
        assert!(join.episodes.is_empty());
        assert!(join.unmatched.is_empty());
    }

    #[test]
    fn test_empty_log() {
        let ids: EpisodeIdMap = [(1, trakt(1))].into_iter().collect();
        let join = join_season(&show(), &season(), &[], &ids);
        assert!(join.episodes.is_empty());
        assert!(!join.skipped);
    }
}

use anyhow::{Context, Result};
use serde::Serialize;
use serializd_config::OutputLayout;
use serializd_models::ExportRecord;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use crate::format::ExportRecords;
use crate::pipeline::PipelineOutput;

pub const WATCHED_FILE: &str = "serializd_to_trakt_watched.json";
pub const WATCHLIST_FILE: &str = "serializd_to_trakt_watchlist.json";
pub const COMBINED_FILE: &str = "serializd_to_trakt.json";

/// What was written where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub watched_episodes: usize,
    pub watched_shows: usize,
    pub watchlist_shows: usize,
    pub watched_file: PathBuf,
    /// `None` when the watchlist was excluded
    pub watchlist_file: Option<PathBuf>,
}

/// Write pretty-printed JSON with a 4-space indent, replacing any existing file.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value
        .serialize(&mut serializer)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

/// Write the export files for `layout` into `output_dir`.
///
/// `include_watchlist = false` leaves watchlist records out entirely (and, for
/// the split layout, skips the watchlist file).
pub fn write_export(
    output_dir: &Path,
    layout: OutputLayout,
    include_watchlist: bool,
    records: &ExportRecords,
    output: &PipelineOutput,
) -> Result<ExportSummary> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let (watched_file, watchlist_file) = match layout {
        OutputLayout::Split => {
            let watched_path = output_dir.join(WATCHED_FILE);
            write_json(&watched_path, &records.watched)?;

            let watchlist_path = if include_watchlist {
                let path = output_dir.join(WATCHLIST_FILE);
                write_json(&path, &records.watchlist)?;
                Some(path)
            } else {
                None
            };
            (watched_path, watchlist_path)
        }
        OutputLayout::Combined => {
            let path = output_dir.join(COMBINED_FILE);
            let combined: Vec<ExportRecord> = if include_watchlist {
                records.combined()
            } else {
                records.watched.clone()
            };
            write_json(&path, &combined)?;
            let watchlist_path = include_watchlist.then(|| path.clone());
            (path, watchlist_path)
        }
    };

    let watched_shows: BTreeSet<_> = output.episodes.iter().map(|episode| episode.show_id).collect();
    let summary = ExportSummary {
        watched_episodes: records.watched.len(),
        watched_shows: watched_shows.len(),
        watchlist_shows: if include_watchlist { records.watchlist.len() } else { 0 },
        watched_file,
        watchlist_file,
    };

    info!(
        watched_episodes = summary.watched_episodes,
        watched_shows = summary.watched_shows,
        watchlist_shows = summary.watchlist_shows,
        "Export written"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{format_records, WatchlistExport};
    use serde_json::json;
    use serializd_models::{EnrichedEpisode, EpisodeIdentifierSet, ExternalId, Library, TraktEpisodeIds};

    fn output_with(show_ids: &[u64]) -> PipelineOutput {
        PipelineOutput {
            library: Library::default(),
            episodes: show_ids
                .iter()
                .enumerate()
                .map(|(i, show_id)| EnrichedEpisode {
                    show_id: *show_id,
                    show_name: format!("Show {}", show_id),
                    season_id: 1,
                    season_name: "Season 1".to_string(),
                    season_number: 1,
                    episode_number: i as u32 + 1,
                    watched_at: "2024-01-01".to_string(),
                    ids: EpisodeIdentifierSet::Trakt(TraktEpisodeIds {
                        trakt_id: 500 + i as u64,
                        tvdb_id: None,
                        tmdb_id: None,
                        imdb_id: None,
                    }),
                })
                .collect(),
            watchlist: vec![WatchlistExport {
                show_id: 200,
                id: ExternalId::Trakt(77),
                watchlisted_at: "2024-02-01".to_string(),
            }],
            failed_shows: Vec::new(),
        }
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_split_layout_writes_two_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = output_with(&[100, 100, 101]);
        let records = format_records(&output.episodes, &output.watchlist);

        let summary = write_export(dir.path(), OutputLayout::Split, true, &records, &output).unwrap();

        assert_eq!(summary.watched_episodes, 3);
        assert_eq!(summary.watched_shows, 2);
        assert_eq!(summary.watchlist_shows, 1);
        assert_eq!(summary.watched_file, dir.path().join(WATCHED_FILE));

        let watched = read_json(&dir.path().join(WATCHED_FILE));
        assert_eq!(watched.as_array().unwrap().len(), 3);
        let watchlist = read_json(&dir.path().join(WATCHLIST_FILE));
        assert_eq!(watchlist, json!([{"trakt_id": 77, "watchlisted_at": "2024-02-01", "type": "show"}]));
    }

    #[test]
    fn test_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let output = output_with(&[100]);
        let records = format_records(&output.episodes, &[]);

        write_export(dir.path(), OutputLayout::Split, false, &records, &output).unwrap();

        let text = std::fs::read_to_string(dir.path().join(WATCHED_FILE)).unwrap();
        assert!(text.starts_with("[\n    {\n        \"trakt_id\": 500,"));
        assert!(!dir.path().join(WATCHLIST_FILE).exists());
    }

    #[test]
    fn test_combined_layout() {
        let dir = tempfile::tempdir().unwrap();
        let output = output_with(&[100]);
        let records = format_records(&output.episodes, &output.watchlist);

        let summary = write_export(dir.path(), OutputLayout::Combined, true, &records, &output).unwrap();

        let combined = read_json(&dir.path().join(COMBINED_FILE));
        let items = combined.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["type"], "episode");
        assert_eq!(items[1]["type"], "show");
        assert_eq!(summary.watchlist_file, Some(dir.path().join(COMBINED_FILE)));
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(WATCHED_FILE), "stale contents that are longer than the new file").unwrap();
        let output = output_with(&[]);
        let records = format_records(&output.episodes, &[]);

        write_export(dir.path(), OutputLayout::Split, false, &records, &output).unwrap();

        assert_eq!(read_json(&dir.path().join(WATCHED_FILE)), json!([]));
    }
}

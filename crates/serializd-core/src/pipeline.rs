use anyhow::{Context, Result};
use serializd_config::{ExportOptions, ShowFailurePolicy};
use serializd_models::{EnrichedEpisode, Library, ShowId};
use serializd_sources::{EpisodeIdResolver, LibrarySource, SourceError};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};
use crate::enrich::join_season;
use crate::format::WatchlistExport;
use crate::library::{build_library, DateCollision};

/// Progress hooks for the show loop. All methods default to no-ops.
pub trait ExportProgress: Send + Sync {
    fn shows_total(&self, _total: usize) {}
    fn show_started(&self, _index: usize, _show_id: ShowId) {}
    fn show_finished(&self, _show_name: &str, _episodes: usize) {}
    fn watchlist_started(&self, _total: usize) {}
    fn finished(&self) {}
}

pub struct NoProgress;

impl ExportProgress for NoProgress {}

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub include_watchlist: bool,
    pub on_show_error: ShowFailurePolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            include_watchlist: true,
            on_show_error: ShowFailurePolicy::Abort,
        }
    }
}

impl From<&ExportOptions> for PipelineOptions {
    fn from(options: &ExportOptions) -> Self {
        Self {
            include_watchlist: options.include_watchlist,
            on_show_error: options.on_show_error,
        }
    }
}

/// Result of exporting one watched show.
#[derive(Debug)]
pub enum ShowOutcome {
    Exported {
        show_name: String,
        episodes: Vec<EnrichedEpisode>,
    },
    /// Show-level failure (no name, no seasons, not found upstream)
    Failed(SourceError),
}

/// Everything the pipeline gathered, ready for formatting.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    pub library: Library,
    pub episodes: Vec<EnrichedEpisode>,
    pub watchlist: Vec<WatchlistExport>,
    /// Shows skipped under [`ShowFailurePolicy::Skip`], with the reason
    pub failed_shows: Vec<(ShowId, String)>,
}

/// One info event per collided show. `build_library` yields one collision per show.
fn log_collisions(collisions: &[DateCollision]) {
    for collision in collisions {
        info!(
            show_id = collision.show_id,
            dates = collision.dates.len(),
            "Multiple dateAdded values for showId {} in watchlist. Using the oldest date {}.",
            collision.show_id,
            collision.earliest
        );
    }
}

/// Sequential export: library, then each watched show season by season, then the watchlist.
pub struct ExportPipeline<'a> {
    source: &'a dyn LibrarySource,
    resolver: &'a dyn EpisodeIdResolver,
    options: PipelineOptions,
    progress: &'a dyn ExportProgress,
}

impl<'a> ExportPipeline<'a> {
    pub fn new(source: &'a dyn LibrarySource, resolver: &'a dyn EpisodeIdResolver, options: PipelineOptions) -> Self {
        Self {
            source,
            resolver,
            options,
            progress: &NoProgress,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ExportProgress) -> Self {
        self.progress = progress;
        self
    }

    pub async fn run(&self) -> Result<PipelineOutput> {
        let library = self.fetch_library().await?;

        let (episodes, failed_shows) = self.collect_episodes(&library.watched).await?;

        let watchlist = if self.options.include_watchlist {
            self.resolve_watchlist(&library.watchlist).await?
        } else {
            debug!("Watchlist export disabled");
            Vec::new()
        };

        self.progress.finished();
        Ok(PipelineOutput {
            library,
            episodes,
            watchlist,
            failed_shows,
        })
    }

    pub async fn fetch_library(&self) -> Result<Library> {
        let context = self
            .source
            .fetch_user_context()
            .await
            .context("Failed to fetch Serializd user context")?;
        let reduction = build_library(&context)?;

        log_collisions(&reduction.collisions);

        info!(
            watched = reduction.library.watched.len(),
            watchlist = reduction.library.watchlist.len(),
            "Fetched Serializd library"
        );
        Ok(reduction.library)
    }

    async fn collect_episodes(
        &self,
        show_ids: &BTreeSet<ShowId>,
    ) -> Result<(Vec<EnrichedEpisode>, Vec<(ShowId, String)>)> {
        let mut episodes = Vec::new();
        let mut failed = Vec::new();

        self.progress.shows_total(show_ids.len());
        for (index, show_id) in show_ids.iter().enumerate() {
            self.progress.show_started(index, *show_id);

            match self.export_show(*show_id).await? {
                ShowOutcome::Exported {
                    show_name,
                    episodes: show_episodes,
                } => {
                    self.progress.show_finished(&show_name, show_episodes.len());
                    episodes.extend(show_episodes);
                }
                ShowOutcome::Failed(err) => match self.options.on_show_error {
                    ShowFailurePolicy::Skip => {
                        warn!(show_id = *show_id, error = %err, "Skipping show");
                        failed.push((*show_id, err.to_string()));
                    }
                    ShowFailurePolicy::Abort => {
                        return Err(anyhow::Error::new(err).context(format!("Failed to export show {}", show_id)));
                    }
                },
            }
        }

        Ok((episodes, failed))
    }

    /// Export one watched show. Show-level failures come back as [`ShowOutcome::Failed`];
    /// everything else is an error for the whole run.
    pub async fn export_show(&self, show_id: ShowId) -> Result<ShowOutcome> {
        let show = match self.source.fetch_show(show_id).await {
            Ok(show) => show,
            Err(err) if err.is_show_level() => return Ok(ShowOutcome::Failed(err)),
            Err(err) => return Err(anyhow::Error::new(err).context(format!("Failed to fetch show {}", show_id))),
        };

        let key = match self.resolver.show_key(&show).await {
            Ok(key) => key,
            Err(err) if err.is_show_level() => return Ok(ShowOutcome::Failed(err)),
            Err(err) => return Err(anyhow::Error::new(err).context(format!("Failed to resolve show {}", show.name))),
        };

        let mut episodes = Vec::new();
        for season in &show.seasons {
            let logs = self
                .source
                .fetch_episode_logs(show.id, season.id)
                .await
                .with_context(|| format!("Failed to fetch episode logs for {} season {}", show.name, season.season_number))?;
            let ids = self
                .resolver
                .resolve_season(&show, &key, season)
                .await
                .with_context(|| format!("Failed to resolve episode ids for {} season {}", show.name, season.season_number))?;

            let join = join_season(&show, season, &logs, &ids);
            if join.skipped {
                if !logs.is_empty() {
                    warn!(
                        show = %show.name,
                        season_number = season.season_number,
                        logged = logs.len(),
                        "No episode ids for season [name={}, number={}] of show [name={}], skipping",
                        season.name,
                        season.season_number,
                        show.name
                    );
                }
                continue;
            }
            for episode_number in &join.unmatched {
                warn!(
                    "Episode [number={}] not found for season [name={}, number={}, id={}] of show [name={}, id={}]",
                    episode_number, season.name, season.season_number, season.id, show.name, show.id
                );
            }
            debug!(
                show = %show.name,
                season_number = season.season_number,
                enriched = join.episodes.len(),
                "Season joined"
            );
            episodes.extend(join.episodes);
        }

        Ok(ShowOutcome::Exported {
            show_name: show.name,
            episodes,
        })
    }

    async fn resolve_watchlist(&self, watchlist: &BTreeMap<ShowId, String>) -> Result<Vec<WatchlistExport>> {
        self.progress.watchlist_started(watchlist.len());

        let mut resolved = Vec::with_capacity(watchlist.len());
        for (show_id, date) in watchlist {
            let id = self
                .resolver
                .watchlist_id(*show_id)
                .await
                .with_context(|| format!("Failed to resolve watchlisted show {}", show_id))?;
            match id {
                Some(id) => resolved.push(WatchlistExport {
                    show_id: *show_id,
                    id,
                    watchlisted_at: date.clone(),
                }),
                None => warn!(show_id = *show_id, "Watchlisted show [id={}] not found, skipping", show_id),
            }
        }
        Ok(resolved)
    }
}

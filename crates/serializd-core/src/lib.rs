pub mod enrich;
pub mod export;
pub mod format;
pub mod library;
pub mod pipeline;

pub use enrich::{join_season, SeasonJoin};
pub use export::{write_export, ExportSummary, COMBINED_FILE, WATCHED_FILE, WATCHLIST_FILE};
pub use format::{format_records, ExportRecords, WatchlistExport};
pub use library::{build_library, DateCollision, LibraryReduction};
pub use pipeline::{ExportPipeline, ExportProgress, NoProgress, PipelineOptions, PipelineOutput, ShowOutcome};

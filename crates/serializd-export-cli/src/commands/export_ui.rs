use indicatif::{ProgressBar, ProgressStyle};
use serializd_core::ExportProgress;
use serializd_models::ShowId;
use std::io::IsTerminal;

/// Progress over watched shows: a bar on a terminal, `tracing` events otherwise.
pub struct ExportUI {
    bar: ProgressBar,
    interactive: bool,
}

impl ExportUI {
    pub fn new(enabled: bool) -> Self {
        let interactive = enabled && is_interactive();

        let bar = if interactive {
            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▉▊▋▌▍▎▏  "),
            );
            bar.set_message("Fetching library...");
            bar
        } else {
            tracing::debug!(
                operation = "ui_init",
                mode = "non_interactive",
                "Progress bar disabled, using structured logging"
            );
            ProgressBar::hidden()
        };

        Self { bar, interactive }
    }
}

impl ExportProgress for ExportUI {
    fn shows_total(&self, total: usize) {
        if self.interactive {
            self.bar.set_length(total as u64);
            self.bar.set_message("Exporting shows");
        } else {
            tracing::info!(operation = "progress", total = total, "Exporting watched shows");
        }
    }

    fn show_started(&self, index: usize, show_id: ShowId) {
        if self.interactive {
            self.bar.set_position(index as u64);
            self.bar.set_message(format!("show {}", show_id));
        } else {
            tracing::debug!(operation = "progress", current = index + 1, show_id = show_id, "Exporting show");
        }
    }

    fn show_finished(&self, show_name: &str, episodes: usize) {
        if self.interactive {
            self.bar.inc(1);
            self.bar.set_message(show_name.to_string());
        } else {
            tracing::info!(operation = "progress", show = %show_name, episodes = episodes, "Show exported");
        }
    }

    fn watchlist_started(&self, total: usize) {
        if self.interactive {
            self.bar.set_message(format!("Resolving {} watchlisted shows", total));
        } else {
            tracing::info!(operation = "progress", total = total, "Resolving watchlist");
        }
    }

    fn finished(&self) {
        if self.interactive {
            self.bar.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

use super::config::{config_file, load_config};
use super::export_ui::ExportUI;
use super::prompts::prompt_password;
use crate::output::Output;
use clap::{ArgAction, Args};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use serde_json::json;
use serializd_config::{Config, OutputLayout, ResolutionStrategy, ShowFailurePolicy};
use serializd_core::{format_records, write_export, ExportPipeline, ExportSummary, PipelineOptions, PipelineOutput};
use serializd_sources::{create_resolver, SerializdClient};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Serializd account email
    #[arg(long, value_name = "EMAIL")]
    serializd_email: String,

    /// Serializd password (prompted with masked input when omitted)
    #[arg(long, value_name = "PASSWORD")]
    serializd_password: Option<String>,

    /// Trakt API client id (required for trakt-search and trakt-slug)
    #[arg(long, value_name = "ID")]
    trakt_client_id: Option<String>,

    /// How episodes are mapped to external ids
    #[arg(long, value_name = "trakt-search|trakt-slug|serializd-catalog")]
    strategy: Option<ResolutionStrategy>,

    /// Serializd site build id (required for serializd-catalog unless configured)
    #[arg(long, value_name = "BUILD_ID")]
    serializd_data_version: Option<String>,

    /// Write separate watched/watchlist files or a single combined file
    #[arg(long, value_name = "split|combined")]
    layout: Option<OutputLayout>,

    /// Directory the JSON files are written to
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Leave the watchlist out of the export
    #[arg(long, action = ArgAction::SetTrue)]
    no_watchlist: bool,

    /// Skip shows with missing details instead of aborting the run
    #[arg(long, action = ArgAction::SetTrue)]
    skip_failed_shows: bool,
}

/// Layer command-line flags over the loaded configuration.
fn apply_overrides(config: &mut Config, args: &ExportArgs) {
    if let Some(client_id) = &args.trakt_client_id {
        config.trakt.client_id = Some(client_id.clone());
    }
    if let Some(strategy) = args.strategy {
        config.export.strategy = strategy;
    }
    if let Some(version) = &args.serializd_data_version {
        config.serializd.data_version = Some(version.clone());
    }
    if let Some(layout) = args.layout {
        config.export.layout = layout;
    }
    if let Some(dir) = &args.output_dir {
        config.export.output_dir = dir.clone();
    }
    if args.no_watchlist {
        config.export.include_watchlist = false;
    }
    if args.skip_failed_shows {
        config.export.on_show_error = ShowFailurePolicy::Skip;
    }
}

pub async fn run_export(args: ExportArgs, config_path: Option<&Path>, output: &Output) -> Result<()> {
    tracing::debug!("Export command started");

    let config_file = config_file(config_path);
    let mut config = load_config(&config_file)?;
    apply_overrides(&mut config, &args);
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Configuration validation failed: {}", e))?;

    let password = match args.serializd_password.clone() {
        Some(password) => password,
        None => prompt_password("Serializd password")?,
    };

    let mut serializd = SerializdClient::new(&config.serializd);
    serializd
        .login(&args.serializd_email, &password)
        .await
        .wrap_err("Failed to log in to Serializd")?;
    output.info("Logged in to Serializd");

    let resolver = create_resolver(&config, &serializd).wrap_err("Failed to set up episode id resolution")?;

    let ui = ExportUI::new(output.is_human() && !output.is_quiet());
    let pipeline = ExportPipeline::new(&serializd, resolver.as_ref(), PipelineOptions::from(&config.export))
        .with_progress(&ui);
    let result = pipeline
        .run()
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Export failed: {:#}", e))?;

    let records = format_records(&result.episodes, &result.watchlist);
    let summary = write_export(
        &config.export.output_dir,
        config.export.layout,
        config.export.include_watchlist,
        &records,
        &result,
    )
    .map_err(|e| color_eyre::eyre::eyre!("Failed to write export files: {:#}", e))?;

    report(&summary, &result, output);
    Ok(())
}

fn report(summary: &ExportSummary, result: &PipelineOutput, output: &Output) {
    if output.is_human() {
        for (show_id, reason) in &result.failed_shows {
            output.warn(format!("Skipped show {}: {}", show_id, reason));
        }
        output.success(format!(
            "{} watched episodes from {} shows exported to {}",
            summary.watched_episodes,
            summary.watched_shows,
            summary.watched_file.display()
        ));
        if let Some(watchlist_file) = &summary.watchlist_file {
            output.success(format!(
                "{} shows from watchlist exported to {}",
                summary.watchlist_shows,
                watchlist_file.display()
            ));
        }
        return;
    }

    output.json(&json!({
        "type": "export_summary",
        "watched_episodes": summary.watched_episodes,
        "watched_shows": summary.watched_shows,
        "watched_file": summary.watched_file.display().to_string(),
        "watchlist_shows": summary.watchlist_shows,
        "watchlist_file": summary.watchlist_file.as_ref().map(|path| path.display().to_string()),
        "failed_shows": result
            .failed_shows
            .iter()
            .map(|(show_id, reason)| json!({ "show_id": show_id, "reason": reason }))
            .collect::<Vec<_>>(),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ExportArgs,
    }

    fn parse(argv: &[&str]) -> ExportArgs {
        let mut full = vec!["serializd-export", "--serializd-email", "me@example.com"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "--trakt-client-id",
            "abc",
            "--strategy",
            "serializd-catalog",
            "--serializd-data-version",
            "build-1",
            "--layout",
            "combined",
            "--output-dir",
            "out",
            "--no-watchlist",
            "--skip-failed-shows",
        ]);
        let mut config = Config::default();
        apply_overrides(&mut config, &args);

        assert_eq!(config.trakt.client_id.as_deref(), Some("abc"));
        assert_eq!(config.export.strategy, ResolutionStrategy::SerializdCatalog);
        assert_eq!(config.serializd.data_version.as_deref(), Some("build-1"));
        assert_eq!(config.export.layout, OutputLayout::Combined);
        assert_eq!(config.export.output_dir, PathBuf::from("out"));
        assert!(!config.export.include_watchlist);
        assert_eq!(config.export.on_show_error, ShowFailurePolicy::Skip);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_absent_flags_keep_config_values() {
        let args = parse(&[]);
        let mut config = Config::default();
        config.export.layout = OutputLayout::Combined;
        config.trakt.client_id = Some("from-file".to_string());
        apply_overrides(&mut config, &args);

        assert_eq!(config.export.layout, OutputLayout::Combined);
        assert_eq!(config.trakt.client_id.as_deref(), Some("from-file"));
        assert!(config.export.include_watchlist);
        assert_eq!(config.export.on_show_error, ShowFailurePolicy::Abort);
        assert!(args.serializd_password.is_none());
    }

    #[test]
    fn test_email_is_required() {
        assert!(TestCli::try_parse_from(["serializd-export"]).is_err());
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result = TestCli::try_parse_from([
            "serializd-export",
            "--serializd-email",
            "me@example.com",
            "--strategy",
            "guess",
        ]);
        assert!(result.is_err());
    }
}

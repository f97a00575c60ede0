use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// 0 = info, 1 = debug (hyper connection chatter suppressed), 2+ = trace
fn filter_directive(verbose_level: u8, quiet: bool) -> Option<&'static str> {
    if quiet {
        return Some("error");
    }
    match verbose_level {
        0 => None,
        1 => Some("debug,hyper::proto::h1=warn,hyper::client::pool=warn,rustls=info"),
        _ => Some("trace"),
    }
}

/// Split `dir/serializd-export.log` into the directory and the rotation prefix.
fn rolling_target(log_path: &Path) -> Result<(PathBuf, String)> {
    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let filename = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename: {}", log_path.display()))?;
    let prefix = filename.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(filename);
    Ok((dir, prefix.to_string()))
}

pub fn init_logging_with_file(verbose_level: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let filter = match filter_directive(verbose_level, quiet) {
        Some("error") => EnvFilter::new("error"),
        Some(directive) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let registry = Registry::default().with(filter);

    if let Some(log_path) = log_file {
        let (log_dir, log_prefix) = rolling_target(&log_path)?;
        std::fs::create_dir_all(&log_dir)?;

        // serializd-export.log.2026-01-17, ...
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

        if json {
            let json_layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(file_appender);
            registry.with(json_layer).init();
        } else {
            let fmt_layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(file_appender);
            registry.with(fmt_layer).init();
        }
    } else if json {
        let json_layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(fmt_layer).init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_levels() {
        assert_eq!(filter_directive(0, false), None);
        assert!(filter_directive(1, false).unwrap().starts_with("debug"));
        assert_eq!(filter_directive(3, false), Some("trace"));
        assert_eq!(filter_directive(2, true), Some("error"));
    }

    #[test]
    fn test_rolling_target() {
        let (dir, prefix) = rolling_target(Path::new("/var/log/serializd-export.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log"));
        assert_eq!(prefix, "serializd-export");

        let (dir, prefix) = rolling_target(Path::new("export")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(prefix, "export");
    }
}

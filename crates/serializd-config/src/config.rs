use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub serializd: SerializdConfig,
    #[serde(default)]
    pub trakt: TraktConfig,
    #[serde(default)]
    pub export: ExportOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializdConfig {
    #[serde(default = "default_serializd_base_url")]
    pub base_url: String,
    /// Site build id used in the versioned internal data path (catalog strategy only)
    #[serde(default)]
    pub data_version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktConfig {
    #[serde(default = "default_trakt_base_url")]
    pub base_url: String,
    #[serde(default = "default_trakt_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub client_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    #[serde(default)]
    pub strategy: ResolutionStrategy,
    #[serde(default)]
    pub layout: OutputLayout,
    #[serde(default = "default_true")]
    pub include_watchlist: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub on_show_error: ShowFailurePolicy,
}

/// How episode numbers are mapped to external ids.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionStrategy {
    /// Look the show up on Trakt by its TMDB id, then fetch seasons by the returned slug
    #[default]
    TraktSearch,
    /// Guess the Trakt slug from the show name
    TraktSlug,
    /// Guess the Serializd slug and read Serializd's own per-season episode catalog
    SerializdCatalog,
}

impl ResolutionStrategy {
    pub fn requires_trakt(&self) -> bool {
        matches!(self, ResolutionStrategy::TraktSearch | ResolutionStrategy::TraktSlug)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStrategy::TraktSearch => "trakt-search",
            ResolutionStrategy::TraktSlug => "trakt-slug",
            ResolutionStrategy::SerializdCatalog => "serializd-catalog",
        }
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trakt-search" | "trakt_search" | "search" => Ok(ResolutionStrategy::TraktSearch),
            "trakt-slug" | "trakt_slug" | "slug" => Ok(ResolutionStrategy::TraktSlug),
            "serializd-catalog" | "serializd_catalog" | "catalog" => Ok(ResolutionStrategy::SerializdCatalog),
            _ => Err(format!(
                "Invalid strategy: {}. Use 'trakt-search', 'trakt-slug', or 'serializd-catalog'",
                s
            )),
        }
    }
}

/// Which files the export writes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputLayout {
    /// Separate watched and watchlist files
    #[default]
    Split,
    /// One file, watched records first
    Combined,
}

impl fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputLayout::Split => f.write_str("split"),
            OutputLayout::Combined => f.write_str("combined"),
        }
    }
}

impl FromStr for OutputLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "split" => Ok(OutputLayout::Split),
            "combined" => Ok(OutputLayout::Combined),
            _ => Err(format!("Invalid layout: {}. Use 'split' or 'combined'", s)),
        }
    }
}

/// What happens when a single show cannot be resolved (missing name or seasons).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ShowFailurePolicy {
    /// Fail the whole run; nothing is written
    #[default]
    Abort,
    /// Log the failure and continue with the next show
    Skip,
}

impl fmt::Display for ShowFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowFailurePolicy::Abort => f.write_str("abort"),
            ShowFailurePolicy::Skip => f.write_str("skip"),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_serializd_base_url() -> String {
    "https://www.serializd.com".to_string()
}

fn default_trakt_base_url() -> String {
    "https://api.trakt.tv".to_string()
}

fn default_trakt_api_version() -> String {
    "2".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for SerializdConfig {
    fn default() -> Self {
        Self {
            base_url: default_serializd_base_url(),
            data_version: None,
        }
    }
}

impl Default for TraktConfig {
    fn default() -> Self {
        Self {
            base_url: default_trakt_base_url(),
            api_version: default_trakt_api_version(),
            client_id: None,
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            strategy: ResolutionStrategy::default(),
            layout: OutputLayout::default(),
            include_watchlist: default_true(),
            output_dir: default_output_dir(),
            on_show_error: ShowFailurePolicy::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.serializd.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("serializd.base_url cannot be empty"));
        }

        if self.export.strategy.requires_trakt() {
            if self.trakt.base_url.trim().is_empty() {
                return Err(anyhow::anyhow!("trakt.base_url cannot be empty"));
            }
            let has_client_id = self
                .trakt
                .client_id
                .as_deref()
                .map(|id| !id.trim().is_empty())
                .unwrap_or(false);
            if !has_client_id {
                return Err(anyhow::anyhow!(
                    "A Trakt client id is required for the {} strategy",
                    self.export.strategy
                ));
            }
        }

        if self.export.strategy == ResolutionStrategy::SerializdCatalog {
            let has_version = self
                .serializd
                .data_version
                .as_deref()
                .map(|v| !v.trim().is_empty())
                .unwrap_or(false);
            if !has_version {
                return Err(anyhow::anyhow!(
                    "serializd.data_version is required for the serializd-catalog strategy"
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.trakt.client_id = Some("test_id".to_string());
        config.export.layout = OutputLayout::Combined;
        config.export.include_watchlist = false;

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.trakt.client_id.as_deref(), Some("test_id"));
        assert_eq!(loaded.export.layout, OutputLayout::Combined);
        assert!(!loaded.export.include_watchlist);
        assert_eq!(loaded.serializd.base_url, "https://www.serializd.com");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [export]
            strategy = "serializd-catalog"
            on_show_error = "skip"
            "#,
        )
        .unwrap();
        assert_eq!(config.export.strategy, ResolutionStrategy::SerializdCatalog);
        assert_eq!(config.export.on_show_error, ShowFailurePolicy::Skip);
        assert!(config.export.include_watchlist);
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert_eq!(config.trakt.api_version, "2");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.export.strategy, ResolutionStrategy::TraktSearch);
    }

    #[test]
    fn test_validate_requires_trakt_client_id() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config.trakt.client_id = Some("abc".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_catalog_requires_data_version() {
        let mut config = Config::default();
        config.export.strategy = ResolutionStrategy::SerializdCatalog;
        assert!(config.validate().is_err());

        config.serializd.data_version = Some("build-123".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("trakt-slug".parse::<ResolutionStrategy>().unwrap(), ResolutionStrategy::TraktSlug);
        assert_eq!("catalog".parse::<ResolutionStrategy>().unwrap(), ResolutionStrategy::SerializdCatalog);
        assert!("bogus".parse::<ResolutionStrategy>().is_err());
        assert_eq!(ResolutionStrategy::TraktSearch.to_string(), "trakt-search");
    }
}

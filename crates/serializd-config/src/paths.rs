use anyhow::Result;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "serializd-export";

pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(APP_DIR);

        Ok(Self { config_dir })
    }

    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // No platform config dir (e.g. minimal containers): fall back to the working directory
        Self::new().unwrap_or_else(|_| Self::with_config_dir(PathBuf::from(".").join(APP_DIR)))
    }
}

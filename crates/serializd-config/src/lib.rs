pub mod config;
pub mod paths;

pub use config::{Config, ExportOptions, OutputLayout, ResolutionStrategy, SerializdConfig, ShowFailurePolicy, TraktConfig};
pub use paths::PathManager;

pub mod config;
pub mod export;
pub mod export_ui;
pub mod prompts;

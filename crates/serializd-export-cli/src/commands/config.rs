use super::prompts::prompt_yes_no;
use super::export_ui::is_interactive;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serializd_config::{Config, PathManager};
use std::path::{Path, PathBuf};

pub fn run_config(cmd: ConfigCommands, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let config_file = config_file(config_path);
    match cmd {
        ConfigCommands::Show { full } => show_config(&config_file, full, output),
        ConfigCommands::Init { force } => init_config(&config_file, force, output),
    }
}

/// `--config` when given, otherwise the platform default location.
pub fn config_file(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathManager::default().config_file())
}

pub fn load_config(config_file: &Path) -> Result<Config> {
    Config::load_or_default(config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))
}

fn section(title: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn show_config(config_file: &Path, full: bool, output: &Output) -> Result<()> {
    let exists = config_file.exists();
    let mut config = load_config(config_file)?;
    if !full {
        config.trakt.client_id = config.trakt.client_id.as_deref().map(mask_string);
    }

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("\n{}", "Configuration".bright_cyan().bold());
            println!();

            let mut info_table = Table::new();
            info_table.set_header(vec![
                Cell::new("Config File").add_attribute(Attribute::Bold),
                Cell::new(config_file.display().to_string()),
            ]);
            if !exists {
                info_table.add_row(vec![Cell::new("Status"), Cell::new("not found, showing defaults").fg(Color::Yellow)]);
            }
            info_table.load_preset(comfy_table::presets::UTF8_FULL);
            info_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", info_table);
            println!();

            let mut serializd_table = section("Serializd");
            serializd_table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.serializd.base_url)]);
            serializd_table.add_row(vec![
                Cell::new("Data Version"),
                Cell::new(config.serializd.data_version.as_deref().unwrap_or("<not set>")),
            ]);
            println!("{}", serializd_table);
            println!();

            let mut trakt_table = section("Trakt");
            trakt_table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.trakt.base_url)]);
            trakt_table.add_row(vec![Cell::new("API Version"), Cell::new(&config.trakt.api_version)]);
            trakt_table.add_row(vec![
                Cell::new("Client ID"),
                Cell::new(config.trakt.client_id.as_deref().unwrap_or("<not set>")),
            ]);
            println!("{}", trakt_table);
            println!();

            let mut export_table = section("Export");
            export_table.add_row(vec![Cell::new("Strategy"), Cell::new(config.export.strategy)]);
            export_table.add_row(vec![Cell::new("Layout"), Cell::new(config.export.layout)]);
            export_table.add_row(vec![
                Cell::new("Include Watchlist"),
                Cell::new(if config.export.include_watchlist { "yes" } else { "no" }),
            ]);
            export_table.add_row(vec![
                Cell::new("Output Directory"),
                Cell::new(config.export.output_dir.display().to_string()),
            ]);
            export_table.add_row(vec![Cell::new("On Show Error"), Cell::new(config.export.on_show_error)]);
            println!("{}", export_table);
            println!();
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let mut value = serde_json::to_value(&config)?;
            if let Some(object) = value.as_object_mut() {
                object.insert("config_file".to_string(), config_file.display().to_string().into());
                object.insert("exists".to_string(), exists.into());
            }
            output.json(&value);
        }
    }

    Ok(())
}

fn init_config(config_file: &Path, force: bool, output: &Output) -> Result<()> {
    if config_file.exists() && !force {
        let overwrite = is_interactive()
            && output.format() == OutputFormat::Human
            && prompt_yes_no(
                &format!("{} already exists. Overwrite with defaults?", config_file.display()),
                false,
            )?;
        if !overwrite {
            output.warn(format!(
                "Configuration file already exists at {} (use --force to overwrite)",
                config_file.display()
            ));
            return Ok(());
        }
    }

    write_default_config(config_file)?;
    output.success(format!("Default configuration written to {}", config_file.display()));
    Ok(())
}

fn write_default_config(config_file: &Path) -> Result<()> {
    Config::default()
        .save_to_file(config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return "<not set>".to_string();
    }
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

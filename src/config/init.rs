use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config, SeasonConfig};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Run the interactive init wizard to create a season catalog.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Circuit Standings Configuration Wizard");
    println!("======================================");
    println!();

    println!("A season is an ordered list of events; standings are computed over the");
    println!("first N events of that order. Each event can carry a Google Sheets id");
    println!("pointing at its score sheet (the tab must be named 'Calculator').");
    println!();

    let season_id = loop {
        let s = prompt_with_default("Season id", "2025-2026")?;
        if !s.is_empty() {
            break s;
        }
    };

    let mut order: Vec<String> = Vec::new();
    let mut names: BTreeMap<String, String> = BTreeMap::new();
    let mut sheet_ids: BTreeMap<String, String> = BTreeMap::new();

    loop {
        println!();
        let event = loop {
            let e = prompt("Event id (short, e.g. 'jamhattan'): ")?;
            if e.is_empty() {
                println!("  Event id is required.");
                continue;
            }
            if order.contains(&e) {
                println!("  '{}' is already in this season.", e);
                continue;
            }
            break e;
        };

        let name = prompt(&format!("Display name for '{}' (empty to use the id): ", event))?;
        if !name.is_empty() {
            names.insert(event.clone(), name);
        }

        let sheet_id = prompt("Google Sheets id (empty if not available yet): ")?;
        if !sheet_id.is_empty() {
            sheet_ids.insert(event.clone(), sheet_id);
        }

        order.push(event);

        if !prompt_yes_no("Add another event?", true)? {
            break;
        }
    }

    let mut seasons = BTreeMap::new();
    seasons.insert(
        season_id.clone(),
        SeasonConfig {
            order,
            names,
            sheet_ids,
        },
    );
    let config = Config {
        default_season: Some(season_id),
        seasons,
    };

    // Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `circuit-standings` to build the standings.");

    Ok(())
}

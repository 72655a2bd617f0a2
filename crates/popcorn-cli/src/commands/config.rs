use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::{Config, PathManager};
use serde_json::json;

use crate::output::Output;

pub fn run_show(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = Config::load(&paths.config_file()).map_err(|e| eyre!(e))?;

    let masked = mask_key(&config.omdb.api_key);
    output.result(&json!({
        "config_file": paths.config_file(),
        "omdb": { "api_key": masked, "base_url": config.omdb.base_url },
    }));
    if output.is_human() {
        println!("Config file: {}", paths.config_file().display());
        println!(
            "OMDb API key: {}",
            if masked.is_empty() { "(not set)" } else { masked.as_str() }
        );
        println!("OMDb base URL: {}", config.omdb.base_url);
    }
    Ok(())
}

pub fn run_path(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    output.result(&json!({ "config_file": paths.config_file() }));
    if output.is_human() {
        println!("{}", paths.config_file().display());
    }
    Ok(())
}

pub fn run_set_key(api_key: Option<String>, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let mut config = Config::load(&paths.config_file()).map_err(|e| eyre!(e))?;

    let key = match api_key {
        Some(key) => key,
        None => rpassword::prompt_password("OMDb API key: ")?,
    };
    config.omdb.api_key = key.trim().to_string();
    config.save(&paths.config_file()).map_err(|e| eyre!(e))?;

    output.success("Saved OMDb API key");
    Ok(())
}

fn mask_key(key: &str) -> String {
    if key.is_empty() {
        String::new()
    } else if key.len() <= 4 {
        "*".repeat(key.len())
    } else {
        format!("{}{}", "*".repeat(key.len() - 4), &key[key.len() - 4..])
    }
}

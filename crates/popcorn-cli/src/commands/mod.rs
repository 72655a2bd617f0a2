pub mod browse;
pub mod config;
pub mod movie;
pub mod search;
pub mod watched;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use popcorn_config::{Config, JsonFileStore, PathManager};
use popcorn_core::{PersistedState, WATCHED_KEY};
use popcorn_models::WatchedEntry;
use popcorn_omdb::OmdbClient;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

pub(crate) fn load_config() -> Result<Config> {
    let paths = PathManager::default();
    let config = Config::load(&paths.config_file()).map_err(|e| eyre!(e))?;
    Ok(config)
}

/// Build the OMDb client, or fail with a pointer at `config set-key`.
pub(crate) fn open_database(config: &Config) -> Result<Arc<OmdbClient>> {
    let api_key = config.resolved_api_key().ok_or_else(|| {
        eyre!("no OMDb API key configured; run `popcorn config set-key` or set OMDB_API_KEY")
    })?;
    Ok(Arc::new(OmdbClient::with_base_url(
        api_key,
        config.omdb.base_url.clone(),
    )))
}

/// The watched list, read through from durable storage.
pub(crate) fn open_watched() -> Result<PersistedState<Vec<WatchedEntry>>> {
    let paths = PathManager::default();
    let store = Arc::new(JsonFileStore::new(paths.store_dir()).map_err(|e| eyre!(e))?);
    Ok(PersistedState::init(store, WATCHED_KEY, Vec::new()))
}

/// Spinner shown while a lookup is in flight. Hidden when stdout is not a
/// terminal so piped output stays clean.
pub(crate) fn lookup_spinner(message: &str) -> ProgressBar {
    if !std::io::stdout().is_terminal() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

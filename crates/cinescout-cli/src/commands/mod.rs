pub mod browse;
pub mod config;
pub mod details;
pub mod prompts;
pub mod search;
pub mod watchlist;

use std::time::Duration;

use cinescout_config::{resolve_api_key, Config, CredentialStore, PathManager};
use cinescout_core::{FileStorage, WatchlistStore};
use cinescout_omdb::OmdbClient;
use color_eyre::eyre::eyre;
use color_eyre::Result;

pub fn load_config() -> Result<Config> {
    let paths = PathManager::default();
    Config::load_or_default(&paths.config_file())
        .map_err(|e| eyre!("Failed to load config from {}: {}", paths.config_file().display(), e))
}

/// Watchlist construction never fails; bad storage falls open to empty.
pub fn open_watchlist() -> WatchlistStore<FileStorage> {
    let paths = PathManager::default();
    WatchlistStore::load(FileStorage::new(paths.watchlist_file()))
}

pub fn build_client(config: &Config) -> Result<OmdbClient> {
    let paths = PathManager::default();
    let mut cred_store = CredentialStore::new(paths.credentials_file());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    let api_key = resolve_api_key(&cred_store).ok_or_else(|| {
        eyre!("No OMDb API key configured. Run 'cinescout config set-key' or set OMDB_API_KEY")
    })?;

    Ok(OmdbClient::with_timeout(
        api_key,
        Duration::from_secs(config.search.fetch_timeout_secs),
    ))
}

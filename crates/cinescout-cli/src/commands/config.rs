use cinescout_config::{Config, CredentialStore, PathManager};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

use super::prompts;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => run_show(output),
        ConfigCommands::SetKey { key } => run_set_key(key, output),
    }
}

fn run_show(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = Config::load_or_default(&paths.config_file())
        .map_err(|e| eyre!("Failed to load config: {}", e))?;

    let mut cred_store = CredentialStore::new(paths.credentials_file());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    let key_status = if std::env::var("OMDB_API_KEY").is_ok() {
        "set (from environment)"
    } else if cred_store.get_omdb_api_key().is_some() {
        "set"
    } else {
        "not set"
    };

    match output.format() {
        OutputFormat::Human => {
            output.println(format!("Config file:    {}", paths.config_file().display()));
            output.println(format!("Watchlist file: {}", paths.watchlist_file().display()));
            output.println(format!("OMDb API key:   {}", key_status));
            output.println(format!(
                "Seed queries:   {}",
                config.search.seed_queries.join(", ")
            ));
            output.println(format!(
                "Max results:    {}",
                config
                    .search
                    .max_results
                    .map(|cap| cap.to_string())
                    .unwrap_or_else(|| "unbounded".to_string())
            ));
            output.println(format!(
                "Fetch timeout:  {}s",
                config.search.fetch_timeout_secs
            ));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": paths.config_file().display().to_string(),
                "watchlist_file": paths.watchlist_file().display().to_string(),
                "api_key": key_status,
                "seed_queries": config.search.seed_queries,
                "max_results": config.search.max_results,
                "fetch_timeout_secs": config.search.fetch_timeout_secs,
            }));
        }
    }

    Ok(())
}

fn run_set_key(key: Option<String>, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => prompts::prompt_password("OMDb API key")?,
    };

    let key = key.trim().to_string();
    if key.is_empty() {
        output.warn("No key given; nothing stored");
        return Ok(());
    }

    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create config directory: {}", e))?;

    let mut cred_store = CredentialStore::new(paths.credentials_file());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    cred_store.set_omdb_api_key(key);
    cred_store
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success("OMDb API key stored");
    Ok(())
}

use cinescout_core::FETCH_ERROR_MESSAGE;
use cinescout_models::WatchlistEntry;
use cinescout_omdb::{CatalogError, MovieCatalog};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

use super::prompts;
use crate::output::{Output, OutputFormat};
use crate::render;
use crate::WatchlistCommands;

pub async fn run_watchlist(cmd: WatchlistCommands, output: &Output) -> Result<()> {
    match cmd {
        WatchlistCommands::List => run_list(output),
        WatchlistCommands::Add { imdb_id } => run_add(&imdb_id, output).await,
        WatchlistCommands::Remove { imdb_id } => run_remove(&imdb_id, output),
        WatchlistCommands::Clear { yes } => run_clear(yes, output),
    }
}

fn run_list(output: &Output) -> Result<()> {
    let store = super::open_watchlist();

    match output.format() {
        OutputFormat::Human => {
            if store.is_empty() {
                output.info("No movies in your watchlist");
            } else {
                output.println(render::watchlist_table(store.entries()).to_string());
                output.info(format!("{} saved", store.len()));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "count": store.len(),
                "entries": store.entries(),
            }));
        }
    }

    Ok(())
}

async fn run_add(imdb_id: &str, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let client = super::build_client(&config)?;
    let mut store = super::open_watchlist();

    if store.contains(imdb_id) {
        output.info(format!("{} is already in the watchlist", imdb_id));
        return Ok(());
    }

    let spinner = render::fetch_spinner(&format!("Fetching {}...", imdb_id));
    let outcome = client.lookup(imdb_id).await;
    spinner.finish_and_clear();

    let detail = match outcome {
        Ok(detail) => detail,
        Err(CatalogError::Api(message)) => {
            output.error(message);
            return Ok(());
        }
        Err(err) => {
            tracing::warn!(error = %err, imdb_id, "lookup failed");
            output.error(FETCH_ERROR_MESSAGE);
            return Ok(());
        }
    };

    store
        .add(WatchlistEntry::from(&detail))
        .map_err(|e| eyre!("Failed to update watchlist: {}", e))?;
    output.success(format!("Added \"{}\" to the watchlist", detail.title));

    Ok(())
}

fn run_remove(imdb_id: &str, output: &Output) -> Result<()> {
    let mut store = super::open_watchlist();

    if store
        .remove(imdb_id)
        .map_err(|e| eyre!("Failed to update watchlist: {}", e))?
    {
        output.success(format!("Removed {} from the watchlist", imdb_id));
    } else {
        output.info(format!("{} was not in the watchlist", imdb_id));
    }

    Ok(())
}

fn run_clear(yes: bool, output: &Output) -> Result<()> {
    let mut store = super::open_watchlist();

    if store.is_empty() {
        output.info("Watchlist is already empty");
        return Ok(());
    }

    if !yes {
        let confirmed = prompts::prompt_yes_no(
            &format!("Remove all {} saved movies?", store.len()),
            false,
        )?;
        if !confirmed {
            output.info("Nothing removed");
            return Ok(());
        }
    }

    store
        .clear()
        .map_err(|e| eyre!("Failed to clear watchlist: {}", e))?;
    output.success("Watchlist cleared");

    Ok(())
}

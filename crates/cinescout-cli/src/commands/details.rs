use cinescout_core::FETCH_ERROR_MESSAGE;
use cinescout_models::WatchlistEntry;
use cinescout_omdb::{CatalogError, MovieCatalog};
use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::output::{Output, OutputFormat};
use crate::render;

pub async fn run_details(imdb_id: &str, add: bool, remove: bool, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let client = super::build_client(&config)?;
    let mut store = super::open_watchlist();

    let spinner = render::fetch_spinner(&format!("Fetching {}...", imdb_id));
    let outcome = client.lookup(imdb_id).await;
    spinner.finish_and_clear();

    let detail = match outcome {
        Ok(detail) => detail,
        Err(CatalogError::Api(message)) => {
            // e.g. "Incorrect IMDb ID." for an unknown identifier
            output.error(message);
            return Ok(());
        }
        Err(err) => {
            tracing::warn!(error = %err, imdb_id, "detail lookup failed");
            output.error(FETCH_ERROR_MESSAGE);
            return Ok(());
        }
    };

    if add {
        if store
            .add(WatchlistEntry::from(&detail))
            .map_err(|e| eyre!("Failed to update watchlist: {}", e))?
        {
            output.success(format!("Added \"{}\" to the watchlist", detail.title));
        } else {
            output.info(format!("\"{}\" is already in the watchlist", detail.title));
        }
    } else if remove {
        if store
            .remove(&detail.imdb_id)
            .map_err(|e| eyre!("Failed to update watchlist: {}", e))?
        {
            output.success(format!("Removed \"{}\" from the watchlist", detail.title));
        } else {
            output.info(format!("\"{}\" was not in the watchlist", detail.title));
        }
    }

    match output.format() {
        OutputFormat::Human => {
            render::print_detail(output, &detail, store.contains(&detail.imdb_id));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&render::detail_json(&detail, store.contains(&detail.imdb_id)));
        }
    }

    Ok(())
}

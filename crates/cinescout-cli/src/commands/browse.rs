use cinescout_core::{
    FileStorage, SearchSession, SearchStatus, WatchlistStore, FETCH_ERROR_MESSAGE,
};
use cinescout_models::{MovieSummary, SortKey, WatchlistEntry};
use cinescout_omdb::{CatalogError, MovieCatalog, OmdbClient};
use color_eyre::eyre::eyre;
use color_eyre::Result;

use super::prompts;
use crate::output::Output;
use crate::render;

/// Interactive session loop: the terminal rendition of the search page.
pub async fn run_browse(query: Option<String>, output: &Output) -> Result<()> {
    if !render::is_interactive() {
        output.error("browse needs an interactive terminal; use 'cinescout search' instead");
        return Ok(());
    }

    let config = super::load_config()?;
    let client = super::build_client(&config)?;
    let lookup_client = client.clone();
    let mut store = super::open_watchlist();

    let query = query.unwrap_or_else(|| seed_query(&config.search.seed_queries));
    let mut session = SearchSession::new(client).with_max_results(config.search.max_results);

    let spinner = render::fetch_spinner(&format!("Searching for \"{}\"...", query));
    session.start_search(&query).await;
    spinner.finish_and_clear();

    loop {
        render_session(&session, &store, output);

        let actions = [
            "Load more",
            "Go to page",
            "Sort results",
            "New search",
            "View details",
            "Toggle watchlist",
            "Show watchlist",
            "Quit",
        ];

        match prompts::prompt_select("Action", &actions)? {
            0 => {
                let spinner = render::fetch_spinner("Loading more movies...");
                session.load_more().await;
                spinner.finish_and_clear();
            }
            1 => {
                let raw = prompts::prompt_string("Page number")?;
                // Non-numeric, zero, and negative input is silently ignored
                if let Ok(page) = raw.trim().parse::<u32>() {
                    let spinner = render::fetch_spinner("Loading page...");
                    session.jump_to_page(page).await;
                    spinner.finish_and_clear();
                }
            }
            2 => {
                let keys = ["Title", "Release date", "IMDb rating"];
                let key = match prompts::prompt_select("Sort by", &keys)? {
                    0 => SortKey::Title,
                    1 => SortKey::ReleaseDate,
                    _ => SortKey::Rating,
                };
                session.set_sort_order(key);
            }
            3 => {
                let raw = prompts::prompt_string("Search for")?;
                // A blank query is a no-op by contract
                let spinner = render::fetch_spinner("Searching...");
                session.start_search(&raw).await;
                spinner.finish_and_clear();
            }
            4 => {
                if let Some(movie) = pick_movie(session.results())? {
                    let imdb_id = movie.imdb_id.clone();
                    show_details(&lookup_client, &imdb_id, &store, output).await?;
                }
            }
            5 => {
                if let Some(movie) = pick_movie(session.results())? {
                    let movie = movie.clone();
                    toggle_watchlist(&mut store, &movie, output)?;
                }
            }
            6 => {
                if store.is_empty() {
                    output.info("No movies in your watchlist");
                } else {
                    output.println(render::watchlist_table(store.entries()).to_string());
                }
            }
            _ => break,
        }
    }

    Ok(())
}

fn seed_query(seeds: &[String]) -> String {
    if seeds.is_empty() {
        return "Avengers".to_string();
    }
    let tick = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    seeds[(tick % seeds.len() as u64) as usize].clone()
}

fn render_session(
    session: &SearchSession<OmdbClient>,
    store: &WatchlistStore<FileStorage>,
    output: &Output,
) {
    if let SearchStatus::Error(message) = session.status() {
        output.error(message);
    }

    if session.results().is_empty() {
        output.info(format!("No results for \"{}\"", session.query()));
        return;
    }

    output.println(render::movie_table(session.results(), store).to_string());
    output.info(format!(
        "\"{}\": {} of {} results (through page {})",
        session.query(),
        session.results().len(),
        session.total_results(),
        session.page()
    ));
}

fn pick_movie(results: &[MovieSummary]) -> Result<Option<&MovieSummary>> {
    if results.is_empty() {
        return Ok(None);
    }
    let raw = prompts::prompt_string("Row number")?;
    let Ok(row) = raw.trim().parse::<usize>() else {
        return Ok(None);
    };
    Ok(row.checked_sub(1).and_then(|index| results.get(index)))
}

fn toggle_watchlist(
    store: &mut WatchlistStore<FileStorage>,
    movie: &MovieSummary,
    output: &Output,
) -> Result<()> {
    if store.contains(&movie.imdb_id) {
        store
            .remove(&movie.imdb_id)
            .map_err(|e| eyre!("Failed to update watchlist: {}", e))?;
        output.success(format!("Removed \"{}\" from the watchlist", movie.title));
    } else {
        store
            .add(WatchlistEntry::from(movie))
            .map_err(|e| eyre!("Failed to update watchlist: {}", e))?;
        output.success(format!("Added \"{}\" to the watchlist", movie.title));
    }
    Ok(())
}

async fn show_details(
    catalog: &OmdbClient,
    imdb_id: &str,
    store: &WatchlistStore<FileStorage>,
    output: &Output,
) -> Result<()> {
    let spinner = render::fetch_spinner("Fetching details...");
    let outcome = catalog.lookup(imdb_id).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(detail) => {
            render::print_detail(output, &detail, store.contains(imdb_id));
        }
        Err(CatalogError::Api(message)) => {
            output.error(message);
        }
        Err(err) => {
            tracing::warn!(error = %err, imdb_id, "detail lookup failed");
            output.error(FETCH_ERROR_MESSAGE);
        }
    }

    Ok(())
}

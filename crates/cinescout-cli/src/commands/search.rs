use cinescout_core::{SearchSession, SearchStatus};
use cinescout_models::SortKey;
use color_eyre::Result;
use serde_json::json;

use crate::output::{Output, OutputFormat};
use crate::render;

pub async fn run_search(
    query: &str,
    pages: u32,
    sort: Option<SortKey>,
    output: &Output,
) -> Result<()> {
    if query.trim().is_empty() {
        output.warn("Nothing to search for");
        return Ok(());
    }

    let config = super::load_config()?;
    let client = super::build_client(&config)?;
    let store = super::open_watchlist();

    let mut session = SearchSession::new(client).with_max_results(config.search.max_results);

    let spinner = render::fetch_spinner(&format!("Searching for \"{}\"...", query.trim()));
    session.start_search(query).await;

    for _ in 1..pages {
        if *session.status() != SearchStatus::Idle {
            break;
        }
        if session.total_results() as usize <= session.results().len() {
            // Everything the server has is already accumulated
            break;
        }
        session.load_more().await;
    }
    spinner.finish_and_clear();

    if let Some(key) = sort {
        session.set_sort_order(key);
    }

    if let SearchStatus::Error(message) = session.status() {
        output.error(message);
        if session.results().is_empty() {
            return Ok(());
        }
    }

    if session.results().is_empty() {
        output.info(format!("No movies found for \"{}\"", session.query()));
        return Ok(());
    }

    match output.format() {
        OutputFormat::Human => {
            output.println(render::movie_table(session.results(), &store).to_string());
            output.info(format!(
                "{} of {} results (through page {})",
                session.results().len(),
                session.total_results(),
                session.page()
            ));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "query": session.query(),
                "page": session.page(),
                "total_results": session.total_results(),
                "movies": render::movies_json(session.results(), &store),
            }));
        }
    }

    Ok(())
}

use std::io::IsTerminal;
use std::time::Duration;

use cinescout_core::{FileStorage, WatchlistStore};
use cinescout_models::{MovieDetail, MovieSummary, WatchlistEntry};
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use crate::output::Output;

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

/// Spinner shown while a fetch is in flight. Hidden (logged instead)
/// when output is not a terminal.
pub fn fetch_spinner(message: &str) -> ProgressBar {
    if !is_interactive() {
        tracing::info!(operation = "fetch", message = message, "fetch started");
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());
    spinner
}

pub fn movie_table(movies: &[MovieSummary], store: &WatchlistStore<FileStorage>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Title", "Year", "IMDb ID", "Saved"]);

    for (index, movie) in movies.iter().enumerate() {
        let saved = if store.contains(&movie.imdb_id) { "★" } else { "" };
        table.add_row(vec![
            (index + 1).to_string(),
            movie.title.clone(),
            movie.year.clone(),
            movie.imdb_id.clone(),
            saved.to_string(),
        ]);
    }

    table
}

pub fn watchlist_table(entries: &[WatchlistEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Title", "Year", "Rating", "IMDb ID", "Added"]);

    for entry in entries {
        table.add_row(vec![
            entry.title.clone(),
            entry.year.clone(),
            entry.imdb_rating.clone().unwrap_or_default(),
            entry.imdb_id.clone(),
            entry.date_added.format("%Y-%m-%d").to_string(),
        ]);
    }

    table
}

pub fn movies_json(
    movies: &[MovieSummary],
    store: &WatchlistStore<FileStorage>,
) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = movies
        .iter()
        .map(|movie| {
            json!({
                "imdb_id": movie.imdb_id,
                "title": movie.title,
                "year": movie.year,
                "poster": movie.poster,
                "in_watchlist": store.contains(&movie.imdb_id),
            })
        })
        .collect();
    json!(rows)
}

pub fn detail_json(detail: &MovieDetail, in_watchlist: bool) -> serde_json::Value {
    json!({
        "imdb_id": detail.imdb_id,
        "title": detail.title,
        "year": detail.year,
        "released": detail.released,
        "director": detail.director,
        "genres": detail.genres(),
        "plot": detail.plot,
        "rated": detail.rated,
        "cast": detail.cast(),
        "imdb_rating": detail.rating(),
        "poster": detail.poster,
        "in_watchlist": in_watchlist,
    })
}

pub fn print_detail(output: &Output, detail: &MovieDetail, in_watchlist: bool) {
    output.println(format!("{} ({})", detail.title, detail.year));
    output.println(format!("  Released:  {}", detail.released));
    output.println(format!("  Director:  {}", detail.director));
    match detail.rating() {
        Some(rating) => output.println(format!("  IMDb:      {:.1}/10", rating)),
        None => output.println("  IMDb:      not rated"),
    }
    output.println(format!("  Genre:     {}", detail.genres().join(", ")));
    output.println(format!("  Rated:     {}", detail.rated));
    if !detail.cast().is_empty() {
        output.println(format!("  Cast:      {}", detail.cast().join(", ")));
    }
    if !detail.plot.trim().is_empty() {
        output.println("");
        output.println(format!("  {}", detail.plot));
    }
    output.println("");
    output.println(format!(
        "  Watchlist: {}",
        if in_watchlist { "saved" } else { "not saved" }
    ));
}

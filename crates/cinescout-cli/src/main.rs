use cinescout_models::SortKey;
use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, details, search, watchlist};

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "cinescout")]
#[command(about = "Cinescout - find movies and keep a watchlist from your terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    raw.parse()
}

#[derive(Subcommand)]
enum Commands {
    /// Search for movies by title
    #[command(long_about = "Search OMDb for movies by title. Results accumulate across pages; use --pages to fetch several pages in one go and --sort to order them client-side.")]
    Search {
        /// Title to search for
        query: String,

        /// Number of result pages to accumulate
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Sort the accumulated results: title, released, or rating
        #[arg(long, value_parser = parse_sort_key)]
        sort: Option<SortKey>,
    },

    /// Interactive search session
    #[command(long_about = "Start an interactive session: search, load more pages, jump to a page, re-sort, view details, and toggle watchlist membership without leaving the terminal.")]
    Browse {
        /// Initial query (a rotating default is used when omitted)
        query: Option<String>,
    },

    /// Show details for one movie
    Details {
        /// IMDb identifier, e.g. tt0468569
        imdb_id: String,

        /// Add the movie to the watchlist
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "remove")]
        add: bool,

        /// Remove the movie from the watchlist
        #[arg(long, action = ArgAction::SetTrue)]
        remove: bool,
    },

    /// Manage the saved watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },

    /// Configure the API key and settings
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// List saved movies
    List,

    /// Save a movie by IMDb id (fetches its record first)
    Add {
        /// IMDb identifier, e.g. tt0468569
        imdb_id: String,
    },

    /// Remove a movie by IMDb id
    Remove {
        /// IMDb identifier, e.g. tt0468569
        imdb_id: String,
    },

    /// Remove every saved movie
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show,

    /// Store the OMDb API key
    SetKey {
        /// The key; prompted for when omitted
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query, pages, sort } => {
            search::run_search(&query, pages, sort, &output).await
        }
        Commands::Browse { query } => browse::run_browse(query, &output).await,
        Commands::Details {
            imdb_id,
            add,
            remove,
        } => details::run_details(&imdb_id, add, remove, &output).await,
        Commands::Watchlist { cmd } => watchlist::run_watchlist(cmd, &output).await,
        Commands::Config { cmd } => {
            config::run_config(cmd.unwrap_or(ConfigCommands::Show), &output).await
        }
    }
}

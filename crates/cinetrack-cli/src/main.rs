use clap::{ArgAction, Parser, Subcommand};
use cinetrack_core::{ViewFilter, WatchedSort, WatchlistSort};
use cinetrack_models::PersonalRating;
use commands::{catalog, config, data, stats, watched, watchlist};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cinetrack")]
#[command(about = "CineTrack - Keep track of the movies you want to see and the ones you've seen")]
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

    /// Write logs to the daily-rotated log file instead of stderr
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    log_to_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show popular movies from the catalog
    #[command(long_about = "Fetch the most popular movies from the configured catalog. When the catalog is unreachable or not configured, the built-in demo movies are shown instead.")]
    Popular,

    /// Search movies by title
    #[command(long_about = "Case-insensitive title search over the popular movies and the built-in demo movies. When nothing matches, a few similar suggestions are listed.")]
    Search {
        /// Text to look for in movie titles
        query: String,
    },

    /// Manage movies you want to watch
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },

    /// Manage movies you have watched
    Watched {
        #[command(subcommand)]
        cmd: WatchedCommands,
    },

    /// Show collection statistics
    Stats,

    /// Export both collections to a JSON backup file
    Export {
        /// Output file (defaults to cinetrack-backup-YYYY-MM-DD.json)
        #[arg(long, short)]
        file: Option<PathBuf>,
    },

    /// Replace both collections with the contents of a backup file
    Import {
        /// Backup file produced by `cinetrack export`
        file: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Erase the watchlist and the watched list
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Configure the catalog and show settings
    #[command(long_about = "Manage CineTrack configuration. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// List the watchlist
    List {
        /// all, high-rated or recent
        #[arg(long, default_value = "all")]
        filter: ViewFilter,

        /// added, rating, year or title
        #[arg(long, default_value = "added")]
        sort: WatchlistSort,
    },
    /// Add a movie from the popular list or a search
    Add {
        /// Movie id (e.g. tt0111161)
        id: String,

        /// Find the movie with this search instead of the popular list
        #[arg(long)]
        query: Option<String>,
    },
    /// Remove a movie from the watchlist
    Remove {
        id: String,
    },
}

#[derive(Subcommand)]
enum WatchedCommands {
    /// List watched movies
    List {
        /// all, rated or recent-watched
        #[arg(long, default_value = "all")]
        filter: ViewFilter,

        /// recent, personal-rating, rating, year or title
        #[arg(long, default_value = "recent")]
        sort: WatchedSort,
    },
    /// Mark a movie as watched
    #[command(long_about = "Mark a movie as watched. The movie is taken from the watchlist when it is there, otherwise from the popular list or from the results of --query.")]
    Add {
        id: String,

        /// Your own rating, 1 to 10
        #[arg(long, value_parser = parse_personal_rating)]
        rating: Option<PersonalRating>,

        /// Find the movie with this search instead of the popular list
        #[arg(long)]
        query: Option<String>,
    },
    /// Forget a watched movie
    Remove {
        id: String,
    },
    /// Move a watched movie back to the watchlist
    Unwatch {
        id: String,
    },
    /// Set your rating for a watched movie
    Rate {
        id: String,

        /// 1 to 10
        #[arg(value_parser = parse_personal_rating)]
        rating: PersonalRating,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Configure the movie catalog
    #[command(long_about = "Configure the RapidAPI movie catalog. Without --api-key you will be prompted for it. The CINETRACK_API_KEY environment variable takes precedence over the stored key.")]
    Catalog {
        /// RapidAPI key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,

        /// Value of the x-rapidapi-host header
        #[arg(long)]
        api_host: Option<String>,

        /// Full URL of the popular movies endpoint
        #[arg(long)]
        endpoint: Option<String>,

        /// Use the remote catalog
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "disable")]
        enable: bool,

        /// Always use the built-in demo movies
        #[arg(long, action = ArgAction::SetTrue)]
        disable: bool,
    },
}

fn parse_personal_rating(value: &str) -> Result<PersonalRating, String> {
    let number: u8 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number between 1 and 10", value))?;
    PersonalRating::new(number).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = if cli.log_to_file {
        Some(cinetrack_config::PathManager::default().log_file())
    } else {
        None
    };
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Popular => catalog::run_popular(&output).await,
        Commands::Search { query } => catalog::run_search(&query, &output).await,
        Commands::Watchlist { cmd } => match cmd {
            WatchlistCommands::List { filter, sort } => watchlist::run_list(filter, sort, &output),
            WatchlistCommands::Add { id, query } => watchlist::run_add(&id, query.as_deref(), &output).await,
            WatchlistCommands::Remove { id } => watchlist::run_remove(&id, &output),
        },
        Commands::Watched { cmd } => match cmd {
            WatchedCommands::List { filter, sort } => watched::run_list(filter, sort, &output),
            WatchedCommands::Add { id, rating, query } => watched::run_add(&id, rating, query.as_deref(), &output).await,
            WatchedCommands::Remove { id } => watched::run_remove(&id, &output),
            WatchedCommands::Unwatch { id } => watched::run_unwatch(&id, &output),
            WatchedCommands::Rate { id, rating } => watched::run_rate(&id, rating, &output),
        },
        Commands::Stats => stats::run_stats(&output),
        Commands::Export { file } => data::run_export(file, &output),
        Commands::Import { file, yes } => data::run_import(&file, yes, &output),
        Commands::Clear { yes } => data::run_clear(yes, &output),
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output)
        }
    }
}

use catalog_sync_config::PathManager;
use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, daemon, list, refresh, track, transfer};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "nextup")]
#[command(about = "nextup - Track your shows and never miss an episode")]
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

#[derive(Subcommand)]
enum Commands {
    /// Search the TV and anime catalogs
    Search {
        query: String,
    },
    /// Track a show from search results
    #[command(long_about = "Search the catalogs and start tracking a result. Non-TV results are cross-referenced against the TV catalog to recover a real episode schedule.")]
    Add {
        query: String,

        /// Track the n-th search result instead of the first
        #[arg(long, default_value_t = 1)]
        pick: usize,
    },
    /// List tracked shows with countdowns
    List {
        /// Sort order: 'soonest' or 'alpha' (persisted as a preference)
        #[arg(long)]
        sort: Option<String>,

        /// Reveal the first page * page-size shows
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long)]
        page_size: Option<usize>,

        /// Status filter, e.g. 'airing', 'ended', or 'all'
        #[arg(long)]
        status: Option<String>,
    },
    /// Shows airing today across catalogs
    Airing,
    /// Popular shows, optionally narrowed by genre
    Popular {
        #[arg(long)]
        genre: Option<String>,
    },
    /// Re-fetch stale schedule data for tracked shows
    Refresh,
    /// Pin a show to the top of every listing
    Pin {
        id: String,
    },
    /// Remove a show's pin
    Unpin {
        id: String,
    },
    /// Mark a show as watched
    Watched {
        id: String,
    },
    /// Attach a watch link to a show
    Link {
        id: String,
        url: String,
    },
    /// Stop tracking a show
    Remove {
        id: String,
    },
    /// Export tracked shows to a file
    Export {
        path: PathBuf,
    },
    /// Import tracked shows from an export file
    Import {
        path: PathBuf,

        /// Discard the current collection instead of merging
        #[arg(long, action = ArgAction::SetTrue)]
        replace: bool,
    },
    /// Run the scheduled refresh daemon in the foreground
    Daemon {
        /// Cron schedule expression (with seconds, e.g. '0 0 6 * * *')
        #[arg(long, value_name = "SCHEDULE")]
        schedule: Option<String>,

        /// Skip the initial refresh on startup
        #[arg(long, action = ArgAction::SetTrue)]
        no_startup_refresh: bool,
    },
    /// Configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration and file locations
    Show,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // The daemon logs to a rotating file; everything else to stderr
    let log_file = match &cli.command {
        Commands::Daemon { .. } => Some(PathManager::default().daemon_log_file()),
        _ => None,
    };
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => browse::run_search(&query, &output).await,
        Commands::Add { query, pick } => track::run_add(&query, pick, &output).await,
        Commands::List {
            sort,
            page,
            page_size,
            status,
        } => list::run_list(sort, page, page_size, status, &output),
        Commands::Airing => browse::run_airing(&output).await,
        Commands::Popular { genre } => browse::run_popular(genre.as_deref(), &output).await,
        Commands::Refresh => refresh::run_refresh(&output).await,
        Commands::Pin { id } => track::run_pin(&id, true, &output),
        Commands::Unpin { id } => track::run_pin(&id, false, &output),
        Commands::Watched { id } => track::run_watched(&id, &output),
        Commands::Link { id, url } => track::run_link(&id, &url, &output),
        Commands::Remove { id } => track::run_remove(&id, &output),
        Commands::Export { path } => transfer::run_export(&path, &output),
        Commands::Import { path, replace } => transfer::run_import(&path, replace, &output),
        Commands::Daemon {
            schedule,
            no_startup_refresh,
        } => daemon::run_daemon(schedule, no_startup_refresh, &output).await,
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => config::run_show(&output),
        },
    }
}

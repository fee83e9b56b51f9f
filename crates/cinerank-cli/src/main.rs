use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser, Subcommand};
use cinerank_config::{Config, PathManager};
use cinerank_models::{HistorySort, Period, SortOption};
use color_eyre::eyre::eyre;
use commands::{calendar, config, history, queue, stats, CommandContext};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;
mod snapshot;

#[derive(Parser)]
#[command(name = "cinerank")]
#[command(about = "CineRank - decide what to watch next and see how you've been watching")]
#[command(version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Snapshot file to read (.json or .csv); defaults to the configured one
    #[arg(long, global = true, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Evaluate as of this RFC 3339 instant instead of the current time
    #[arg(long, global = true, value_name = "RFC3339", value_parser = parse_now)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the to-watch queue in ranked order
    #[command(long_about = "List queued movies. The default 'ranked' order blends release age, time on the list, priority and anticipation into a single score.")]
    Queue {
        /// Ordering: ranked, recent, priority
        #[arg(long)]
        sort: Option<SortOption>,

        /// Case-insensitive match on title, director or actors
        #[arg(long)]
        search: Option<String>,

        /// Show at most this many movies
        #[arg(long)]
        limit: Option<usize>,

        /// Show the weighted components of each score
        #[arg(long, action = ArgAction::SetTrue)]
        explain: bool,
    },
    /// Show watch statistics for a period
    #[command(long_about = "Show the total, the average per week/month/year, the current streak and a trend chart. Weekly uses daily buckets, monthly uses weeks and yearly uses months.")]
    Stats {
        /// weekly, monthly or yearly
        #[arg(long)]
        period: Option<Period>,
    },
    /// List watched movies
    History {
        /// Ordering: date-desc, date-asc, rating-desc, rating-asc
        #[arg(long)]
        sort: Option<HistorySort>,

        /// Case-insensitive match on title, director or actors
        #[arg(long)]
        search: Option<String>,

        /// Only movies watched in this year
        #[arg(long)]
        year: Option<i32>,

        /// Only movies watched in this month (1-12)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Show a month of watches as a calendar
    Calendar {
        /// Month to show as YYYY-MM; defaults to the current month
        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,
    },
    /// View or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let output = output::Output::new(cli.output, cli.quiet);
    let paths = PathManager::default();

    // A broken config must not lock the user out of `config init --force`
    let loaded = Config::load_or_default(&paths.config_file()).and_then(|config| {
        config.validate()?;
        Ok(config)
    });
    let config = match (&cli.command, loaded) {
        (_, Ok(config)) => config,
        (Commands::Config { .. }, Err(e)) => {
            output.warn(format!("Ignoring invalid configuration: {}", e));
            Config::default()
        }
        (_, Err(e)) => {
            return Err(eyre!(
                "Invalid configuration at {}: {}",
                paths.config_file().display(),
                e
            ))
        }
    };

    logging::init_logging(cli.verbose, cli.quiet, &config.logging.level, config.logging.file.as_deref())
        .map_err(|e| eyre!("{}", e))?;
    tracing::debug!(config_file = %paths.config_file().display(), "Configuration resolved");

    let now = cli.now.unwrap_or_else(Utc::now);

    let ctx = CommandContext::new(config, paths, cli.snapshot, now)?;

    match cli.command {
        Commands::Queue { sort, search, limit, explain } => {
            queue::run_queue(&ctx, sort, search, limit, explain, &output)
        }
        Commands::Stats { period } => stats::run_stats(&ctx, period, &output),
        Commands::History { sort, search, year, month } => {
            history::run_history(&ctx, sort, search, year, month, &output)
        }
        Commands::Calendar { month } => calendar::run_calendar(&ctx, month, &output),
        Commands::Config { cmd } => config::run_config(cmd, &ctx, &output),
    }
}

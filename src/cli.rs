use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Limitless TCG tournament standings fetcher
///
/// Lists every tournament of a format and fetches all their standings
/// concurrently. Requires the LIMITLESS_API_KEY environment variable.
#[derive(Parser, Debug)]
#[command(about, version, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    #[command(subcommand)]
    pub mode: Mode,

    /// Maximum number of standings requests in flight at once.
    /// Unbounded unless set here, in the config file or via LIMITLESS_MAX_CONCURRENCY.
    #[arg(long = "max-concurrency", global = true, help_heading = "Fetching")]
    pub max_concurrency: Option<usize>,

    /// HTTP timeout in seconds for every request.
    #[arg(long = "timeout", global = true, help_heading = "Fetching")]
    pub timeout: Option<u64>,

    /// Exit with a non-zero status when any tournament's standings failed to load.
    #[arg(long = "fail-on-error", global = true, help_heading = "Fetching")]
    pub fail_on_error: bool,

    /// Also write logs to the terminal, not just the log file.
    #[arg(long = "debug", global = true, help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// List the tournaments of a format and fetch every standings table.
    Tours {
        /// Format identifier, e.g. vgc23
        format: String,
    },
    /// List the games and formats the API exposes.
    Formats {
        /// Only show the game with this id, e.g. VGC
        #[arg(long = "game")]
        game: Option<String>,
    },
    /// Show the effective configuration (the API key is masked).
    Config,
}

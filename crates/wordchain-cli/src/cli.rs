use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use wordchain_core::solver::DEFAULT_MAX_NODES;
use wordchain_core::{Alphabet, Coordinate, LengthCheck, SolverConfig};

/// Lay a chain of overlapping words along a path of marked grid cells
#[derive(Debug, Parser)]
#[command(name = "wordchain", version, about)]
pub struct Cli {
    /// Store file holding the saved puzzle
    #[arg(long, global = true, env = "WORDCHAIN_STORE")]
    pub store: Option<PathBuf>,

    /// Letters allowed in the word list
    #[arg(long, global = true, value_enum, default_value_t = AlphabetChoice::Lithuanian)]
    pub alphabet: AlphabetChoice,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use the high contrast palette
    #[arg(long, global = true)]
    pub high_contrast: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save a grid and word list to the store
    Save {
        /// Grid text file: `.` empty, `#` marked, any other character a fixed letter
        #[arg(long)]
        grid: PathBuf,
        /// Newline-delimited word list
        #[arg(long)]
        words: PathBuf,
    },
    /// Print the saved puzzle
    Show,
    /// Remove the saved puzzle
    Clear,
    /// Print the path traced from a start cell
    Path {
        /// Start cell as `x,y`
        #[arg(long, allow_hyphen_values = true)]
        start: Coordinate,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Solve the puzzle from a start cell
    Solve {
        /// Start cell as `x,y`
        #[arg(long, allow_hyphen_values = true)]
        start: Coordinate,
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        limits: LimitArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Read the puzzle from files instead of the store
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Grid text file (overrides the saved grid)
    #[arg(long)]
    pub grid: Option<PathBuf>,
    /// Word list file (overrides the saved words)
    #[arg(long)]
    pub words: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct LimitArgs {
    /// Give up after this many search nodes
    #[arg(long, conflicts_with = "unbounded")]
    pub max_nodes: Option<u64>,
    /// Search without a node limit
    #[arg(long)]
    pub unbounded: bool,
    /// Give up after this many milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,
    /// Allow solutions that leave some words unused
    #[arg(long)]
    pub any_length: bool,
}

impl LimitArgs {
    pub fn to_config(&self) -> SolverConfig {
        let max_nodes = if self.unbounded {
            None
        } else {
            Some(self.max_nodes.unwrap_or(DEFAULT_MAX_NODES))
        };
        let length_check = if self.any_length {
            LengthCheck::Bounds
        } else {
            LengthCheck::Exact
        };
        SolverConfig::default()
            .with_max_nodes(max_nodes)
            .with_time_limit(self.time_limit_ms.map(Duration::from_millis))
            .with_length_check(length_check)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlphabetChoice {
    Lithuanian,
    Latin,
}

impl AlphabetChoice {
    pub fn alphabet(self) -> Alphabet {
        match self {
            AlphabetChoice::Lithuanian => Alphabet::lithuanian(),
            AlphabetChoice::Latin => Alphabet::latin(),
        }
    }
}

impl Cli {
    /// env_logger filter for the `-v` count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

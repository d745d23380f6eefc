use clap::{ArgAction, Args, Parser, Subcommand};
use relcycle_core::{CyclePhase, NOW_SENTINEL, OutputFormat};

/// Top-level CLI entrypoint.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "relcycle",
    version,
    about = "Compute release versions, branches and code-freeze dates",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every subcommand.
#[derive(Debug, Clone, Args, Default)]
pub struct GlobalArgs {
    /// Output format (defaults to the config value).
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Also write JSON logs to the persistent log file.
    #[arg(long = "log-file", global = true, action = ArgAction::SetTrue)]
    pub log_file: bool,

    /// Never append to $GITHUB_OUTPUT, even when it is set.
    #[arg(long = "no-github-output", global = true, action = ArgAction::SetTrue)]
    pub no_github_output: bool,
}

/// Supported subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the version, branch names and upcoming release dates.
    GetVersion(ReferenceArgs),
    /// Succeed only on a monthly code-freeze day.
    VerifyDay(VerifyDayArgs),
    /// Print the monthly or accelerated cycle for a date.
    Cycle(CycleArgs),
    /// Print the next milestone version.
    Milestone(ReferenceArgs),
    /// List every release cycle between two dates.
    Calendar(CalendarArgs),
    /// Inspect or create the configuration file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Reference date shared by the date-driven subcommands.
#[derive(Debug, Clone, Args)]
pub struct ReferenceArgs {
    /// Date to compute from (ISO 8601 or "now").
    #[arg(
        short = 'o',
        long = "override",
        value_name = "DATE",
        default_value = NOW_SENTINEL
    )]
    pub reference: String,
}

impl Default for ReferenceArgs {
    fn default() -> Self {
        Self {
            reference: NOW_SENTINEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Args, Default)]
pub struct VerifyDayArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Succeed even when the date is not a code-freeze day.
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub force: bool,
}

#[derive(Debug, Clone, Args, Default)]
pub struct CycleArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Resolve the accelerated (weekly) cycle instead of the monthly one.
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub accelerated: bool,

    /// Look up the cycle that shipped rather than the one in development.
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub released: bool,
}

impl CycleArgs {
    pub fn phase(&self) -> CyclePhase {
        if self.released {
            CyclePhase::Released
        } else {
            CyclePhase::Development
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct CalendarArgs {
    /// First date of the range (ISO 8601 or "now").
    #[arg(long, value_name = "DATE")]
    pub start: String,

    /// Last date of the range (ISO 8601 or "now").
    #[arg(long, value_name = "DATE")]
    pub end: String,
}

/// Configuration subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration and where it was loaded from.
    Show,
    /// Write a default config.toml.
    Init {
        /// Overwrite an existing file.
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

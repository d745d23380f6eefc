//! Command-line front end for the release-cycle calculator.

pub mod cli_args;
pub mod output;

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use relcycle_core::{
    ConfigError, ConfigLoadResult, ConfigSource, FileConfig, InvalidDateError,
    LoggingDestination, LoggingError, OutputFormat, ReleaseSummary, accelerated_cycle,
    config_path, init_logging, is_code_freeze_day, load_config, monthly_cycle,
    next_code_freeze_day, next_milestone, resolve_today, save_config_to, versions_between,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use cli_args::{
    CalendarArgs, Cli, Command, ConfigCommand, CycleArgs, GlobalArgs, ReferenceArgs,
    VerifyDayArgs,
};

const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),
    #[error("{date} is not a code freeze day (next one is {next})")]
    NotFreezeDay { date: NaiveDate, next: NaiveDate },
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("configuration already exists at {0}; pass --force to overwrite")]
    ConfigExists(PathBuf),
    #[error("failed to render TOML: {0}")]
    Toml(#[from] toml::ser::Error),
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write $GITHUB_OUTPUT: {0}")]
    GithubOutput(#[source] io::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// Settings resolved once per invocation from flags, config file and environment.
#[derive(Debug, Clone)]
pub struct Context {
    pub now: DateTime<Utc>,
    pub format: OutputFormat,
    pub github_output: Option<PathBuf>,
    pub config: FileConfig,
    pub config_source: ConfigSource,
    pub config_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct FreezeDayReport {
    reference: NaiveDate,
    is_code_freeze_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_code_freeze_day: Option<NaiveDate>,
}

impl FreezeDayReport {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("reference", self.reference.to_string()),
            ("is_code_freeze_day", self.is_code_freeze_day.to_string()),
        ];
        if let Some(next) = self.next_code_freeze_day {
            pairs.push(("next_code_freeze_day", next.to_string()));
        }
        pairs
    }
}

impl Context {
    pub fn resolve(
        global: &GlobalArgs,
        load: &ConfigLoadResult,
        now: DateTime<Utc>,
        github_output_env: Option<OsString>,
    ) -> Self {
        let config = &load.config;
        let format = global.format.unwrap_or(config.output.format);
        let github_output = if global.no_github_output || !config.output.github_output {
            None
        } else {
            github_output_env
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };

        Self {
            now,
            format,
            github_output,
            config: config.clone(),
            config_source: load.source,
            config_path: config_path(),
        }
    }

    fn reference(&self, input: &str) -> Result<NaiveDate, CliError> {
        Ok(resolve_today(Some(input), self.now)?)
    }

    fn publish(&self, pairs: &[(&str, String)]) -> Result<(), CliError> {
        if let Some(path) = self.github_output.as_deref() {
            output::append_github_output(path, pairs).map_err(CliError::GithubOutput)?;
        }
        Ok(())
    }
}

/// Entry point used by the `relcycle` binary.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let destination = if cli.global.log_file {
        LoggingDestination::FileAndStderr
    } else {
        LoggingDestination::StderrOnly
    };
    if let Some(path) = init_logging(destination)? {
        debug!(path = %path.display(), "logging to file");
    }

    let load = load_config();
    for warning in &load.warnings {
        eprintln!("Warning: {warning}");
    }

    let context = Context::resolve(
        &cli.global,
        &load,
        Utc::now(),
        env::var_os(GITHUB_OUTPUT_ENV),
    );
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &context, &mut out)
}

/// Run one subcommand, writing human or JSON output to `out`.
pub fn execute<W: Write + ?Sized>(
    command: &Command,
    context: &Context,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        Command::GetVersion(args) => {
            let reference = context.reference(&args.reference)?;
            let summary = ReleaseSummary::at(reference);
            info!(%reference, version = %summary.version, "resolved release summary");
            let pairs = summary.output_pairs();
            render(context, out, &summary, &pairs)?;
            context.publish(&pairs)
        }
        Command::VerifyDay(args) => {
            let reference = context.reference(&args.reference.reference)?;
            let frozen = is_code_freeze_day(reference);
            let report = FreezeDayReport {
                reference,
                is_code_freeze_day: frozen,
                next_code_freeze_day: (!frozen).then(|| next_code_freeze_day(reference)),
            };
            let pairs = report.pairs();
            context.publish(&pairs)?;

            match report.next_code_freeze_day {
                Some(next) if !args.force => Err(CliError::NotFreezeDay {
                    date: reference,
                    next,
                }),
                next => {
                    if let Some(next) = next {
                        warn!(
                            %reference,
                            %next,
                            "not a code freeze day; continuing because of --force"
                        );
                    }
                    render(context, out, &report, &pairs)
                }
            }
        }
        Command::Cycle(args) => {
            let reference = context.reference(&args.reference.reference)?;
            let cycle = if args.accelerated {
                accelerated_cycle(reference, args.phase())
            } else {
                monthly_cycle(reference, args.phase())
            };
            let pairs = output::cycle_pairs(&cycle);
            render(context, out, &cycle, &pairs)?;
            context.publish(&pairs)
        }
        Command::Milestone(args) => {
            let reference = context.reference(&args.reference)?;
            let milestone = next_milestone(reference);
            match context.format {
                OutputFormat::Text => writeln!(out, "{milestone}")?,
                OutputFormat::Json => {
                    let value = serde_json::json!({ "next_milestone": milestone });
                    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
                }
            }
            context.publish(&[("next_milestone", milestone.to_string())])
        }
        Command::Calendar(args) => {
            let start = context.reference(&args.start)?;
            let end = context.reference(&args.end)?;
            let cycles = versions_between(start, end);
            match context.format {
                OutputFormat::Text => output::write_cycle_table(out, &cycles)?,
                OutputFormat::Json => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&cycles)?)?;
                }
            }
            Ok(())
        }
        Command::Config(command) => handle_config_command(command, context, out),
    }
}

fn render<W: Write + ?Sized, T: Serialize>(
    context: &Context,
    out: &mut W,
    value: &T,
    pairs: &[(&str, String)],
) -> Result<(), CliError> {
    match context.format {
        OutputFormat::Text => output::write_pairs(out, pairs)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
    }
    Ok(())
}

fn handle_config_command<W: Write + ?Sized>(
    command: &ConfigCommand,
    context: &Context,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        ConfigCommand::Show => {
            let origin = match context.config_source {
                ConfigSource::File => "file",
                ConfigSource::Default => "defaults",
            };
            match context.format {
                OutputFormat::Text => {
                    writeln!(out, "# {} ({origin})", context.config_path.display())?;
                    write!(out, "{}", toml::to_string_pretty(&context.config)?)?;
                }
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "path": context.config_path,
                        "source": origin,
                        "config": context.config,
                    });
                    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
                }
            }
            Ok(())
        }
        ConfigCommand::Init { force } => {
            let path = &context.config_path;
            if path.exists() && !force {
                return Err(CliError::ConfigExists(path.clone()));
            }
            save_config_to(path, &FileConfig::default())?;
            writeln!(out, "Wrote default configuration to {}", path.display())?;
            Ok(())
        }
    }
}

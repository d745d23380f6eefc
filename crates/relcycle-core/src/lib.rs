//! Core library crate computing monthly and accelerated release cycles.
//!
//! Monthly releases ship on the second Tuesday of each month; accelerated releases freeze
//! every Wednesday and ship the following Tuesday. All lookups are pure functions of a
//! reference date, so callers resolve "now" themselves (see [`resolve_today`]).

pub mod accelerated;
pub mod calendar;
pub mod config;
pub mod cycle;
pub mod error;
pub mod logging;
pub mod monthly;
pub mod query;
pub mod range;

pub use accelerated::accelerated_cycle;
pub use calendar::{NOW_SENTINEL, parse_iso_date, resolve_today};
pub use config::{
    ConfigError, ConfigLoadResult, ConfigSource, FileConfig, OutputFormat, OutputPreferences,
    config_directory, config_path, load_config, load_config_from, save_config, save_config_to,
};
pub use cycle::{CyclePhase, ReleaseCycle, ReleaseVersion};
pub use error::InvalidDateError;
pub use logging::{LoggingDestination, LoggingError, current_log_path, init_logging};
pub use monthly::{is_second_tuesday, monthly_cycle, second_tuesday};
pub use query::{
    ReleaseSummary, branch_name, current_version, is_code_freeze_day, monthly_branch_name,
    monthly_version, next_code_freeze_day, next_milestone, next_monthly_release_date,
    next_release_date,
};
pub use range::versions_between;

//! vuplan CLI library
//!
//! Command-line front end for the `vuplan` load-test calculator.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp))]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{
    CalcArgs, Cli, ColorArg, Commands, ConfigArgs, InitArgs, InputArgs, ReportFormat,
    ScenarioArg, ScriptArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{init_logging, Reporter};

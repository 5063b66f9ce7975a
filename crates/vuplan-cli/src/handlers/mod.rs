//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains the execution logic for one CLI command
//! plus the pure helpers it is built from.

pub mod calc;
pub mod config;
pub mod init;
pub mod inputs;
pub mod script;

pub use calc::{execute_calc, render_calc, zero_plan_warning};
pub use config::{describe_config, execute_config};
pub use init::{execute_init, write_starter_config};
pub use inputs::{merge_inputs, merge_script_options, resolve_plan};
pub use script::{execute_script, render_script, validate_endpoint};

//! vuplan: size k6 load tests from production traffic numbers
//!
//! ## Usage
//!
//! ```bash
//! vuplan calc -r 1989 -u hour -t 200          # Plan for every scenario
//! vuplan calc --format json                   # Same, as JSON
//! vuplan script --scenario stress -o load.js  # Generate a k6 script
//! vuplan init                                 # Write a starter vuplan.yaml
//! ```

use clap::Parser;
use std::process::ExitCode;
use vuplan_cli::{
    handlers, init_logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    init_logging(config.verbosity);
    console::set_colors_enabled(config.color.should_color());
    console::set_colors_enabled_stderr(config.color.should_color());
    tracing::debug!(?config, "starting vuplan v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Calc(args) => handlers::execute_calc(&config, &args),
        Commands::Script(args) => handlers::execute_script(&config, &args),
        Commands::Init(args) => handlers::execute_init(&config, &args),
        Commands::Config(args) => handlers::execute_config(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_config_path(cli.config.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_from_flags() {
        let cli = Cli::parse_from(["vuplan", "-v", "--color", "never", "calc"]);
        let config = build_config(&cli);
        assert_eq!(config.verbosity, Verbosity::Verbose);
        assert_eq!(config.color, ColorChoice::Never);
        assert!(config.config_path.is_none() || std::env::var_os("VUPLAN_CONFIG").is_some());
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let cli = Cli::parse_from(["vuplan", "-q", "-vv", "config"]);
        assert_eq!(build_config(&cli).verbosity, Verbosity::Quiet);
    }
}

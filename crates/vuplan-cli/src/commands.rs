//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vuplan::Scenario;

/// vuplan: size k6 load tests from production traffic numbers
#[derive(Parser, Debug)]
#[command(name = "vuplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Plan configuration file (defaults to ./vuplan.yaml when present)
    #[arg(long, global = true, env = "VUPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate VUs, RPS and request totals for every scenario
    Calc(CalcArgs),

    /// Generate a k6 script for one scenario
    Script(ScriptArgs),

    /// Write a starter vuplan.yaml
    Init(InitArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Calculator inputs
///
/// Values are taken as text and coerced the same way a form would be:
/// an empty or non-numeric volume or response time counts as 0, a bad
/// multiplier or duration falls back to its default.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Requests observed over one time unit (e.g. peak-hour requests)
    #[arg(short = 'r', long = "requests", value_name = "COUNT", allow_hyphen_values = true)]
    pub requests: Option<String>,

    /// Time unit the request count covers (second, hour, day)
    #[arg(short = 'u', long = "unit", value_name = "UNIT")]
    pub unit: Option<String>,

    /// Average response time in milliseconds
    #[arg(short = 't', long = "response-time", value_name = "MS", allow_hyphen_values = true)]
    pub response_time: Option<String>,

    /// Stress multiplier (1.5 = 150% of normal load)
    #[arg(long = "stress", value_name = "FACTOR", allow_hyphen_values = true)]
    pub stress: Option<String>,

    /// Spike multiplier (2 = 200% of normal load)
    #[arg(long = "spike", value_name = "FACTOR", allow_hyphen_values = true)]
    pub spike: Option<String>,

    /// Smoke test duration in minutes
    #[arg(long, value_name = "MINUTES")]
    pub smoke_minutes: Option<String>,

    /// Load test duration in minutes
    #[arg(long, value_name = "MINUTES")]
    pub load_minutes: Option<String>,

    /// Stress test duration in minutes
    #[arg(long, value_name = "MINUTES")]
    pub stress_minutes: Option<String>,

    /// Spike test duration in minutes
    #[arg(long, value_name = "MINUTES")]
    pub spike_minutes: Option<String>,
}

/// Arguments for the calc command
#[derive(Parser, Debug)]
pub struct CalcArgs {
    /// Calculator inputs
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

/// Arguments for the script command
#[derive(Parser, Debug)]
pub struct ScriptArgs {
    /// Calculator inputs
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Scenario to generate
    #[arg(short, long, value_enum, default_value = "load")]
    pub scenario: ScenarioArg,

    /// Endpoint the script requests
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Write the script to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Directory to write vuplan.yaml into
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show the built-in defaults, ignoring any config file
    #[arg(long)]
    pub defaults: bool,
}

/// Report output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Scenario selector
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScenarioArg {
    /// Smoke test (10% load)
    Smoke,
    /// Load test (normal load)
    #[default]
    Load,
    /// Stress test (stress multiplier)
    Stress,
    /// Spike test (spike multiplier)
    Spike,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Smoke => Self::Smoke,
            ScenarioArg::Load => Self::Load,
            ScenarioArg::Stress => Self::Stress,
            ScenarioArg::Spike => Self::Spike,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_calc_defaults() {
        let cli = parse(&["vuplan", "calc"]);
        match cli.command {
            Commands::Calc(args) => {
                assert_eq!(args.format, ReportFormat::Text);
                assert!(args.inputs.requests.is_none());
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn test_parse_calc_inputs() {
        let cli = parse(&[
            "vuplan", "calc", "-r", "1989", "-u", "hour", "-t", "200", "--stress", "2",
            "--format", "json",
        ]);
        match cli.command {
            Commands::Calc(args) => {
                assert_eq!(args.inputs.requests.as_deref(), Some("1989"));
                assert_eq!(args.inputs.unit.as_deref(), Some("hour"));
                assert_eq!(args.inputs.response_time.as_deref(), Some("200"));
                assert_eq!(args.inputs.stress.as_deref(), Some("2"));
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn test_parse_empty_and_negative_values() {
        let cli = parse(&["vuplan", "calc", "--requests", "", "--response-time", "-5"]);
        match cli.command {
            Commands::Calc(args) => {
                assert_eq!(args.inputs.requests.as_deref(), Some(""));
                assert_eq!(args.inputs.response_time.as_deref(), Some("-5"));
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn test_parse_script() {
        let cli = parse(&[
            "vuplan",
            "script",
            "--scenario",
            "spike",
            "--endpoint",
            "http://localhost/",
            "-o",
            "load.js",
        ]);
        match cli.command {
            Commands::Script(args) => {
                assert_eq!(Scenario::from(args.scenario), Scenario::Spike);
                assert_eq!(args.endpoint.as_deref(), Some("http://localhost/"));
                assert_eq!(args.output, Some(PathBuf::from("load.js")));
            }
            _ => panic!("expected script"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["vuplan", "-vv", "--color", "never", "--config", "x.yaml", "config"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.color, ColorArg::Never));
        assert_eq!(cli.config, Some(PathBuf::from("x.yaml")));
    }

    #[test]
    fn test_unknown_scenario_rejected() {
        assert!(Cli::try_parse_from(["vuplan", "script", "--scenario", "soak"]).is_err());
    }
}

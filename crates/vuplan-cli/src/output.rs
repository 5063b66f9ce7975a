//! Status output and logging setup
//!
//! Results (reports, scripts) go to stdout so they can be piped; status
//! lines and logs go to stderr.

use console::{style, Term};
use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, Verbosity};

/// Status line writer
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Create a reporter matching the CLI configuration
    #[must_use]
    pub fn from_config(config: &CliConfig) -> Self {
        Self::new(config.color.should_color(), config.verbosity.is_quiet())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let _ = self.term.write_line(&self.format_success(message));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let _ = self.term.write_line(&self.format_warning(message));
    }

    /// Print an informational message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let line = if self.use_color {
            style(message).dim().to_string()
        } else {
            message.to_string()
        };
        let _ = self.term.write_line(&line);
    }

    fn format_success(&self, message: &str) -> String {
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };
        format!("{prefix} {message}")
    }

    fn format_warning(&self, message: &str) -> String {
        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };
        format!("{prefix} {message}")
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise the filter follows `-q`/`-v`.
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_prefixes() {
        let reporter = Reporter::new(false, false);
        assert_eq!(reporter.format_success("done"), "OK done");
        assert_eq!(reporter.format_warning("careful"), "WARN careful");
    }

    #[test]
    fn test_colored_prefixes_keep_message() {
        let reporter = Reporter::new(true, false);
        assert!(reporter.format_success("done").ends_with(" done"));
    }

    #[test]
    fn test_from_config_quiet() {
        let config = CliConfig::new().with_verbosity(Verbosity::Quiet);
        assert!(Reporter::from_config(&config).quiet);
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(Verbosity::Normal);
        init_logging(Verbosity::Debug);
    }
}

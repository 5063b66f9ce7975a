//! Init command handler

use std::path::{Path, PathBuf};
use vuplan::{PlanConfig, CONFIG_FILE_NAME};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use crate::InitArgs;

/// Execute the init command
pub fn execute_init(config: &CliConfig, args: &InitArgs) -> CliResult<()> {
    let path = write_starter_config(&args.path, args.force)?;
    Reporter::from_config(config).success(&format!("Created {}", path.display()));
    Ok(())
}

/// Write a starter `vuplan.yaml` into `dir`, returning its path
pub fn write_starter_config(dir: &Path, force: bool) -> CliResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(CONFIG_FILE_NAME);

    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let mut content = String::from(STARTER_HEADER);
    content.push_str(&PlanConfig::starter().to_yaml()?);
    std::fs::write(&path, content)?;
    tracing::info!(path = %path.display(), "wrote starter configuration");
    Ok(path)
}

const STARTER_HEADER: &str = "\
# vuplan plan configuration
#
# request_volume is counted over time_unit (second, hour or day).
# Command-line flags override values here.
";

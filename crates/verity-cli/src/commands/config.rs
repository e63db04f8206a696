//! `verity config`: inspect the resolved configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::List => {
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.header("Current Configuration:")?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            let path = AppConfig::config_path();
            output.print(&path.display().to_string())?;
            if !path.exists() {
                output.info("No file there yet; built-in defaults apply")?;
            }
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(format!("{:?}", config.output.format).to_lowercase()),
        "validation.preserve_empty" => Ok(config.validation.preserve_empty.to_string()),
        "validation.base_dir" => Ok(config
            .validation
            .base_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

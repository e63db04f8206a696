//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `VERITY__SECTION__KEY`
//! 3. Config file (`--config`, or `config.toml` in the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

const DEFAULT_CONFIG_TOML: &str = r#"
[output]
no_color = false
format = "auto"

[validation]
preserve_empty = false
"#;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Defaults for `verity validate`.
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Used when `--output-format` is left at `auto`.
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Report entries without errors too.
    pub preserve_empty: bool,
    /// Relative file paths in documents resolve against this directory
    /// instead of the document's own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                no_color: false,
                format: OutputFormat::Auto,
            },
            validation: ValidationConfig {
                preserve_empty: false,
                base_dir: None,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// A file passed via `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let env = Environment::with_prefix("VERITY")
            .separator("__")
            .try_parsing(true);
        match config_file {
            Some(path) => Self::build(Some((path.as_path(), true)), env),
            None => Self::build(Some((Self::config_path().as_path(), false)), env),
        }
    }

    fn build(file: Option<(&Path, bool)>, env: Environment) -> CliResult<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG_TOML, FileFormat::Toml));

        if let Some((path, required)) = file {
            debug!(path = %path.display(), required, "reading config file");
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        builder
            .add_source(env)
            .build()
            .and_then(Config::try_deserialize::<Self>)
            .map_err(|e| CliError::ConfigError {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.verity.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "verity", "verity")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".verity.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let mut map = config::Map::new();
        for (k, v) in vars {
            map.insert((*k).to_owned(), (*v).to_owned());
        }
        Environment::with_prefix("VERITY")
            .separator("__")
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn embedded_defaults_match_default_impl() {
        let cfg = AppConfig::build(None, env(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[output]\nformat = \"json\"\n\n[validation]\nbase_dir = \"/srv/uploads\"\n",
        )
        .unwrap();

        let cfg = AppConfig::build(Some((path.as_path(), true)), env(&[])).unwrap();
        assert_eq!(cfg.output.format, OutputFormat::Json);
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.validation.base_dir, Some(PathBuf::from("/srv/uploads")));
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[validation]\npreserve_empty = false\n").unwrap();

        let cfg = AppConfig::build(
            Some((path.as_path(), true)),
            env(&[("VERITY__VALIDATION__PRESERVE_EMPTY", "true")]),
        )
        .unwrap();
        assert!(cfg.validation.preserve_empty);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let cfg = AppConfig::build(Some((Path::new("/nonexistent/verity.toml"), false)), env(&[]))
            .unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn missing_required_file_is_config_error() {
        let err = AppConfig::build(Some((Path::new("/nonexistent/verity.toml"), true)), env(&[]))
            .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}

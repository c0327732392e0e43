//! Configuration loading for the previewer.
//!
//! Looks for a TOML [`ShowcaseConfig`] in an explicit path, then
//! `showcase/config.toml` under the working directory, then the platform
//! config directory, and falls back to the defaults.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use showcase::config::ShowcaseConfig;

/// Configuration-related errors for the CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Find and load configuration.
///
/// # Errors
///
/// Returns an error if an explicit path does not exist, or if the file found
/// cannot be read, parsed or validated.
pub fn load_config(
    explicit_path: Option<impl AsRef<Path>>,
) -> Result<ShowcaseConfig, ConfigError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("showcase/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "showcase", "showcase") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(ShowcaseConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<ShowcaseConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let config: ShowcaseConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    config
        .validate()
        .map_err(|err| ConfigError::Validation(err.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_explicit_path_is_loaded() {
        let file = config_file(
            r#"
            [placement]
            block_spacing = 12.0
            "#,
        );

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.placement().block_spacing(), 12.0);
    }

    #[test]
    fn test_missing_explicit_path() {
        let result = load_config(Some("does/not/exist.toml"));
        assert!(matches!(result, Err(ConfigError::MissingFile(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let file = config_file("[placement\nblock_spacing = ");
        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_ratio_out_of_range() {
        let file = config_file(
            r#"
            [placement]
            min_visible_ratio = 1.5
            "#,
        );
        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_negative_margin() {
        let file = config_file(
            r#"
            [placement]
            vertical_margin = -1.0
            "#,
        );
        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}

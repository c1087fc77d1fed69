use crate::config::schema::{GeneratorConfig, ValidationError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up by [`discover`].
pub const CONFIG_FILE_NAME: &str = "ast-xpath.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read generator config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed generator config{}: {source}", located(path))]
    Toml {
        path: Option<PathBuf>,
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("invalid generator config{}: {source}", located(path))]
    Validation {
        path: Option<PathBuf>,
        #[source]
        source: ValidationError,
    },
}

fn located(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

impl ConfigError {
    /// Attach the file a string-level error came from.
    fn in_file(self, file: &Path) -> Self {
        match self {
            ConfigError::Toml { path: None, source } => ConfigError::Toml {
                path: Some(file.to_path_buf()),
                source,
            },
            ConfigError::Validation { path: None, source } => ConfigError::Validation {
                path: Some(file.to_path_buf()),
                source,
            },
            other => other,
        }
    }
}

/// Parse and validate a config from TOML text.
pub fn load_from_str(input: &str) -> Result<GeneratorConfig, ConfigError> {
    let config: GeneratorConfig = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;
    config
        .validate()
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    Ok(config)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<GeneratorConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = load_from_str(&contents).map_err(|error| error.in_file(path))?;
    tracing::debug!(
        path = %path.display(),
        tab_width = config.tab_width,
        "loaded generator config"
    );
    Ok(config)
}

/// Nearest [`CONFIG_FILE_NAME`] in `start` or one of its ancestors.
pub fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

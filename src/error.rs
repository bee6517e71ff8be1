use std::path::PathBuf;

use crate::game::DimensionError;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid board size: {0}")]
    Dimensions(#[from] DimensionError),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("players.first.color must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: players.first.color must not be empty"
        );
    }

    #[test]
    fn test_dimension_error_display() {
        let err = ConfigError::from(DimensionError::ZeroWidth);
        assert_eq!(err.to_string(), "invalid board size: board width must be > 0");
    }
}

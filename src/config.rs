use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Dimensions, Player, Seat};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub players: PlayersConfig,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub height: usize,
    pub width: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
        }
    }
}

/// A player entry. Missing fields fall back to the seat's defaults.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PlayerConfig {
    fn seat_default(seat: Seat) -> Self {
        PlayerConfig {
            name: Some(default_name(seat)),
            color: Some(default_color(seat).to_string()),
        }
    }

    fn to_player(&self, seat: Seat) -> Player {
        Player::new(
            self.name.clone().unwrap_or_else(|| default_name(seat)),
            self.color.as_deref().unwrap_or(default_color(seat)),
        )
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub first: PlayerConfig,
    pub second: PlayerConfig,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            first: PlayerConfig::seat_default(Seat::First),
            second: PlayerConfig::seat_default(Seat::Second),
        }
    }
}

fn default_name(seat: Seat) -> String {
    format!("Player {}", seat.number())
}

fn default_color(seat: Seat) -> &'static str {
    match seat {
        Seat::First => "#ff0000",
        Seat::Second => "#ffff00",
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dimensions()?;

        for (key, player) in [("first", &self.players.first), ("second", &self.players.second)] {
            if player.name.as_deref().is_some_and(|s| s.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "players.{key}.name must not be empty"
                )));
            }
            if player.color.as_deref().is_some_and(|s| s.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "players.{key}.color must not be empty"
                )));
            }
        }

        Ok(())
    }

    pub fn dimensions(&self) -> Result<Dimensions, ConfigError> {
        Ok(Dimensions::new(self.board.height, self.board.width)?)
    }

    /// Fresh player identities for a new session
    pub fn players(&self) -> (Player, Player) {
        (
            self.players.first.to_player(Seat::First),
            self.players.second.to_player(Seat::Second),
        )
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::DimensionError;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.dimensions().unwrap(), Dimensions::default());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[board]
width = 9

[players.second]
color = "blue"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.width, 9);
        assert_eq!(config.board.height, 6);

        let (first, second) = config.players();
        assert_eq!(first.color(), "#ff0000");
        assert_eq!(second.color(), "blue");
        assert_eq!(second.name(), "Player 2");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let (first, second) = config.players();
        assert_eq!(first, Player::new("Player 1", "#ff0000"));
        assert_eq!(second, Player::new("Player 2", "#ffff00"));
    }

    #[test]
    fn test_validation_rejects_zero_height() {
        let mut config = AppConfig::default();
        config.board.height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Dimensions(_))));
    }

    #[test]
    fn test_validation_rejects_oversized_board() {
        let mut config = AppConfig::default();
        config.board.height = usize::MAX / 2 + 1;
        config.board.width = 2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Dimensions(DimensionError::TooLarge { .. }))
        ));
    }

    #[test]
    fn test_validation_rejects_blank_color() {
        let mut config = AppConfig::default();
        config.players.first.color = Some("  ".into());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_blank_name() {
        let mut config = AppConfig::default();
        config.players.second.name = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.board.width, 7);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[board]
height = 8

[players.first]
name = "Ann"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.board.height, 8);
        assert_eq!(config.players().0.name(), "Ann");
        // Others are defaults
        assert_eq!(config.players().0.color(), "#ff0000");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[board]\nwidth = 0\n").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config.players().1.color(), "#ffff00");
    }
}

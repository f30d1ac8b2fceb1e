use serde::{Deserialize, Serialize};

use crate::games::tictactoe::{Mark, PruningMode};
use crate::logger::LogLevel;

use super::Validate;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    /// Sign used when the sign dialog is closed without a choice.
    pub default_sign: Mark,
    pub pruning: PruningMode,
    pub log_level: LogLevel,
    pub window: WindowConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_sign: Mark::X,
            pruning: PruningMode::FullNode,
            log_level: LogLevel::Info,
            window: WindowConfig::default(),
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_sign == Mark::Empty {
            return Err("default_sign must be X or O".to_string());
        }
        self.window.validate()?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl WindowConfig {
    const MIN_SIZE: f32 = 200.0;
    const MAX_SIZE: f32 = 4000.0;
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 650.0,
        }
    }
}

impl Validate for WindowConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&value) {
                return Err(format!(
                    "window.{} must be between {} and {}, got {}",
                    name,
                    Self::MIN_SIZE,
                    Self::MAX_SIZE,
                    value
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ConfigContentProvider, ConfigManager, ConfigSerializer, FileContentConfigProvider,
        InMemoryConfigProvider, YamlConfigSerializer,
    };

    fn get_temp_file_path() -> std::path::PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_tictactoe_config_{}.yaml", random_number))
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let config = GameConfig::default();
        let serializer = YamlConfigSerializer::new();

        let serialized = serializer.serialize(&config).unwrap();
        assert!(serialized.contains("full_node"));

        let deserialized: GameConfig = serializer.deserialize(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let serializer = YamlConfigSerializer::new();
        let config: GameConfig = serializer
            .deserialize("default_sign: O\npruning: row_scoped\n")
            .unwrap();

        assert_eq!(config.default_sign, Mark::O);
        assert_eq!(config.pruning, PruningMode::RowScoped);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_manager_round_trip_in_memory() {
        let manager: ConfigManager<_, GameConfig> =
            ConfigManager::new(InMemoryConfigProvider::default(), YamlConfigSerializer);
        let config = GameConfig {
            default_sign: Mark::O,
            log_level: LogLevel::Debug,
            ..GameConfig::default()
        };

        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);
        assert!(manager.content_provider().get_config_content().unwrap().is_some());
    }

    #[test]
    fn test_manager_round_trip_file() {
        let path = get_temp_file_path();
        let config = GameConfig {
            pruning: PruningMode::Disabled,
            ..GameConfig::default()
        };

        let writer: ConfigManager<_, GameConfig> = ConfigManager::from_yaml_file(path.clone());
        writer.set_config(&config).unwrap();

        let reader: ConfigManager<_, GameConfig> = ConfigManager::from_yaml_file(path.clone());
        assert_eq!(reader.get_config().unwrap(), config);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let provider = FileContentConfigProvider::new("this_file_does_not_exist.yaml");
        let manager: ConfigManager<_, GameConfig> = ConfigManager::new(provider, YamlConfigSerializer);

        assert_eq!(manager.get_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_invalid_stored_config_is_rejected() {
        let provider = InMemoryConfigProvider::new(Some("default_sign: Empty\n".to_string()));
        let manager: ConfigManager<_, GameConfig> = ConfigManager::new(provider, YamlConfigSerializer);

        let err = manager.get_config().unwrap_err();
        assert!(err.contains("default_sign"));
    }

    #[test]
    fn test_set_config_refuses_invalid_window() {
        let manager: ConfigManager<_, GameConfig> =
            ConfigManager::new(InMemoryConfigProvider::default(), YamlConfigSerializer);
        let config = GameConfig {
            window: WindowConfig { width: 10.0, height: 650.0 },
            ..GameConfig::default()
        };

        assert!(manager.set_config(&config).is_err());
        assert!(manager.content_provider().get_config_content().unwrap().is_none());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let provider = InMemoryConfigProvider::new(Some("pruning: [not, a, mode]".to_string()));
        let manager: ConfigManager<_, GameConfig> = ConfigManager::new(provider, YamlConfigSerializer);
        assert!(manager.get_config().is_err());
    }
}

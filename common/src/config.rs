use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Self-check run after deserialization and before serialization.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Reads a YAML config file. A missing file is not an error: the
/// validated default is returned instead so a fresh install works
/// without any setup.
pub fn load_yaml_config<T>(path: &Path) -> Result<T, String>
where
    T: for<'de> Deserialize<'de> + Validate + Default,
{
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(err) => return Err(format!("Failed to read config file: {}", err)),
    };

    let config: T = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("Failed to deserialize config: {}", e))?;
    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;
    Ok(config)
}

pub fn save_yaml_config<T>(path: &Path, config: &T) -> Result<(), String>
where
    T: Serialize + Validate,
{
    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;

    let serialized = serde_yaml_ng::to_string(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(path, serialized).map_err(|e| format!("Failed to write config file: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        name: String,
        count: u32,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                name: "default".to_string(),
                count: 1,
            }
        }
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            if self.name.is_empty() {
                return Err("name must not be empty".to_string());
            }
            Ok(())
        }
    }

    fn temp_path(tag: &str) -> std::path::PathBuf {
        let n: u32 = rand::random();
        std::env::temp_dir().join(format!("grid_duel_config_{}_{}.yaml", tag, n))
    }

    #[test]
    fn missing_file_returns_default() {
        let loaded: TestConfig =
            load_yaml_config(Path::new("this_file_does_not_exist.yaml")).unwrap();
        assert_eq!(loaded, TestConfig::default());
    }

    #[test]
    fn round_trip_through_file() {
        let path = temp_path("round_trip");
        let config = TestConfig {
            name: "custom".to_string(),
            count: 7,
        };

        save_yaml_config(&path, &config).unwrap();
        let loaded: TestConfig = load_yaml_config(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn invalid_config_is_rejected_on_save() {
        let path = temp_path("invalid");
        let config = TestConfig {
            name: String::new(),
            count: 0,
        };
        assert!(save_yaml_config(&path, &config).is_err());
        assert!(!path.exists());
    }
}

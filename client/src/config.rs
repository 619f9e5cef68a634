use std::path::PathBuf;

use common::config::{Validate, load_yaml_config};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "grid_duel_client_config.yaml";

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ClientConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Starting directory of the replay file picker.
    pub records_dir: String,
    /// Optional PNG tiles for obstacle cells. Flat colors are used
    /// while unset or until decoding finishes.
    pub wall_tile: Option<String>,
    pub barrier_tile: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            window_width: 1000.0,
            window_height: 760.0,
            records_dir: "duelrecords".to_string(),
            wall_tile: None,
            barrier_tile: None,
        }
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        if !(200.0..=4000.0).contains(&self.window_width)
            || !(200.0..=4000.0).contains(&self.window_height)
        {
            return Err("Window size must be between 200 and 4000 pixels".to_string());
        }
        if self.records_dir.is_empty() {
            return Err("Records directory must not be empty".to_string());
        }
        Ok(())
    }
}

pub fn load_client_config() -> Result<ClientConfig, String> {
    load_yaml_config(&get_config_path())
}

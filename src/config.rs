//! Game configuration
//!
//! Settings are read from a JSON file so window size, timing, graphics location
//! and menu texts can be tuned without recompiling. Every field has a default,
//! so a partial file (or no file at all) is fine.
//!
//! Lookup order:
//! 1. `assets/config/game.json` next to the working directory
//! 2. `<user config dir>/platformer/game.json`
//! 3. Built-in defaults

use crate::error::GameError;
use crate::sound::AudioConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_PATH: &str = "assets/config/game.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window_title: String,

    /// Integer window scale over the 800x600 logical resolution
    pub window_scale: u32,

    pub fps: u32,

    /// Directory scanned for sprite sheets
    pub graphics_dir: String,

    /// Sheets whose transparent colour is not the default magenta, as RGB
    pub colorkey_overrides: HashMap<String, [u8; 3]>,

    pub menu: MenuText,

    pub starting_lives: u32,

    /// Level clock start value, in HUD ticks
    pub level_time: u32,

    /// Slide images shown in the popup when the level starts
    pub slides: Vec<String>,

    pub audio: AudioConfig,
}

/// Texts printed inside the main menu banner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuText {
    pub title: String,
    pub subtitle: String,
    pub detail: String,
    pub separator: String,
    pub start_prompt: String,
}

impl Default for MenuText {
    fn default() -> Self {
        MenuText {
            title: "SERIOUS GAMES".to_string(),
            subtitle: "AN INTRODUCTION TO GAMIFICATION".to_string(),
            detail: "UNIVERSIDAD DEL VALLE".to_string(),
            separator: "----".to_string(),
            start_prompt: "PRESS A / ENTER TO START".to_string(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut colorkey_overrides = HashMap::new();
        colorkey_overrides.insert("item_objects".to_string(), [0, 0, 0]);

        GameConfig {
            window_title: "Super Mario Bros 1-1".to_string(),
            window_scale: 1,
            fps: 60,
            graphics_dir: "resources/graphics".to_string(),
            colorkey_overrides,
            menu: MenuText::default(),
            starting_lives: 3,
            level_time: 401,
            slides: Vec::new(),
            audio: AudioConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Loads the first config file found, falling back to defaults
    ///
    /// A file that exists but fails to parse is an error; a missing file is not.
    pub fn discover() -> Result<Self, GameError> {
        for path in Self::candidate_paths() {
            if path.exists() {
                log::info!("Loading config from {}", path.display());
                return Self::load_from_file(&path);
            }
        }

        log::warn!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_PATH)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("platformer").join("game.json"));
        }
        paths
    }
}

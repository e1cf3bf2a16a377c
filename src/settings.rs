//! Settings loaded from TOML
//!
//! Read from ~/.config/blockfall/settings.toml (or platform equivalent).
//! Every section is optional; missing values fall back to defaults.

use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Smallest and largest accepted board side
const MIN_BOARD_SIDE: usize = 4;
const MAX_BOARD_SIDE: usize = 64;

/// Game settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board dimensions
    pub board: BoardSettings,
    /// Gravity timing
    pub gameplay: GameplaySettings,
    /// Keybindings
    pub keys: KeyBindings,
    /// Visual settings
    pub visual: VisualSettings,
    /// Pointer gesture thresholds
    pub touch: TouchSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub cols: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Milliseconds between automatic drops
    pub drop_interval_ms: u64,
    /// Accelerated interval is drop_interval_ms divided by this
    pub fast_drop_divisor: u32,
    /// How long a fast drop lasts before falling back to normal
    pub fast_drop_duration_ms: u64,
    /// Fixed seed for the figure sequence
    pub seed: Option<u64>,
}

/// Key bindings (stored as strings for easy editing)
/// Each command can have one or more keys bound to it
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub rotate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub accelerate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Visual settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
}

/// Drag distances, in terminal cells, that count as a swipe
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TouchSettings {
    pub swipe_cols: u16,
    pub swipe_rows: u16,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self { cols: 10, rows: 20 }
    }
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            drop_interval_ms: 1000,
            fast_drop_divisor: 3,
            fast_drop_duration_ms: 3000,
            seed: None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string()],
            move_right: vec!["Right".to_string()],
            rotate: vec!["Up".to_string()],
            drop: vec!["Down".to_string()],
            accelerate: vec!["f".to_string()],
            quit: vec!["q".to_string(), "Esc".to_string()],
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            block_style: "solid".to_string(),
        }
    }
}

impl Default for TouchSettings {
    fn default() -> Self {
        Self {
            swipe_cols: 2,
            swipe_rows: 1,
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from file, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    warn!("Ignoring invalid settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Parse settings from TOML text, clamping out-of-range values
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Settings>(contents).map(Settings::sanitized)
    }

    fn sanitized(mut self) -> Self {
        self.board.cols = self.board.cols.clamp(MIN_BOARD_SIDE, MAX_BOARD_SIDE);
        self.board.rows = self.board.rows.clamp(MIN_BOARD_SIDE, MAX_BOARD_SIDE);
        self.gameplay.drop_interval_ms = self.gameplay.drop_interval_ms.max(1);
        self.gameplay.fast_drop_divisor = self.gameplay.fast_drop_divisor.max(1);
        self
    }
}

impl GameplaySettings {
    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.drop_interval_ms)
    }

    pub fn fast_drop_duration(&self) -> Duration {
        Duration::from_millis(self.fast_drop_duration_ms)
    }
}

impl VisualSettings {
    /// Get the block characters based on style
    pub fn block_char(&self) -> &'static str {
        match self.block_style.as_str() {
            "bracket" => "[]",
            "round" => "()",
            _ => "██", // "solid" or default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.board.cols, 10);
        assert_eq!(settings.board.rows, 20);
        assert_eq!(settings.gameplay.drop_interval(), Duration::from_millis(1000));
        assert_eq!(settings.gameplay.fast_drop_divisor, 3);
        assert_eq!(settings.gameplay.fast_drop_duration(), Duration::from_millis(3000));
        assert_eq!(settings.gameplay.seed, None);
        assert_eq!(settings.keys.rotate, vec!["Up".to_string()]);
    }

    #[test]
    fn test_partial_sections() {
        let settings = Settings::parse(
            r#"
            [board]
            cols = 12

            [gameplay]
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(settings.board.cols, 12);
        assert_eq!(settings.board.rows, 20);
        assert_eq!(settings.gameplay.seed, Some(42));
        assert_eq!(settings.gameplay.drop_interval_ms, 1000);
    }

    #[test]
    fn test_keys_accept_string_or_list() {
        let settings = Settings::parse(
            r#"
            [keys]
            rotate = "x"
            drop = ["Down", "s"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.keys.rotate, vec!["x".to_string()]);
        assert_eq!(settings.keys.drop, vec!["Down".to_string(), "s".to_string()]);
        assert_eq!(settings.keys.move_left, vec!["Left".to_string()]);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let settings = Settings::parse(
            r#"
            [board]
            cols = 2
            rows = 1000

            [gameplay]
            drop_interval_ms = 0
            fast_drop_divisor = 0
            "#,
        )
        .unwrap();
        assert_eq!(settings.board.cols, MIN_BOARD_SIDE);
        assert_eq!(settings.board.rows, MAX_BOARD_SIDE);
        assert_eq!(settings.gameplay.drop_interval_ms, 1);
        assert_eq!(settings.gameplay.fast_drop_divisor, 1);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Settings::parse("[board]\ncols = \"wide\"").is_err());
    }

    #[test]
    fn test_block_chars() {
        let mut visual = VisualSettings::default();
        assert_eq!(visual.block_char(), "██");
        visual.block_style = "bracket".to_string();
        assert_eq!(visual.block_char(), "[]");
    }
}

//! Configuration structures for the signspeak pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub recognizer: RecognizerConfig,
    pub assets: AssetConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, crate::error::ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| {
            crate::error::ConfigError::FileNotFound(path.display().to_string())
        })?;

        toml::from_str(&content)
            .map_err(|e| crate::error::ConfigError::Parse(e.to_string()))
    }
}

/// Selects an audio input device by numeric index or name substring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceSelector {
    Index(usize),
    Name(String),
}

impl FromStr for DeviceSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<usize>() {
            Ok(index) => DeviceSelector::Index(index),
            Err(_) => DeviceSelector::Name(s.to_string()),
        })
    }
}

impl std::fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceSelector::Index(index) => write!(f, "#{}", index),
            DeviceSelector::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Audio capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Capture sample rate in Hz (None = device default rate)
    pub sample_rate: Option<u32>,
    /// Frames per audio block handed to the recognizer
    pub block_size: u32,
    /// Input device (None = default device)
    pub device: Option<DeviceSelector>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: None,
            block_size: 8000,
            device: None,
        }
    }
}

/// Recognizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Language model identifier (e.g. "en-us", "fr", "nl") or explicit path
    pub model: String,
    /// Directory where named models are looked up
    pub models_dir: PathBuf,
    /// Optional path to dump consumed audio as raw 16-bit PCM
    pub dump_path: Option<PathBuf>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            model: "en-us".to_string(),
            models_dir: PathBuf::from("./models"),
            dump_path: None,
        }
    }
}

impl RecognizerConfig {
    /// Resolve the model identifier to a filesystem path.
    ///
    /// An identifier that names an existing path (or contains a separator)
    /// is used as-is; otherwise it is looked up under `models_dir`.
    pub fn model_path(&self) -> PathBuf {
        let as_path = PathBuf::from(&self.model);
        if as_path.exists() || self.model.contains(std::path::MAIN_SEPARATOR) {
            as_path
        } else {
            self.models_dir.join(&self.model)
        }
    }
}

/// Visual asset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory of per-letter images named a.<ext> .. z.<ext>
    pub letters_dir: PathBuf,
    /// Image extension of the letter files
    pub letter_extension: String,
    /// Directory of animated clips (scanned only if it exists)
    pub clips_dir: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            letters_dir: PathBuf::from("letters"),
            letter_extension: "jpg".to_string(),
            clips_dir: PathBuf::from("clips"),
        }
    }
}

/// Display loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// How long each letter image is held (milliseconds)
    pub letter_hold_ms: u64,
    /// How long each clip frame is held (milliseconds)
    pub frame_hold_ms: u64,
    /// Fixed delay before each dequeue attempt (milliseconds)
    pub idle_delay_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            letter_hold_ms: 200,
            frame_hold_ms: 40,
            idle_delay_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.audio.block_size, 8000);
        assert!(config.audio.sample_rate.is_none());
        assert_eq!(config.recognizer.model, "en-us");
        assert_eq!(config.display.letter_hold_ms, 200);
        assert_eq!(config.display.frame_hold_ms, 40);
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
            [audio]
            sample_rate = 44100
            block_size = 4000
            device = 2

            [recognizer]
            model = "fr"

            [display]
            letter_hold_ms = 150
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.audio.sample_rate, Some(44100));
        assert_eq!(config.audio.block_size, 4000);
        assert_eq!(config.audio.device, Some(DeviceSelector::Index(2)));
        assert_eq!(config.recognizer.model, "fr");
        assert_eq!(config.display.letter_hold_ms, 150);
        // Untouched sections keep their defaults
        assert_eq!(config.display.frame_hold_ms, 40);
    }

    #[test]
    fn test_device_selector_from_str() {
        assert_eq!(
            "3".parse::<DeviceSelector>().unwrap(),
            DeviceSelector::Index(3)
        );
        assert_eq!(
            "USB Microphone".parse::<DeviceSelector>().unwrap(),
            DeviceSelector::Name("USB Microphone".to_string())
        );
    }

    #[test]
    fn test_model_path_resolution() {
        let config = RecognizerConfig {
            model: "en-us".to_string(),
            models_dir: PathBuf::from("/opt/models"),
            dump_path: None,
        };
        assert_eq!(config.model_path(), PathBuf::from("/opt/models/en-us"));

        let explicit = RecognizerConfig {
            model: "/data/vosk/en".to_string(),
            ..Default::default()
        };
        assert_eq!(explicit.model_path(), PathBuf::from("/data/vosk/en"));
    }
}

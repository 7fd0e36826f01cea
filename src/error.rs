//! Custom error types for the signspeak pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the signspeak pipeline
#[derive(Error, Debug)]
pub enum SignError {
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("Recognizer error: {0}")]
    Recognizer(#[from] RecognizerError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Audio-related errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No audio input device available")]
    NoInputDevice,

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to get device configuration: {0}")]
    DeviceConfig(String),

    #[error("Failed to build audio stream: {0}")]
    StreamBuild(String),

    #[error("Stream playback error: {0}")]
    StreamPlay(String),
}

/// Recognizer session errors
#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Failed to create recognizer session: {0}")]
    Session(String),

    #[error("Recognition failed: {0}")]
    Recognition(String),
}

/// Asset loading errors (all fatal at startup)
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Missing letter image '{letter}' at {}", .path.display())]
    MissingLetter { letter: char, path: PathBuf },

    #[error("Failed to decode asset {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("Clip {} decoded to zero frames", .0.display())]
    EmptyClip(PathBuf),

    #[error("Failed to read assets directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Rendering errors
///
/// `MissingAsset` abandons only the current utterance; `Backend` is fatal
/// to the display loop.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No asset for character '{0}'")]
    MissingAsset(char),

    #[error("Renderer backend failure: {0}")]
    Backend(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration value: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

pub type Result<T> = std::result::Result<T, SignError>;

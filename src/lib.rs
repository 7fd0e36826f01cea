//! Speech to Sign-Language Display
//!
//! Captures live microphone audio, converts speech to text with an external
//! recognition engine, and displays a finger-spelled letter image or
//! sign-language clip for each recognized utterance.
//!
//! # Architecture
//!
//! Two cooperating loops around two FIFO queues:
//!
//! - `audio`: capture adapter feeding fixed-size PCM blocks into a channel
//! - `worker`: transcription worker draining blocks into a recognizer
//!   session and emitting finalized utterances
//! - `display`: display loop resolving utterances to assets and rendering
//!   them in order
//! - `assets`: letter and clip images loaded eagerly at startup
//! - `recognizer`: recognizer session seam (Vosk backend behind the `vosk`
//!   feature)
//! - `render`: pluggable display surface
//! - `config`: configuration structures
//! - `error`: error types
//!
//! # Example
//!
//! ```no_run
//! use signspeak::{AssetLibrary, Config, ConsoleRenderer, DisplayLoop};
//! use crossbeam_channel::unbounded;
//!
//! let config = Config::default();
//! let assets = AssetLibrary::load(&config.assets).unwrap();
//!
//! let (sentence_tx, sentence_rx) = unbounded::<String>();
//! sentence_tx.send("hello".to_string()).unwrap();
//! drop(sentence_tx);
//!
//! let mut display = DisplayLoop::new(
//!     assets,
//!     Box::new(ConsoleRenderer::new()),
//!     config.display,
//!     sentence_rx,
//! );
//! display.run().unwrap();
//! ```

pub mod assets;
pub mod audio;
pub mod config;
pub mod display;
pub mod error;
pub mod recognizer;
pub mod render;
pub mod worker;

// Re-exports for convenience
pub use assets::AssetLibrary;
pub use audio::{AudioBlock, AudioCapture, DeviceInfo};
pub use config::{AssetConfig, AudioConfig, Config, DeviceSelector, DisplayConfig, RecognizerConfig};
pub use display::DisplayLoop;
pub use error::{AssetError, AudioError, RecognizerError, RenderError, Result, SignError};
pub use recognizer::{Outcome, Recognizer};
pub use render::{ConsoleRenderer, Renderer, Visual};
pub use worker::TranscriptionWorker;

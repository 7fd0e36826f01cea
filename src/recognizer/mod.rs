//! Speech recognizer session seam
//!
//! The engine itself is an external capability: it accepts raw PCM blocks
//! and reports either an interim transcription or a completed utterance.
//! The Vosk backend is feature-gated because it links against the native
//! libvosk library.

use crate::error::Result;

#[cfg(feature = "vosk")]
pub mod vosk;

#[cfg(feature = "vosk")]
pub use self::vosk::VoskRecognizer;

/// Result of feeding one audio block to a recognizer session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Interim transcription; may still be revised, never displayed
    Partial(String),
    /// Utterance complete at a detected boundary; empty text means
    /// silence/noise and must be suppressed by the caller
    Final(String),
}

/// A speech recognizer session bound to a sample rate.
///
/// Sessions are strictly single-threaded: `accept` must be called
/// sequentially from one thread only.
pub trait Recognizer: Send {
    /// Feed one block of mono 16-bit PCM samples
    fn accept(&mut self, block: &[i16]) -> Result<Outcome>;

    /// Signal end of input and flush any pending utterance
    fn finalize(&mut self) -> Result<Outcome>;
}

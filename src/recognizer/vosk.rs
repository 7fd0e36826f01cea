//! Vosk-based recognizer session

use tracing::info;
use vosk::{CompleteResult, DecodingState, Model};

use crate::config::RecognizerConfig;
use crate::error::{RecognizerError, Result};

use super::{Outcome, Recognizer};

/// Recognizer session backed by a Vosk/Kaldi model
pub struct VoskRecognizer {
    inner: vosk::Recognizer,
}

impl VoskRecognizer {
    /// Load the configured model and open a session at the given sample rate
    pub fn new(config: &RecognizerConfig, sample_rate: u32) -> Result<Self> {
        let model_path = config.model_path();
        if !model_path.exists() {
            return Err(
                RecognizerError::ModelNotFound(model_path.display().to_string()).into(),
            );
        }

        info!("Loading Vosk model from: {}", model_path.display());

        let model = Model::new(model_path.to_string_lossy()).ok_or_else(|| {
            RecognizerError::ModelLoad(model_path.display().to_string())
        })?;

        let inner = vosk::Recognizer::new(&model, sample_rate as f32).ok_or_else(|| {
            RecognizerError::Session(format!("sample rate {} Hz", sample_rate))
        })?;

        info!("Vosk model loaded (session at {} Hz)", sample_rate);

        Ok(Self { inner })
    }

    fn complete_text(result: CompleteResult<'_>) -> String {
        match result {
            CompleteResult::Single(single) => single.text.to_string(),
            CompleteResult::Multiple(multiple) => multiple
                .alternatives
                .first()
                .map(|alt| alt.text.to_string())
                .unwrap_or_default(),
        }
    }
}

impl Recognizer for VoskRecognizer {
    fn accept(&mut self, block: &[i16]) -> Result<Outcome> {
        match self.inner.accept_waveform(block) {
            DecodingState::Finalized => {
                Ok(Outcome::Final(Self::complete_text(self.inner.result())))
            }
            DecodingState::Running => Ok(Outcome::Partial(
                self.inner.partial_result().partial.to_string(),
            )),
            DecodingState::Failed => {
                Err(RecognizerError::Recognition("waveform rejected".to_string()).into())
            }
        }
    }

    fn finalize(&mut self) -> Result<Outcome> {
        Ok(Outcome::Final(Self::complete_text(
            self.inner.final_result(),
        )))
    }
}

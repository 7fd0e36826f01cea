//! Display loop: renders queued utterances as visual sequences

use std::time::Duration;

use crossbeam_channel::Receiver;
use tracing::{debug, info};

use crate::assets::AssetLibrary;
use crate::config::DisplayConfig;
use crate::error::{RenderError, Result};
use crate::render::{Renderer, Visual};

/// Lowercase an utterance and strip spaces for per-letter rendering
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace(' ', "")
}

/// Consumes finalized utterances and renders them in FIFO order.
///
/// Runs on the main thread; ends when the sentence channel disconnects.
pub struct DisplayLoop {
    assets: AssetLibrary,
    renderer: Box<dyn Renderer>,
    config: DisplayConfig,
    sentences: Receiver<String>,
}

impl DisplayLoop {
    pub fn new(
        assets: AssetLibrary,
        renderer: Box<dyn Renderer>,
        config: DisplayConfig,
        sentences: Receiver<String>,
    ) -> Self {
        Self {
            assets,
            renderer,
            config,
            sentences,
        }
    }

    /// Run until the sentence channel disconnects.
    ///
    /// An utterance containing a character with no asset is abandoned and
    /// the loop moves on; a renderer backend failure is fatal.
    pub fn run(&mut self) -> Result<()> {
        let idle = Duration::from_millis(self.config.idle_delay_ms);

        loop {
            if !idle.is_zero() {
                std::thread::sleep(idle);
            }

            let text = match self.sentences.recv() {
                Ok(text) => text,
                Err(_) => break, // producer gone, normal shutdown
            };

            debug!("Displaying utterance: \"{}\"", text);

            match self.render_utterance(&text) {
                Ok(()) => {}
                Err(RenderError::MissingAsset(c)) => {
                    debug!("No asset for '{}', dropping rest of \"{}\"", c, text);
                }
                Err(e @ RenderError::Backend(_)) => return Err(e.into()),
            }
        }

        info!("Display loop finished");
        Ok(())
    }

    /// Render a single utterance: exact clip match first, else per-letter
    pub fn render_utterance(&mut self, text: &str) -> std::result::Result<(), RenderError> {
        if let Some(frames) = self.assets.clip_for(text) {
            let hold = Duration::from_millis(self.config.frame_hold_ms);
            let total = frames.len();
            for (index, image) in frames.iter().enumerate() {
                self.renderer.show(
                    &Visual::ClipFrame {
                        name: text,
                        index,
                        total,
                        image,
                    },
                    hold,
                )?;
            }
            return Ok(());
        }

        let hold = Duration::from_millis(self.config.letter_hold_ms);
        for letter in normalize(text).chars() {
            let image = self
                .assets
                .letter(letter)
                .ok_or(RenderError::MissingAsset(letter))?;
            self.renderer.show(&Visual::Letter { letter, image }, hold)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("HI THERE"), "hithere");
        assert_eq!(normalize("hello"), "hello");
        assert_eq!(normalize("  a b  "), "ab");
        assert_eq!(normalize(""), "");
    }
}

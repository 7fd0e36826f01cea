//! Renderer seam
//!
//! The display surface is an external capability: it shows one visual unit
//! for a duration. Backends plug in behind the `Renderer` trait; the
//! display loop stays identical whether visuals go to a window, a plot, or
//! the console.

use std::io::{self, Write};
use std::time::Duration;

use image::RgbaImage;

use crate::error::RenderError;

/// One displayable unit handed to a renderer
#[derive(Debug)]
pub enum Visual<'a> {
    /// A single finger-spelled letter image
    Letter { letter: char, image: &'a RgbaImage },
    /// One frame of a named clip
    ClipFrame {
        name: &'a str,
        index: usize,
        total: usize,
        image: &'a RgbaImage,
    },
}

impl Visual<'_> {
    /// Short human-readable label for logging and console display
    pub fn label(&self) -> String {
        match self {
            Visual::Letter { letter, .. } => format!("letter '{}'", letter),
            Visual::ClipFrame {
                name, index, total, ..
            } => format!("clip '{}' frame {}/{}", name, index + 1, total),
        }
    }
}

/// A display surface that shows a visual for a fixed duration
pub trait Renderer {
    /// Show the visual, holding it for `hold` before returning
    fn show(&mut self, visual: &Visual<'_>, hold: Duration) -> Result<(), RenderError>;
}

/// Console renderer: prints each visual's label in place and sleeps the hold
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ConsoleRenderer {
    fn show(&mut self, visual: &Visual<'_>, hold: Duration) -> Result<(), RenderError> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "\r{}\x1b[K", visual.label())
            .and_then(|_| stdout.flush())
            .map_err(|e| RenderError::Backend(e.to_string()))?;
        drop(stdout);

        std::thread::sleep(hold);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_labels() {
        let image = RgbaImage::new(1, 1);

        let letter = Visual::Letter {
            letter: 'h',
            image: &image,
        };
        assert_eq!(letter.label(), "letter 'h'");

        let frame = Visual::ClipFrame {
            name: "thankyou.gif",
            index: 0,
            total: 3,
            image: &image,
        };
        assert_eq!(frame.label(), "clip 'thankyou.gif' frame 1/3");
    }
}

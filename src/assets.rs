//! Visual asset loading
//!
//! Builds the immutable letter and clip maps at startup. Loading is eager
//! and synchronous; any unreadable asset is a fatal startup error.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, RgbaImage};
use tracing::{debug, info};

use crate::config::AssetConfig;
use crate::error::{AssetError, Result};

/// The fixed finger-spelling alphabet
pub const ALPHABET: std::ops::RangeInclusive<char> = 'a'..='z';

/// Immutable mapping from letters and clip names to displayable images.
///
/// Built once at startup and shared read-only with the display loop.
#[derive(Debug)]
pub struct AssetLibrary {
    letters: HashMap<char, RgbaImage>,
    clips: HashMap<String, Vec<RgbaImage>>,
}

impl AssetLibrary {
    /// Load all letter images and clips described by the configuration
    pub fn load(config: &AssetConfig) -> Result<Self> {
        let mut letters = HashMap::new();
        for letter in ALPHABET {
            let path = config
                .letters_dir
                .join(format!("{}.{}", letter, config.letter_extension));
            if !path.exists() {
                return Err(AssetError::MissingLetter { letter, path }.into());
            }
            let image = image::open(&path)
                .map_err(|e| AssetError::Decode {
                    path: path.clone(),
                    reason: e.to_string(),
                })?
                .to_rgba8();
            letters.insert(letter, image);
        }

        let mut clips = HashMap::new();
        if config.clips_dir.is_dir() {
            let entries =
                std::fs::read_dir(&config.clips_dir).map_err(|e| AssetError::Directory {
                    path: config.clips_dir.clone(),
                    source: e,
                })?;

            for entry in entries {
                let entry = entry.map_err(|e| AssetError::Directory {
                    path: config.clips_dir.clone(),
                    source: e,
                })?;
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }

                let frames = decode_clip(&path)?;
                let name = entry.file_name().to_string_lossy().to_lowercase();
                debug!("Loaded clip '{}' ({} frames)", name, frames.len());
                clips.insert(name, frames);
            }
        } else {
            debug!(
                "No clips directory at {}, letters only",
                config.clips_dir.display()
            );
        }

        info!(
            "Assets loaded: {} letters, {} clips",
            letters.len(),
            clips.len()
        );

        Ok(Self { letters, clips })
    }

    /// Build a library from already-decoded parts (used by tests)
    pub fn from_parts(
        letters: HashMap<char, RgbaImage>,
        clips: HashMap<String, Vec<RgbaImage>>,
    ) -> Self {
        Self { letters, clips }
    }

    /// Look up the image for a single letter
    pub fn letter(&self, letter: char) -> Option<&RgbaImage> {
        self.letters.get(&letter)
    }

    /// Look up the clip matching an utterance, if any.
    ///
    /// The lookup key is the lowercased, trimmed utterance plus `.gif`.
    pub fn clip_for(&self, text: &str) -> Option<&[RgbaImage]> {
        self.clips.get(&Self::clip_key(text)).map(Vec::as_slice)
    }

    fn clip_key(text: &str) -> String {
        format!("{}.gif", text.trim().to_lowercase())
    }

    pub fn letter_count(&self) -> usize {
        self.letters.len()
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }
}

/// Decode a clip file into its ordered frame sequence
fn decode_clip(path: &Path) -> Result<Vec<RgbaImage>> {
    let file = File::open(path).map_err(|e| AssetError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let decoder = GifDecoder::new(BufReader::new(file)).map_err(|e| AssetError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| AssetError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if frames.is_empty() {
        return Err(AssetError::EmptyClip(path.to_path_buf()).into());
    }

    Ok(frames.into_iter().map(|f| f.into_buffer()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetConfig;
    use crate::error::SignError;

    fn fake_library() -> AssetLibrary {
        let mut letters = HashMap::new();
        for letter in ALPHABET {
            letters.insert(letter, RgbaImage::new(1, 1));
        }
        let mut clips = HashMap::new();
        clips.insert("thankyou.gif".to_string(), vec![RgbaImage::new(1, 1); 3]);
        AssetLibrary::from_parts(letters, clips)
    }

    #[test]
    fn test_letter_lookup() {
        let library = fake_library();
        assert!(library.letter('a').is_some());
        assert!(library.letter('z').is_some());
        assert!(library.letter('!').is_none());
        assert_eq!(library.letter_count(), 26);
    }

    #[test]
    fn test_clip_lookup_is_case_insensitive() {
        let library = fake_library();
        assert!(library.clip_for("thankyou").is_some());
        assert!(library.clip_for("THANKYOU").is_some());
        assert!(library.clip_for(" thankyou ").is_some());
        assert!(library.clip_for("hello").is_none());
        assert_eq!(library.clip_for("thankyou").unwrap().len(), 3);
    }

    #[test]
    fn test_load_fails_fast_on_missing_letter() {
        let dir = tempfile::tempdir().unwrap();
        let config = AssetConfig {
            letters_dir: dir.path().to_path_buf(),
            letter_extension: "png".to_string(),
            clips_dir: dir.path().join("clips"),
        };

        let err = AssetLibrary::load(&config).unwrap_err();
        match err {
            SignError::Asset(AssetError::MissingLetter { letter, .. }) => {
                assert_eq!(letter, 'a');
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_load_letters_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        for letter in ALPHABET {
            let image = RgbaImage::new(2, 2);
            image
                .save(dir.path().join(format!("{}.png", letter)))
                .unwrap();
        }

        let config = AssetConfig {
            letters_dir: dir.path().to_path_buf(),
            letter_extension: "png".to_string(),
            clips_dir: dir.path().join("clips"),
        };

        let library = AssetLibrary::load(&config).unwrap();
        assert_eq!(library.letter_count(), 26);
        assert_eq!(library.clip_count(), 0);
    }
}

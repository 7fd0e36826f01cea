//! Transcription worker: bridges captured audio to finalized text

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info, trace, warn};

use crate::audio::AudioBlock;
use crate::error::Result;
use crate::recognizer::{Outcome, Recognizer};

/// Pulls audio blocks off the capture queue, feeds them to the recognizer
/// session, and pushes every non-empty finalized utterance onto the
/// sentence queue.
pub struct TranscriptionWorker {
    recognizer: Box<dyn Recognizer>,
    blocks: Receiver<AudioBlock>,
    sentences: Sender<String>,
    shutdown: Arc<AtomicBool>,
    dump: Option<File>,
}

impl TranscriptionWorker {
    pub fn new(
        recognizer: Box<dyn Recognizer>,
        blocks: Receiver<AudioBlock>,
        sentences: Sender<String>,
        shutdown: Arc<AtomicBool>,
        dump_path: Option<&Path>,
    ) -> Result<Self> {
        let dump = match dump_path {
            Some(path) => {
                info!("Dumping raw audio to: {}", path.display());
                Some(File::create(path)?)
            }
            None => None,
        };

        Ok(Self {
            recognizer,
            blocks,
            sentences,
            shutdown,
            dump,
        })
    }

    /// Spawn the worker on its own named thread
    pub fn spawn(self) -> Result<JoinHandle<Result<()>>> {
        let handle = std::thread::Builder::new()
            .name("transcription".to_string())
            .spawn(move || self.run())?;
        Ok(handle)
    }

    /// Worker loop. The blocking dequeue is the sole suspension point; the
    /// shutdown flag is observed after each dequeue, so shutdown latency is
    /// one more audio block.
    pub fn run(mut self) -> Result<()> {
        loop {
            let block = match self.blocks.recv() {
                Ok(block) => block,
                Err(_) => {
                    // Capture side gone: flush any utterance still open in
                    // the engine before winding down.
                    self.flush_pending();
                    break;
                }
            };

            if self.shutdown.load(Ordering::SeqCst) {
                debug!("Shutdown requested, worker exiting");
                break;
            }

            // Every consumed block is dumped verbatim, regardless of the
            // recognition outcome. A write failure here is fatal.
            if let Some(ref mut dump) = self.dump {
                let mut bytes = Vec::with_capacity(block.len() * 2);
                for sample in &block {
                    bytes.extend_from_slice(&sample.to_le_bytes());
                }
                dump.write_all(&bytes)?;
            }

            match self.recognizer.accept(&block) {
                Ok(Outcome::Final(text)) => {
                    let text = text.trim();
                    if text.is_empty() {
                        trace!("Suppressing empty finalized utterance");
                        continue;
                    }
                    debug!("Finalized utterance: \"{}\"", text);
                    if self.sentences.send(text.to_string()).is_err() {
                        debug!("Sentence receiver dropped, worker exiting");
                        break;
                    }
                }
                Ok(Outcome::Partial(partial)) => {
                    trace!("Partial: \"{}\"", partial);
                }
                Err(e) => {
                    warn!("Recognition error: {}", e);
                }
            }
        }

        info!("Transcription worker finished");
        Ok(())
    }

    fn flush_pending(&mut self) {
        match self.recognizer.finalize() {
            Ok(Outcome::Final(text)) => {
                let text = text.trim();
                if !text.is_empty() {
                    debug!("Flushed final utterance: \"{}\"", text);
                    let _ = self.sentences.send(text.to_string());
                }
            }
            Ok(Outcome::Partial(_)) => {}
            Err(e) => warn!("Recognition error on flush: {}", e),
        }
    }
}

//! Speech capture sources.

use crate::error::{Error, Result};
use crossbeam_channel::{Receiver, Sender};

/// One transcribed phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    /// Transcribed text
    pub text: String,
    /// Whether the recognizer has finalized this phrase
    pub is_final: bool,
}

impl Phrase {
    /// A finalized phrase.
    pub fn finalized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }

    /// An interim phrase that may still change.
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }
}

/// A continuous recognition stream.
pub trait SpeechSource {
    /// Start listening; phrases arrive on the returned receiver.
    fn start(&mut self) -> Result<Receiver<Phrase>>;

    /// Stop listening. Phrases not yet delivered are discarded.
    fn stop(&mut self);

    /// Check if the source is currently listening.
    fn is_listening(&self) -> bool;
}

/// A source backed by a channel, fed by a script or by another thread.
#[derive(Debug)]
pub struct ChannelSpeechSource {
    receiver: Receiver<Phrase>,
    listening: bool,
    stopped: bool,
}

impl ChannelSpeechSource {
    /// Create a source reading from `receiver`. The stream ends when every
    /// sender is dropped.
    pub fn new(receiver: Receiver<Phrase>) -> Self {
        Self {
            receiver,
            listening: false,
            stopped: false,
        }
    }

    /// Create a source paired with a sender to feed it.
    pub fn piped() -> (Self, Sender<Phrase>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(rx), tx)
    }

    /// Create a source that replays fixed phrases, then ends.
    pub fn scripted<I>(phrases: I) -> Self
    where
        I: IntoIterator<Item = Phrase>,
    {
        let (tx, rx) = crossbeam_channel::unbounded();
        for phrase in phrases {
            // The receiver is held locally, so sending cannot fail
            let _ = tx.send(phrase);
        }
        Self::new(rx)
    }
}

impl SpeechSource for ChannelSpeechSource {
    fn start(&mut self) -> Result<Receiver<Phrase>> {
        if self.stopped {
            return Err(Error::Speech("source has been stopped".to_string()));
        }
        if self.listening {
            return Err(Error::Speech("already listening".to_string()));
        }
        self.listening = true;
        Ok(self.receiver.clone())
    }

    fn stop(&mut self) {
        self.listening = false;
        self.stopped = true;
        while self.receiver.try_recv().is_ok() {}
    }

    fn is_listening(&self) -> bool {
        self.listening
    }
}

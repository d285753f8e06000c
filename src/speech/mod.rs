//! Speech capture adapter.
//!
//! A [`SpeechSource`] yields transcribed [`Phrase`]s over a channel. The
//! [`VoiceController`] turns each final phrase into one dispatch against an
//! [`EditorSession`]; interim phrases only update the transcript.

mod source;

pub use source::{ChannelSpeechSource, Phrase, SpeechSource};

use crate::command::{self, Command, CommandGrammar, Outcome};
use crate::error::Result;
use crate::session::EditorSession;
use log::{debug, info};

/// Options for voice control.
#[derive(Debug, Clone)]
pub struct SpeechOptions {
    /// Let interim phrases that match a command dispatch it immediately
    pub dispatch_interim_commands: bool,

    /// Recognition language tag passed to capture backends
    pub language: String,
}

impl SpeechOptions {
    /// Create new speech options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable interim command dispatch.
    pub fn with_interim_commands(mut self, enabled: bool) -> Self {
        self.dispatch_interim_commands = enabled;
        self
    }

    /// Set the recognition language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            dispatch_interim_commands: false,
            language: "en-US".to_string(),
        }
    }
}

/// Counts from one listening run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenSummary {
    /// Phrases received
    pub phrases: usize,
    /// Commands that changed the document
    pub commands: usize,
    /// Formatting hints forwarded to the UI
    pub hints: usize,
    /// Phrases appended as dictation
    pub dictations: usize,
    /// Dispatches that left the document unchanged
    pub unchanged: usize,
}

/// Routes phrases from a speech source into an editing session.
#[derive(Debug)]
pub struct VoiceController {
    grammar: CommandGrammar,
    options: SpeechOptions,
    transcript: String,
    interim_command: Option<Command>,
}

impl VoiceController {
    /// Create a controller with the standard grammar.
    pub fn new(options: SpeechOptions) -> Self {
        Self {
            grammar: CommandGrammar::new(),
            options,
            transcript: String::new(),
            interim_command: None,
        }
    }

    /// The command grammar in use.
    pub fn grammar(&self) -> &CommandGrammar {
        &self.grammar
    }

    /// Latest phrase text, final or interim.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Handle one phrase. Returns the dispatch outcome, or `None` when the
    /// phrase triggered nothing.
    pub fn handle_phrase(
        &mut self,
        session: &mut EditorSession,
        phrase: &Phrase,
    ) -> Option<Outcome> {
        self.transcript = phrase.text.clone();
        let parsed = self.grammar.parse(&phrase.text);

        if !phrase.is_final {
            if !self.options.dispatch_interim_commands {
                return None;
            }
            let command = parsed?;
            if self.interim_command.as_ref() == Some(&command) {
                return None;
            }
            debug!("Dispatching interim command {}", command);
            let outcome = session.execute(&command);
            self.interim_command = Some(command);
            return Some(outcome);
        }

        let already_dispatched = self.interim_command.take();
        match parsed {
            Some(command) if already_dispatched.as_ref() == Some(&command) => None,
            Some(command) => Some(session.execute(&command)),
            None if phrase.text.trim().is_empty() => None,
            None => {
                let dispatch =
                    command::dictate(session.document(), session.selection(), &phrase.text);
                Some(session.commit(dispatch))
            }
        }
    }

    /// Listen until the source's stream ends, dispatching in arrival order.
    pub fn listen<S>(
        &mut self,
        source: &mut S,
        session: &mut EditorSession,
    ) -> Result<ListenSummary>
    where
        S: SpeechSource + ?Sized,
    {
        let receiver = source.start()?;
        info!("Listening ({})", self.options.language);

        let mut summary = ListenSummary::default();
        for phrase in receiver.iter() {
            if !source.is_listening() {
                break;
            }
            summary.phrases += 1;

            let is_command = self.grammar.parse(&phrase.text).is_some();
            match self.handle_phrase(session, &phrase) {
                Some(Outcome::Applied) if is_command => summary.commands += 1,
                Some(Outcome::Applied) => summary.dictations += 1,
                Some(Outcome::Forwarded(_)) => summary.hints += 1,
                Some(Outcome::Unchanged) => summary.unchanged += 1,
                None => {}
            }
        }

        source.stop();
        self.transcript.clear();
        self.interim_command = None;
        info!(
            "Stopped listening after {} phrases ({} commands, {} dictations)",
            summary.phrases, summary.commands, summary.dictations
        );
        Ok(summary)
    }
}

impl Default for VoiceController {
    fn default() -> Self {
        Self::new(SpeechOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, DocumentKind};

    #[test]
    fn test_interim_phrases_only_update_transcript() {
        let mut session = EditorSession::new(DocumentKind::Portfolio);
        let mut controller = VoiceController::default();

        let outcome = controller.handle_phrase(&mut session, &Phrase::interim("add an image"));
        assert_eq!(outcome, None);
        assert_eq!(controller.transcript(), "add an image");
        assert_eq!(session.document().block_count(), 1);
    }

    #[test]
    fn test_interim_command_not_repeated_on_final() {
        let mut session = EditorSession::new(DocumentKind::Portfolio);
        let options = SpeechOptions::new().with_interim_commands(true);
        let mut controller = VoiceController::new(options);

        controller.handle_phrase(&mut session, &Phrase::interim("add image"));
        controller.handle_phrase(&mut session, &Phrase::interim("add image"));
        controller.handle_phrase(&mut session, &Phrase::finalized("add image"));
        assert_eq!(session.document().block_count(), 2);
    }

    #[test]
    fn test_listen_scripted() {
        let mut session = EditorSession::new(DocumentKind::Portfolio);
        let mut controller = VoiceController::default();
        let mut source = ChannelSpeechSource::scripted(vec![
            Phrase::interim("hello"),
            Phrase::finalized("hello world"),
            Phrase::finalized("remove last word"),
            Phrase::finalized("bold"),
        ]);

        let summary = controller.listen(&mut source, &mut session).unwrap();
        assert_eq!(summary.phrases, 4);
        assert_eq!(summary.dictations, 1);
        assert_eq!(summary.commands, 1);
        assert_eq!(summary.hints, 1);
        assert_eq!(session.document().blocks(), &[Block::paragraph("hello")]);
        assert!(!source.is_listening());
    }
}

//! Applying recognized commands to a document.

use super::grammar::{Command, CommandGrammar, TextAlign};
use crate::edit::{BlockPatch, Operation};
use crate::model::{Block, Dimension, Document};
use log::debug;

/// Index of the block being edited, if any.
pub type Selection = Option<usize>;

/// Formatting hint passed through to the UI untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiHint {
    /// Align text
    TextAlign(TextAlign),
    /// Set font size
    FontSize(u32),
    /// Toggle bold
    Bold,
    /// Toggle italic
    Italic,
    /// Toggle underline
    Underline,
}

/// What a dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The document changed
    Applied,
    /// Nothing applied; the document is as before
    Unchanged,
    /// A formatting hint for the UI; the document is as before
    Forwarded(UiHint),
}

/// Result of dispatching one command or utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    /// Resulting document
    pub document: Document,
    /// Resulting selection
    pub selection: Selection,
    /// What happened
    pub outcome: Outcome,
}

impl Dispatch {
    fn unchanged(doc: &Document, selection: Selection) -> Self {
        Self {
            document: doc.clone(),
            selection,
            outcome: Outcome::Unchanged,
        }
    }

    /// Check if the document changed.
    pub fn is_applied(&self) -> bool {
        self.outcome == Outcome::Applied
    }
}

/// Apply a command against the document and selection.
pub fn dispatch(doc: &Document, selection: Selection, command: &Command) -> Dispatch {
    debug!("Dispatching {} with selection {:?}", command, selection);

    let hint = match command {
        Command::TextAlign(align) => Some(UiHint::TextAlign(*align)),
        Command::FontSize(size) => Some(UiHint::FontSize(*size)),
        Command::Bold => Some(UiHint::Bold),
        Command::Italic => Some(UiHint::Italic),
        Command::Underline => Some(UiHint::Underline),
        _ => None,
    };
    if let Some(hint) = hint {
        return Dispatch {
            document: doc.clone(),
            selection,
            outcome: Outcome::Forwarded(hint),
        };
    }

    let op = match command {
        Command::Heading(level) => selected_patch(doc, selection, |b| {
            matches!(b, Block::Heading(_)).then(|| BlockPatch::new().with_level(*level))
        }),
        Command::ImageWidth(px) => selected_patch(doc, selection, |b| {
            matches!(b, Block::Image(_)).then(|| BlockPatch::new().with_width(Dimension::Px(*px)))
        }),
        Command::ImageHeight(px) => selected_patch(doc, selection, |b| {
            matches!(b, Block::Image(_))
                .then(|| BlockPatch::new().with_height(Dimension::Px(*px)))
        }),
        other => other.operation(),
    };

    let Some(op) = op else {
        return Dispatch::unchanged(doc, selection);
    };

    let mut document = doc.clone();
    let changed = document.apply(&op);

    let selection = match command {
        Command::AddImage => Some(document.block_count() - 1),
        Command::RemoveLastBlock => None,
        _ => selection.filter(|i| *i < document.block_count()),
    };

    Dispatch {
        document,
        selection,
        outcome: if changed {
            Outcome::Applied
        } else {
            Outcome::Unchanged
        },
    }
}

/// Parse an utterance and dispatch it; unmatched text is dictated.
pub fn dispatch_utterance(
    grammar: &CommandGrammar,
    doc: &Document,
    selection: Selection,
    utterance: &str,
) -> Dispatch {
    match grammar.parse(utterance) {
        Some(command) => dispatch(doc, selection, &command),
        None => dictate(doc, selection, utterance),
    }
}

/// Append free text through the dictation fallback.
pub fn dictate(doc: &Document, selection: Selection, text: &str) -> Dispatch {
    let mut document = doc.clone();
    if document.apply(&Operation::Dictation(text.to_string())) {
        debug!("Dictated {} chars", text.trim().chars().count());
        Dispatch {
            document,
            selection,
            outcome: Outcome::Applied,
        }
    } else {
        Dispatch::unchanged(doc, selection)
    }
}

fn selected_patch<F>(doc: &Document, selection: Selection, patch: F) -> Option<Operation>
where
    F: FnOnce(&Block) -> Option<BlockPatch>,
{
    let index = selection?;
    let patch = patch(doc.get(index)?)?;
    Some(Operation::UpdateBlock { index, patch })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentKind, HeadingLevel};

    fn doc(blocks: Vec<Block>) -> Document {
        Document::from_blocks(blocks, DocumentKind::Portfolio)
    }

    #[test]
    fn test_heading_needs_selected_heading() {
        let d = doc(vec![Block::paragraph("a"), Block::heading("T", HeadingLevel::One)]);
        let cmd = Command::Heading(HeadingLevel::Three);

        let result = dispatch(&d, Some(0), &cmd);
        assert_eq!(result.outcome, Outcome::Unchanged);
        assert_eq!(result.document, d);

        let result = dispatch(&d, None, &cmd);
        assert_eq!(result.outcome, Outcome::Unchanged);

        let result = dispatch(&d, Some(1), &cmd);
        assert_eq!(result.outcome, Outcome::Applied);
        assert_eq!(
            result.document.get(1),
            Some(&Block::heading("T", HeadingLevel::Three))
        );
    }

    #[test]
    fn test_image_width_on_selected_image() {
        let d = doc(vec![Block::image("a.png")]);
        let result = dispatch(&d, Some(0), &Command::ImageWidth(320));
        match result.document.get(0) {
            Some(Block::Image(img)) => assert_eq!(img.width, Dimension::Px(320)),
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_add_image_selects_new_block() {
        let d = doc(vec![Block::paragraph("a")]);
        let result = dispatch(&d, None, &Command::AddImage);
        assert_eq!(result.selection, Some(1));
        assert!(result.is_applied());
    }

    #[test]
    fn test_remove_last_block_clears_selection() {
        let d = doc(vec![Block::paragraph("a"), Block::paragraph("b")]);
        let result = dispatch(&d, Some(1), &Command::RemoveLastBlock);
        assert_eq!(result.selection, None);
        assert_eq!(result.document.block_count(), 1);
    }

    #[test]
    fn test_hints_are_forwarded() {
        let d = Document::new();
        let result = dispatch(&d, Some(0), &Command::FontSize(18));
        assert_eq!(result.outcome, Outcome::Forwarded(UiHint::FontSize(18)));
        assert_eq!(result.document, d);
        assert_eq!(result.selection, Some(0));
    }

    #[test]
    fn test_utterance_falls_back_to_dictation() {
        let grammar = CommandGrammar::new();
        let d = doc(vec![Block::paragraph("Hello")]);
        let result = dispatch_utterance(&grammar, &d, None, "there friend");
        assert_eq!(result.document.get(0), Some(&Block::paragraph("Hello there friend")));
    }
}

//! Voice and text command handling.
//!
//! [`CommandGrammar`] turns an utterance into at most one [`Command`];
//! [`dispatch`] applies it against a document and the current selection.
//! Anything the grammar does not recognize is dictated.

mod dispatch;
mod grammar;

pub use dispatch::{dictate, dispatch, dispatch_utterance, Dispatch, Outcome, Selection, UiHint};
pub use grammar::{Command, CommandGrammar, TextAlign, DEFAULT_NUMERIC_VALUE};

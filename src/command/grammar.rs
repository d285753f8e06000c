//! Phrase rules mapping utterances to commands.
//!
//! Rules are evaluated in order and the first match wins. Matching is
//! case-insensitive and unanchored, so "please remove last word" still
//! resolves to [`Command::RemoveLastWord`].

use crate::edit::Operation;
use crate::model::HeadingLevel;
use log::debug;
use regex::{Captures, Regex};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Value used when a spoken number does not parse.
pub const DEFAULT_NUMERIC_VALUE: u32 = 100;

/// Horizontal text alignment hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// Left
    Left,
    /// Center
    Center,
    /// Right
    Right,
}

impl TextAlign {
    fn from_word(word: &str) -> Self {
        match word.to_lowercase().as_str() {
            "center" => TextAlign::Center,
            "right" => TextAlign::Right,
            _ => TextAlign::Left,
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// A recognized command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Drop the final block
    RemoveLastBlock,
    /// Drop the last line of text
    RemoveLastLine,
    /// Drop the last word of text
    RemoveLastWord,
    /// Drop the last character of text
    RemoveLastCharacter,
    /// Append an image block
    AddImage,
    /// Append a paragraph with the trailing text
    InsertParagraph(String),
    /// Append a heading with the trailing text
    InsertHeading {
        /// Spoken level
        level: HeadingLevel,
        /// Trailing text
        text: String,
    },
    /// Alignment hint for the UI
    TextAlign(TextAlign),
    /// Set the level of the selected heading
    Heading(HeadingLevel),
    /// Set the width of the selected image in pixels
    ImageWidth(u32),
    /// Set the height of the selected image in pixels
    ImageHeight(u32),
    /// Font size hint for the UI
    FontSize(u32),
    /// Bold toggle hint
    Bold,
    /// Italic toggle hint
    Italic,
    /// Underline toggle hint
    Underline,
}

impl Command {
    /// The selection-independent edit this command maps to, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Command::RemoveLastBlock => Some(Operation::RemoveLastBlock),
            Command::RemoveLastLine => Some(Operation::RemoveLastLine),
            Command::RemoveLastWord => Some(Operation::RemoveLastWord),
            Command::RemoveLastCharacter => Some(Operation::RemoveLastCharacter),
            Command::AddImage => Some(Operation::AddImage),
            Command::InsertParagraph(text) => Some(Operation::InsertParagraph(text.clone())),
            Command::InsertHeading { level, text } => Some(Operation::InsertHeading {
                level: *level,
                text: text.clone(),
            }),
            Command::TextAlign(_)
            | Command::Heading(_)
            | Command::ImageWidth(_)
            | Command::ImageHeight(_)
            | Command::FontSize(_)
            | Command::Bold
            | Command::Italic
            | Command::Underline => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::RemoveLastBlock => f.write_str("removeLastBlock"),
            Command::RemoveLastLine => f.write_str("removeLastLine"),
            Command::RemoveLastWord => f.write_str("removeLastWord"),
            Command::RemoveLastCharacter => f.write_str("removeLastCharacter"),
            Command::AddImage => f.write_str("addImage"),
            Command::InsertParagraph(text) => write!(f, "insertParagraph({:?})", text),
            Command::InsertHeading { level, text } => {
                write!(f, "insertHeading({}, {:?})", level.as_u8(), text)
            }
            Command::TextAlign(align) => write!(f, "textAlign({})", align.as_str()),
            Command::Heading(level) => write!(f, "heading({})", level.as_u8()),
            Command::ImageWidth(n) => write!(f, "imageWidth({})", n),
            Command::ImageHeight(n) => write!(f, "imageHeight({})", n),
            Command::FontSize(n) => write!(f, "fontSize({})", n),
            Command::Bold => f.write_str("bold"),
            Command::Italic => f.write_str("italic"),
            Command::Underline => f.write_str("underline"),
        }
    }
}

struct Rule {
    name: &'static str,
    pattern: Regex,
    build: fn(&Captures<'_>) -> Command,
}

fn rule(name: &'static str, pattern: &str, build: fn(&Captures<'_>) -> Command) -> Rule {
    Rule {
        name,
        pattern: Regex::new(&format!("(?i){}", pattern)).unwrap(),
        build,
    }
}

/// Ordered phrase rules.
pub struct CommandGrammar {
    rules: Vec<Rule>,
}

impl CommandGrammar {
    /// Build the standard rule set.
    pub fn new() -> Self {
        Self {
            rules: vec![
                rule("removeLastBlock", r"(?:remove|delete|undo)\s+last\s+block", |_| {
                    Command::RemoveLastBlock
                }),
                rule("removeLastLine", r"(?:remove|delete)\s+last\s+line", |_| {
                    Command::RemoveLastLine
                }),
                rule("removeLastWord", r"(?:remove|delete)\s+last\s+word", |_| {
                    Command::RemoveLastWord
                }),
                rule(
                    "removeLastCharacter",
                    r"(?:remove|delete)\s+last\s+character",
                    |_| Command::RemoveLastCharacter,
                ),
                rule("addImage", r"(?:add|insert)\s+(?:an?\s+)?image", |_| {
                    Command::AddImage
                }),
                rule("insertParagraph", r"new\s+paragraph\s*(.*)", |c| {
                    Command::InsertParagraph(trailing(c, 1))
                }),
                rule(
                    "insertHeading",
                    r"new\s+heading\s+(one|two|three)\s*(.*)",
                    |c| Command::InsertHeading {
                        level: level(c, 1),
                        text: trailing(c, 2),
                    },
                ),
                rule("textAlign", r"align\s+text\s+(left|center|right)", |c| {
                    Command::TextAlign(TextAlign::from_word(&c[1]))
                }),
                rule("heading", r"make\s+heading\s+(one|two|three)", |c| {
                    Command::Heading(level(c, 1))
                }),
                rule("imageWidth", r"image\s+width\s+(\d+)\s*pixels?", |c| {
                    Command::ImageWidth(number(c, 1))
                }),
                rule("imageHeight", r"image\s+height\s+(\d+)\s*pixels?", |c| {
                    Command::ImageHeight(number(c, 1))
                }),
                rule("fontSize", r"font\s+size\s+(\d+)", |c| {
                    Command::FontSize(number(c, 1))
                }),
                rule("bold", r"bold", |_| Command::Bold),
                rule("italic", r"italic", |_| Command::Italic),
                rule("underline", r"underline", |_| Command::Underline),
            ],
        }
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    /// Parse an utterance. Returns `None` when no rule matches.
    pub fn parse(&self, utterance: &str) -> Option<Command> {
        self.matching_rule(utterance).map(|(_, command)| command)
    }

    /// Parse an utterance, also reporting which rule matched.
    pub fn matching_rule(&self, utterance: &str) -> Option<(&'static str, Command)> {
        let text: String = utterance.trim().nfc().collect();
        if text.is_empty() {
            return None;
        }

        self.rules.iter().find_map(|rule| {
            rule.pattern.captures(&text).map(|caps| {
                let command = (rule.build)(&caps);
                debug!("Utterance {:?} matched rule {}: {}", text, rule.name, command);
                (rule.name, command)
            })
        })
    }
}

impl Default for CommandGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CommandGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandGrammar")
            .field("rules", &self.rule_names())
            .finish()
    }
}

fn trailing(caps: &Captures<'_>, group: usize) -> String {
    caps.get(group)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

fn level(caps: &Captures<'_>, group: usize) -> HeadingLevel {
    caps.get(group)
        .and_then(|m| HeadingLevel::from_word(m.as_str()))
        .unwrap_or_default()
}

/// Spoken numbers that overflow or are zero fall back to the default.
fn number(caps: &Captures<'_>, group: usize) -> u32 {
    caps.get(group)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_NUMERIC_VALUE)
}

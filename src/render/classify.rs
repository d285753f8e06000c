//! Line classification for paragraph rendering.
//!
//! Each `\n`-separated line of a paragraph is classified on its own. The
//! rules are checked in a fixed order and the first match wins.

use crate::model::{Block, HeadingLevel};
use regex::Regex;
use std::sync::OnceLock;

/// Literal row rendered as a link-like label.
pub const PROJECT_LINK: &str = "Project Link";

/// Prefix of the tools row.
pub const TOOLS_USED: &str = "Tools Used:";

/// Names rendered as link-like labels inside a contact line.
pub const DEFAULT_LINK_LABELS: [&str; 7] = [
    "linkedin",
    "behance",
    "portfolio",
    "dribbble",
    "github",
    "website",
    "project link",
];

/// Classification of one paragraph line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Empty line; full-width rule
    Rule,
    /// Bullet row with the text after the marker
    Bullet(&'a str),
    /// The reserved "Project Link" row
    ProjectLink,
    /// "Tools Used:" row with the remainder of the line
    ToolsUsed(&'a str),
    /// Row containing " | "; bold and italic
    PipeRow,
    /// Title/date row split on the em-dash
    DashRow {
        /// Text before the dash
        left: &'a str,
        /// Text after the dash
        right: &'a str,
    },
    /// Anything else
    Plain,
}

/// Classify one line.
pub fn classify_line(line: &str) -> LineClass<'_> {
    if line.is_empty() {
        return LineClass::Rule;
    }

    if let Some(rest) = line.strip_prefix('•').or_else(|| line.strip_prefix('-')) {
        return LineClass::Bullet(rest.trim_start());
    }

    if line == PROJECT_LINK || line.starts_with("Project Link ") {
        return LineClass::ProjectLink;
    }

    if let Some(rest) = line.strip_prefix(TOOLS_USED) {
        return LineClass::ToolsUsed(rest);
    }

    if line.contains(" | ") {
        return LineClass::PipeRow;
    }

    if let Some((left, right)) = line.split_once(" — ").or_else(|| line.split_once('—')) {
        return LineClass::DashRow {
            left: left.trim(),
            right: right.trim(),
        };
    }

    LineClass::Plain
}

/// How a paragraph renders given the block before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphRole {
    /// Line-by-line classification
    Body,
    /// Centered subtitle under a level-1 heading
    Subtitle,
    /// Centered contact line under a "Contact" heading
    Contact,
}

/// Decide the role of a paragraph from its preceding block.
pub fn paragraph_role(previous: Option<&Block>) -> ParagraphRole {
    match previous {
        Some(Block::Heading(h)) if h.level == HeadingLevel::One => ParagraphRole::Subtitle,
        Some(Block::Heading(h))
            if h.level == HeadingLevel::Two && h.text.trim().eq_ignore_ascii_case("contact") =>
        {
            ParagraphRole::Contact
        }
        _ => ParagraphRole::Body,
    }
}

/// Inline run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span<'a> {
    /// Regular text
    Text(&'a str),
    /// Text between `**` markers
    Bold(&'a str),
}

fn bold_regex() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").unwrap())
}

/// Split text into plain and `**bold**` spans.
pub fn inline_spans(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in bold_regex().captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::Text(&text[last..whole.start()]));
        }
        spans.push(Span::Bold(inner.as_str()));
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::Text(&text[last..]));
    }
    spans
}

/// Remove `**` markers, keeping the enclosed text.
pub fn strip_bold(text: &str) -> String {
    bold_regex().replace_all(text, "$1").into_owned()
}

/// One segment of a contact line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSegment<'a> {
    /// Trimmed segment text
    pub text: &'a str,
    /// Whether the segment names a link label
    pub is_label: bool,
}

/// Split a contact line on `•`.
///
/// Every separator yields a segment, so blank segments are kept and joining
/// the texts with `•` restores the separators of the source line.
pub fn contact_segments<'a, S: AsRef<str>>(text: &'a str, labels: &[S]) -> Vec<ContactSegment<'a>> {
    text.split('•')
        .map(str::trim)
        .map(|s| ContactSegment {
            text: s,
            is_label: is_link_label(s, labels),
        })
        .collect()
}

/// Check a segment against the link-label names, ignoring case.
pub fn is_link_label<S: AsRef<str>>(segment: &str, labels: &[S]) -> bool {
    let segment = segment.trim();
    labels
        .iter()
        .any(|l| l.as_ref().eq_ignore_ascii_case(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Heading;

    #[test]
    fn test_classify_order() {
        assert_eq!(classify_line(""), LineClass::Rule);
        assert_eq!(classify_line("• Led team"), LineClass::Bullet("Led team"));
        assert_eq!(classify_line("- a — b"), LineClass::Bullet("a — b"));
        assert_eq!(classify_line("Project Link"), LineClass::ProjectLink);
        assert_eq!(classify_line("Project Link https://x"), LineClass::ProjectLink);
        assert_eq!(classify_line("Project Links"), LineClass::Plain);
        assert_eq!(classify_line("Tools Used: Rust"), LineClass::ToolsUsed(" Rust"));
        assert_eq!(classify_line("App | Lead"), LineClass::PipeRow);
        assert_eq!(classify_line("just text"), LineClass::Plain);
    }

    #[test]
    fn test_dash_row_split() {
        assert_eq!(
            classify_line("Acme Corp — Jan 2020 - Dec 2021"),
            LineClass::DashRow {
                left: "Acme Corp",
                right: "Jan 2020 - Dec 2021"
            }
        );
        assert_eq!(
            classify_line("Acme—2020"),
            LineClass::DashRow {
                left: "Acme",
                right: "2020"
            }
        );
        assert_eq!(
            classify_line("Acme —"),
            LineClass::DashRow {
                left: "Acme",
                right: ""
            }
        );
    }

    #[test]
    fn test_paragraph_role() {
        let h1 = Block::heading("Name", HeadingLevel::One);
        let contact = Block::heading(" contact ", HeadingLevel::Two);
        let other = Block::Heading(Heading::new("Contact", HeadingLevel::Three));
        assert_eq!(paragraph_role(Some(&h1)), ParagraphRole::Subtitle);
        assert_eq!(paragraph_role(Some(&contact)), ParagraphRole::Contact);
        assert_eq!(paragraph_role(Some(&other)), ParagraphRole::Body);
        assert_eq!(paragraph_role(None), ParagraphRole::Body);
    }

    #[test]
    fn test_inline_spans() {
        assert_eq!(
            inline_spans("a **b** c"),
            vec![Span::Text("a "), Span::Bold("b"), Span::Text(" c")]
        );
        assert_eq!(inline_spans("**x**"), vec![Span::Bold("x")]);
        assert_eq!(inline_spans("no ** close"), vec![Span::Text("no ** close")]);
        assert_eq!(strip_bold("**Skills:** Rust"), "Skills: Rust");
    }

    #[test]
    fn test_contact_segments() {
        let segments = contact_segments("555-1234 • LinkedIn •  ", &DEFAULT_LINK_LABELS);
        assert_eq!(
            segments,
            vec![
                ContactSegment {
                    text: "555-1234",
                    is_label: false
                },
                ContactSegment {
                    text: "LinkedIn",
                    is_label: true
                },
                ContactSegment {
                    text: "",
                    is_label: false
                },
            ]
        );
    }

    #[test]
    fn test_contact_segments_keep_blank_separators() {
        let segments = contact_segments("a@b.dev •  • GitHub", &DEFAULT_LINK_LABELS);
        let texts: Vec<&str> = segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["a@b.dev", "", "GitHub"]);
        assert_eq!(texts.join(" • "), "a@b.dev •  • GitHub");
    }
}

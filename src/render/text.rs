//! Plain text rendering for block documents.

use crate::error::Result;
use crate::model::{Block, Document, HeadingLevel, LineStyle};

use super::classify::{
    classify_line, contact_segments, paragraph_role, strip_bold, LineClass, ParagraphRole,
};
use super::RenderOptions;

/// Convert a document to plain text.
///
/// Blocks are separated by a blank line. Dash rows are right-aligned to
/// `options.text_width`.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let width = options.text_width;
    let mut blocks: Vec<String> = Vec::new();
    let mut previous: Option<&Block> = None;

    for block in doc.blocks() {
        let rendered = match block {
            Block::Paragraph(p) => match paragraph_role(previous) {
                _ if p.text.is_empty() => None,
                ParagraphRole::Subtitle => Some(center(&strip_bold(&p.text), width)),
                ParagraphRole::Contact => {
                    let line = contact_segments(&p.text, &options.link_labels)
                        .iter()
                        .map(|s| s.text)
                        .collect::<Vec<_>>()
                        .join(" • ");
                    Some(center(&line, width))
                }
                ParagraphRole::Body => Some(
                    p.text
                        .split('\n')
                        .map(|line| text_line(line, width))
                        .collect::<Vec<_>>()
                        .join("\n"),
                ),
            },
            Block::Heading(h) => Some(match h.level {
                HeadingLevel::One => center(&h.text, width),
                HeadingLevel::Two => {
                    let rule = rule_line(h.line_style, h.text.chars().count().max(3));
                    format!("{}\n{}", h.text.to_uppercase(), rule)
                }
                HeadingLevel::Three => h.text.clone(),
            }),
            Block::LinkList(list) => {
                let lines: Vec<String> = list
                    .visible()
                    .map(|l| match (l.label.is_empty(), l.href.is_empty()) {
                        (false, false) => format!("{} <{}>", l.label, l.href),
                        (false, true) => l.label.clone(),
                        _ => l.href.clone(),
                    })
                    .collect();
                (!lines.is_empty()).then(|| lines.join("\n"))
            }
            Block::Image(img) if img.url.is_empty() => None,
            Block::Image(img) => Some(if img.alt.is_empty() {
                format!("[image: {}]", img.url)
            } else {
                format!("[image: {}]", img.alt)
            }),
            Block::Divider(d) => Some(rule_line(d.line_style, width)),
        };

        if let Some(text) = rendered {
            blocks.push(text);
        }
        previous = Some(block);
    }

    Ok(blocks.join("\n\n").trim_end().to_string())
}

fn text_line(line: &str, width: usize) -> String {
    match classify_line(line) {
        LineClass::Rule => "-".repeat(width),
        LineClass::Bullet(text) => format!("  • {}", strip_bold(text)),
        LineClass::DashRow { left, right } => {
            let used = left.chars().count() + right.chars().count();
            let gap = width.saturating_sub(used).max(2);
            format!("{}{}{}", left, " ".repeat(gap), right)
        }
        LineClass::ProjectLink
        | LineClass::ToolsUsed(_)
        | LineClass::PipeRow
        | LineClass::Plain => strip_bold(line),
    }
}

fn rule_line(style: LineStyle, width: usize) -> String {
    match style {
        LineStyle::Single => "-".repeat(width),
        LineStyle::Double => "=".repeat(width),
    }
}

fn center(text: &str, width: usize) -> String {
    text.split('\n')
        .map(|line| {
            let len = line.chars().count();
            let pad = width.saturating_sub(len) / 2;
            format!("{}{}", " ".repeat(pad), line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentKind;

    #[test]
    fn test_to_text() {
        let doc = Document::from_blocks(
            vec![
                Block::heading("Experience", HeadingLevel::Two),
                Block::paragraph("Acme — 2020\n• **Shipped** v1"),
            ],
            DocumentKind::Portfolio,
        );
        let options = RenderOptions::default().with_text_width(20);
        let text = to_text(&doc, &options).unwrap();
        assert_eq!(
            text,
            "EXPERIENCE\n----------\n\nAcme            2020\n  • Shipped v1"
        );
    }

    #[test]
    fn test_empty_blocks_omitted() {
        let doc = Document::from_blocks(
            vec![Block::paragraph(""), Block::image("")],
            DocumentKind::Portfolio,
        );
        assert_eq!(to_text(&doc, &RenderOptions::default()).unwrap(), "");
    }
}

//! Reverse-scan destructive edits and dictation.
//!
//! These target no index. Each one looks for the last paragraph or heading
//! in the current document and trims its text.

use crate::model::{Block, Document};

/// Drop the final block unless it is the only one.
pub(crate) fn remove_last_block(doc: &mut Document) -> bool {
    if doc.block_count() <= 1 {
        return false;
    }
    doc.blocks_mut().pop().is_some()
}

/// Drop the last line of the last text block.
pub(crate) fn remove_last_line(doc: &mut Document) -> bool {
    edit_last_text(doc, |text| match text.rfind('\n') {
        Some(pos) => text.truncate(pos),
        None => text.clear(),
    })
}

/// Drop the last word of the last text block.
pub(crate) fn remove_last_word(doc: &mut Document) -> bool {
    edit_last_text(doc, |text| {
        let trimmed_len = text.trim_end().len();
        text.truncate(trimmed_len);
        match text.rfind(' ') {
            Some(pos) => text.truncate(pos),
            None => text.clear(),
        }
    })
}

/// Drop the last character of the last text block.
pub(crate) fn remove_last_character(doc: &mut Document) -> bool {
    edit_last_text(doc, |text| {
        text.pop();
    })
}

/// Append dictated text to the last block if it holds text, else add a paragraph.
pub(crate) fn dictate(doc: &mut Document, text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    let blocks = doc.blocks_mut();
    if let Some(existing) = blocks.last_mut().and_then(Block::text_mut) {
        if !existing.is_empty() {
            existing.push(' ');
        }
        existing.push_str(text);
    } else {
        blocks.push(Block::paragraph(text));
    }
    true
}

fn edit_last_text<F>(doc: &mut Document, edit: F) -> bool
where
    F: FnOnce(&mut String),
{
    let Some(index) = doc.last_text_index() else {
        return false;
    };
    let Some(text) = doc.blocks_mut().get_mut(index).and_then(Block::text_mut) else {
        return false;
    };
    let original = text.clone();
    edit(text);
    *text != original
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentKind, HeadingLevel, LineStyle};

    fn doc(blocks: Vec<Block>) -> Document {
        Document::from_blocks(blocks, DocumentKind::Portfolio)
    }

    #[test]
    fn test_remove_last_block_stops_at_one() {
        let mut d = doc(vec![Block::paragraph("a"), Block::paragraph("b")]);
        assert!(remove_last_block(&mut d));
        assert!(!remove_last_block(&mut d));
        assert_eq!(d.blocks(), &[Block::paragraph("a")]);
    }

    #[test]
    fn test_remove_last_line_skips_divider() {
        let mut d = doc(vec![
            Block::paragraph("a\nb"),
            Block::divider(LineStyle::Double),
        ]);
        assert!(remove_last_line(&mut d));
        assert_eq!(d.get(0), Some(&Block::paragraph("a")));
    }

    #[test]
    fn test_remove_last_word_trims_trailing_space() {
        let mut d = doc(vec![Block::heading("Senior Engineer  ", HeadingLevel::Two)]);
        assert!(remove_last_word(&mut d));
        assert_eq!(d.get(0), Some(&Block::heading("Senior", HeadingLevel::Two)));
    }

    #[test]
    fn test_remove_last_character_is_one_scalar() {
        let mut d = doc(vec![Block::paragraph("café")]);
        assert!(remove_last_character(&mut d));
        assert_eq!(d.get(0), Some(&Block::paragraph("caf")));
    }

    #[test]
    fn test_remove_on_empty_text_is_noop() {
        let mut d = doc(vec![Block::paragraph("")]);
        assert!(!remove_last_character(&mut d));
        assert!(!remove_last_word(&mut d));
        assert!(!remove_last_line(&mut d));
    }

    #[test]
    fn test_no_text_block_is_noop() {
        let mut d = doc(vec![Block::image("x.png")]);
        assert!(!remove_last_line(&mut d));
        assert_eq!(d.blocks(), &[Block::image("x.png")]);
    }

    #[test]
    fn test_dictate_joins_with_space() {
        let mut d = doc(vec![Block::paragraph("hello")]);
        assert!(dictate(&mut d, "world"));
        assert_eq!(d.get(0), Some(&Block::paragraph("hello world")));

        let mut d = doc(vec![Block::paragraph("")]);
        dictate(&mut d, "first");
        assert_eq!(d.get(0), Some(&Block::paragraph("first")));
    }

    #[test]
    fn test_dictate_after_image_adds_paragraph() {
        let mut d = doc(vec![Block::image("x.png")]);
        dictate(&mut d, "caption");
        assert_eq!(d.block_count(), 2);
        assert_eq!(d.get(1), Some(&Block::paragraph("caption")));
    }

    #[test]
    fn test_dictate_blank_is_noop() {
        let mut d = doc(vec![Block::paragraph("a")]);
        assert!(!dictate(&mut d, "   "));
    }
}

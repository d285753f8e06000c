//! Document-level types.

use super::{template, Block};
use std::fmt;
use std::str::FromStr;

/// An ordered, never-empty sequence of blocks.
///
/// Order reflects vertical layout. Blocks are referenced by index only.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Create a document holding one empty paragraph.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::paragraph("")],
        }
    }

    /// Create the seed document for the given kind.
    pub fn seeded(kind: DocumentKind) -> Self {
        Self {
            blocks: kind.seed_blocks(),
        }
    }

    /// Create a document from blocks; an empty vector is seeded for `kind`.
    pub fn from_blocks(blocks: Vec<Block>, kind: DocumentKind) -> Self {
        if blocks.is_empty() {
            Self::seeded(kind)
        } else {
            Self { blocks }
        }
    }

    /// Get the blocks in layout order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Get the number of blocks. Always at least one.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get a block by index.
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Get the last block.
    pub fn last(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// Mutable access for the edit engine. Callers keep the sequence non-empty.
    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    /// Index of the last paragraph or heading, scanning from the end.
    pub fn last_text_index(&self) -> Option<usize> {
        self.blocks.iter().rposition(Block::is_text)
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::LinkList(list) => {
                    let labels: Vec<&str> = list
                        .visible()
                        .map(|l| if l.label.is_empty() { l.href.as_str() } else { l.label.as_str() })
                        .collect();
                    if labels.is_empty() {
                        None
                    } else {
                        Some(labels.join("\n"))
                    }
                }
                other => other.text().filter(|t| !t.is_empty()).map(str::to_string),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Count words across paragraph and heading text.
    pub fn word_count(&self) -> usize {
        self.blocks
            .iter()
            .filter_map(Block::text)
            .map(|t| t.split_whitespace().count())
            .sum()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Which builder a document belongs to. Selects the empty-document seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Resume builder; seeds the built-in resume template
    Resume,
    /// Portfolio builder; seeds one empty paragraph
    #[default]
    Portfolio,
}

impl DocumentKind {
    /// Blocks used when nothing usable was persisted.
    pub fn seed_blocks(&self) -> Vec<Block> {
        match self {
            DocumentKind::Resume => template::resume_template(),
            DocumentKind::Portfolio => vec![Block::paragraph("")],
        }
    }

    /// Name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::Portfolio => "portfolio",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "resume" => Ok(DocumentKind::Resume),
            "portfolio" => Ok(DocumentKind::Portfolio),
            other => Err(format!("unknown document kind: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, Link};

    #[test]
    fn test_new_document_has_one_block() {
        let doc = Document::new();
        assert_eq!(doc.block_count(), 1);
        assert_eq!(doc.get(0), Some(&Block::paragraph("")));
    }

    #[test]
    fn test_from_empty_blocks_is_seeded() {
        let doc = Document::from_blocks(Vec::new(), DocumentKind::Portfolio);
        assert_eq!(doc.blocks(), &[Block::paragraph("")]);

        let doc = Document::from_blocks(Vec::new(), DocumentKind::Resume);
        assert!(doc.block_count() > 1);
        assert!(matches!(doc.get(0), Some(Block::Heading(_))));
    }

    #[test]
    fn test_last_text_index_skips_non_text() {
        let doc = Document::from_blocks(
            vec![
                Block::heading("T", HeadingLevel::One),
                Block::paragraph("body"),
                Block::image("a.png"),
                Block::links(vec![Link::new("GitHub", "https://github.com")]),
            ],
            DocumentKind::Portfolio,
        );
        assert_eq!(doc.last_text_index(), Some(1));
    }

    #[test]
    fn test_plain_text() {
        let doc = Document::from_blocks(
            vec![
                Block::heading("Jane", HeadingLevel::One),
                Block::paragraph(""),
                Block::paragraph("Designer"),
                Block::links(vec![Link::new("", "https://x.dev")]),
            ],
            DocumentKind::Portfolio,
        );
        assert_eq!(doc.plain_text(), "Jane\n\nDesigner\n\nhttps://x.dev");
        assert_eq!(doc.word_count(), 2);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Resume".parse::<DocumentKind>(), Ok(DocumentKind::Resume));
        assert!("cv".parse::<DocumentKind>().is_err());
    }
}

//! Edit engine: total transforms over a document.
//!
//! Every operation either changes the document or leaves it exactly as it
//! was. Out-of-range indices and inapplicable targets are silent no-ops.
//!
//! # Example
//!
//! ```
//! use blockfolio::edit::{apply, Operation};
//! use blockfolio::model::{Block, Document};
//!
//! let doc = Document::new();
//! let doc = apply(&doc, &Operation::Dictation("hello world".into()));
//! let doc = apply(&doc, &Operation::RemoveLastWord);
//! assert_eq!(doc.blocks(), &[Block::paragraph("hello")]);
//! ```

mod patch;
mod scan;

pub use patch::BlockPatch;

use crate::model::{Block, BlockKind, Document, HeadingLevel, Link, LinkField};
use std::fmt;

/// Direction for [`Operation::MoveBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards index 0
    Up,
    /// Towards the end
    Down,
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

/// A single edit against a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Append a default block of the given kind
    AddBlock(BlockKind),
    /// Merge fields into the block at `index`
    UpdateBlock {
        /// Target block
        index: usize,
        /// Fields to merge
        patch: BlockPatch,
    },
    /// Delete the block at the index; never removes the only block
    RemoveBlock(usize),
    /// Swap the block with its neighbor
    MoveBlock {
        /// Target block
        index: usize,
        /// Which neighbor
        direction: Direction,
    },
    /// Append an empty link to the link list at the index
    AddLink(usize),
    /// Set one field of one link
    UpdateLink {
        /// Target link list block
        index: usize,
        /// Link position within the list
        link: usize,
        /// Field to set
        field: LinkField,
        /// New value
        value: String,
    },
    /// Remove one link; the list keeps at least one entry
    RemoveLink {
        /// Target link list block
        index: usize,
        /// Link position within the list
        link: usize,
    },
    /// Drop the final block
    RemoveLastBlock,
    /// Drop the last line of the last text block
    RemoveLastLine,
    /// Drop the last word of the last text block
    RemoveLastWord,
    /// Drop the last character of the last text block
    RemoveLastCharacter,
    /// Append a paragraph; blank text is a no-op
    InsertParagraph(String),
    /// Append a heading
    InsertHeading {
        /// Heading level
        level: HeadingLevel,
        /// Heading text
        text: String,
    },
    /// Append an empty image block
    AddImage,
    /// Append text to the last text block, or add a paragraph
    Dictation(String),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::AddBlock(kind) => write!(f, "addBlock({})", kind),
            Operation::UpdateBlock { index, .. } => write!(f, "updateBlock({})", index),
            Operation::RemoveBlock(index) => write!(f, "removeBlock({})", index),
            Operation::MoveBlock { index, direction } => {
                write!(f, "moveBlock({}, {:?})", index, direction)
            }
            Operation::AddLink(index) => write!(f, "addLink({})", index),
            Operation::UpdateLink { index, link, .. } => {
                write!(f, "updateLink({}, {})", index, link)
            }
            Operation::RemoveLink { index, link } => write!(f, "removeLink({}, {})", index, link),
            Operation::RemoveLastBlock => f.write_str("removeLastBlock"),
            Operation::RemoveLastLine => f.write_str("removeLastLine"),
            Operation::RemoveLastWord => f.write_str("removeLastWord"),
            Operation::RemoveLastCharacter => f.write_str("removeLastCharacter"),
            Operation::InsertParagraph(_) => f.write_str("insertParagraph"),
            Operation::InsertHeading { level, .. } => {
                write!(f, "insertHeading({})", level.as_u8())
            }
            Operation::AddImage => f.write_str("addImage"),
            Operation::Dictation(_) => f.write_str("dictation"),
        }
    }
}

/// Apply an operation, returning the resulting document.
pub fn apply(doc: &Document, op: &Operation) -> Document {
    let mut next = doc.clone();
    next.apply(op);
    next
}

impl Document {
    /// Apply an operation in place. Returns whether anything changed.
    pub fn apply(&mut self, op: &Operation) -> bool {
        match op {
            Operation::AddBlock(kind) => push(self, Block::empty(*kind)),
            Operation::UpdateBlock { index, patch } => match self.blocks_mut().get_mut(*index) {
                Some(block) => patch.apply_to(block),
                None => false,
            },
            Operation::RemoveBlock(index) => remove_block(self, *index),
            Operation::MoveBlock { index, direction } => move_block(self, *index, *direction),
            Operation::AddLink(index) => with_links(self, *index, |links| {
                links.push(Link::default());
                true
            }),
            Operation::UpdateLink {
                index,
                link,
                field,
                value,
            } => with_links(self, *index, |links| match links.get_mut(*link) {
                Some(entry) => {
                    let target = match field {
                        LinkField::Label => &mut entry.label,
                        LinkField::Href => &mut entry.href,
                    };
                    if target == value {
                        false
                    } else {
                        *target = value.clone();
                        true
                    }
                }
                None => false,
            }),
            Operation::RemoveLink { index, link } => with_links(self, *index, |links| {
                if *link >= links.len() {
                    return false;
                }
                links.remove(*link);
                if links.is_empty() {
                    links.push(Link::default());
                }
                true
            }),
            Operation::RemoveLastBlock => scan::remove_last_block(self),
            Operation::RemoveLastLine => scan::remove_last_line(self),
            Operation::RemoveLastWord => scan::remove_last_word(self),
            Operation::RemoveLastCharacter => scan::remove_last_character(self),
            Operation::InsertParagraph(text) => {
                let text = text.trim();
                !text.is_empty() && push(self, Block::paragraph(text))
            }
            Operation::InsertHeading { level, text } => {
                push(self, Block::heading(text.trim(), *level))
            }
            Operation::AddImage => push(self, Block::empty(BlockKind::Image)),
            Operation::Dictation(text) => scan::dictate(self, text),
        }
    }
}

fn push(doc: &mut Document, block: Block) -> bool {
    doc.blocks_mut().push(block);
    true
}

fn remove_block(doc: &mut Document, index: usize) -> bool {
    if doc.block_count() <= 1 || index >= doc.block_count() {
        return false;
    }
    doc.blocks_mut().remove(index);
    true
}

fn move_block(doc: &mut Document, index: usize, direction: Direction) -> bool {
    match moved_index(doc, index, direction) {
        Some(target) => {
            doc.blocks_mut().swap(index, target);
            true
        }
        None => false,
    }
}

fn with_links<F>(doc: &mut Document, index: usize, edit: F) -> bool
where
    F: FnOnce(&mut Vec<Link>) -> bool,
{
    match doc.blocks_mut().get_mut(index) {
        Some(Block::LinkList(list)) => edit(&mut list.links),
        _ => false,
    }
}

/// Index a block ends up at after [`Operation::MoveBlock`], if it moved.
pub fn moved_index(doc: &Document, index: usize, direction: Direction) -> Option<usize> {
    let len = doc.block_count();
    match direction {
        Direction::Up if index > 0 && index < len => Some(index - 1),
        Direction::Down if index + 1 < len => Some(index + 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentKind, Image, LineStyle};

    fn doc(blocks: Vec<Block>) -> Document {
        Document::from_blocks(blocks, DocumentKind::Portfolio)
    }

    #[test]
    fn test_add_block_appends_default() {
        let d = apply(&Document::new(), &Operation::AddBlock(BlockKind::Image));
        assert_eq!(d.block_count(), 2);
        assert_eq!(d.get(1), Some(&Block::Image(Image::default())));
    }

    #[test]
    fn test_update_out_of_range_is_noop() {
        let d = doc(vec![Block::paragraph("a")]);
        let op = Operation::UpdateBlock {
            index: 5,
            patch: BlockPatch::new().with_text("b"),
        };
        assert_eq!(apply(&d, &op), d);
    }

    #[test]
    fn test_remove_block() {
        let mut d = doc(vec![Block::paragraph("a"), Block::paragraph("b")]);
        assert!(d.apply(&Operation::RemoveBlock(0)));
        assert_eq!(d.blocks(), &[Block::paragraph("b")]);
        assert!(!d.apply(&Operation::RemoveBlock(0)));
        assert_eq!(d.block_count(), 1);
    }

    #[test]
    fn test_move_block_boundaries() {
        let mut d = doc(vec![Block::paragraph("a"), Block::divider(LineStyle::Single)]);
        assert!(!d.apply(&Operation::MoveBlock {
            index: 0,
            direction: Direction::Up
        }));
        assert!(!d.apply(&Operation::MoveBlock {
            index: 1,
            direction: Direction::Down
        }));
        assert!(d.apply(&Operation::MoveBlock {
            index: 0,
            direction: Direction::Down
        }));
        assert_eq!(d.get(1), Some(&Block::paragraph("a")));
        assert_eq!(moved_index(&d, 1, Direction::Up), Some(0));
        assert_eq!(moved_index(&d, 0, Direction::Up), None);
    }

    #[test]
    fn test_link_operations() {
        let mut d = doc(vec![Block::empty(BlockKind::LinkList)]);
        assert!(d.apply(&Operation::AddLink(0)));
        assert!(d.apply(&Operation::UpdateLink {
            index: 0,
            link: 1,
            field: LinkField::Href,
            value: "https://github.com".into(),
        }));
        assert!(d.apply(&Operation::RemoveLink { index: 0, link: 0 }));
        assert_eq!(
            d.blocks(),
            &[Block::links(vec![Link::new("", "https://github.com")])]
        );

        assert!(d.apply(&Operation::RemoveLink { index: 0, link: 0 }));
        assert_eq!(d.blocks(), &[Block::links(vec![Link::default()])]);
    }

    #[test]
    fn test_link_operation_on_wrong_kind() {
        let d = doc(vec![Block::paragraph("a")]);
        assert_eq!(apply(&d, &Operation::AddLink(0)), d);
    }

    #[test]
    fn test_insert_heading() {
        let d = apply(
            &Document::new(),
            &Operation::InsertHeading {
                level: HeadingLevel::Three,
                text: " Skills ".into(),
            },
        );
        assert_eq!(d.get(1), Some(&Block::heading("Skills", HeadingLevel::Three)));
    }

    #[test]
    fn test_insert_paragraph_requires_text() {
        let mut d = Document::new();
        assert!(!d.apply(&Operation::InsertParagraph("   ".into())));
        assert_eq!(d.block_count(), 1);

        assert!(d.apply(&Operation::InsertParagraph(" About me ".into())));
        assert_eq!(d.get(1), Some(&Block::paragraph("About me")));
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::RemoveLastBlock.to_string(), "removeLastBlock");
        assert_eq!(
            Operation::AddBlock(BlockKind::LinkList).to_string(),
            "addBlock(links)"
        );
    }
}

//! Partial block updates.

use crate::model::{Block, Dimension, HeadingLevel, ImageAlign, LineStyle, Link};

/// Fields to merge into an existing block.
///
/// Unset fields leave the block untouched. Fields the target variant does
/// not carry are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    /// Paragraph or heading text
    pub text: Option<String>,
    /// Paragraph or heading color; empty resets to inherit
    pub color: Option<String>,
    /// Heading level
    pub level: Option<HeadingLevel>,
    /// Heading or divider rule style
    pub line_style: Option<LineStyle>,
    /// Replacement link entries
    pub links: Option<Vec<Link>>,
    /// Image url
    pub url: Option<String>,
    /// Image alternative text
    pub alt: Option<String>,
    /// Image placement
    pub align: Option<ImageAlign>,
    /// Image width
    pub width: Option<Dimension>,
    /// Image height
    pub height: Option<Dimension>,
}

impl BlockPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set heading level.
    pub fn with_level(mut self, level: HeadingLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Set rule style.
    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = Some(line_style);
        self
    }

    /// Replace link entries.
    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = Some(links);
        self
    }

    /// Set image url.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set image alternative text.
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Set image placement.
    pub fn with_align(mut self, align: ImageAlign) -> Self {
        self.align = Some(align);
        self
    }

    /// Set image width.
    pub fn with_width(mut self, width: Dimension) -> Self {
        self.width = Some(width);
        self
    }

    /// Set image height.
    pub fn with_height(mut self, height: Dimension) -> Self {
        self.height = Some(height);
        self
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `block`, returning whether it changed.
    pub fn apply_to(&self, block: &mut Block) -> bool {
        let before = block.clone();

        match block {
            Block::Paragraph(p) => {
                set(&mut p.text, &self.text);
                set(&mut p.color, &self.color);
            }
            Block::Heading(h) => {
                set(&mut h.text, &self.text);
                set(&mut h.color, &self.color);
                set(&mut h.level, &self.level);
                set(&mut h.line_style, &self.line_style);
            }
            Block::LinkList(list) => {
                if let Some(links) = &self.links {
                    list.links = if links.is_empty() {
                        vec![Link::default()]
                    } else {
                        links.clone()
                    };
                }
            }
            Block::Image(img) => {
                set(&mut img.url, &self.url);
                set(&mut img.alt, &self.alt);
                set(&mut img.align, &self.align);
                set(&mut img.width, &self.width);
                set(&mut img.height, &self.height);
            }
            Block::Divider(d) => {
                set(&mut d.line_style, &self.line_style);
            }
        }

        *block != before
    }
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;

    #[test]
    fn test_patch_heading() {
        let mut block = Block::heading("Old", HeadingLevel::One);
        let patch = BlockPatch::new()
            .with_text("New")
            .with_level(HeadingLevel::Two)
            .with_url("ignored.png");
        assert!(patch.apply_to(&mut block));
        assert_eq!(block, Block::heading("New", HeadingLevel::Two));
    }

    #[test]
    fn test_inapplicable_fields_ignored() {
        let mut block = Block::divider(LineStyle::Single);
        let patch = BlockPatch::new().with_text("x").with_color("#f00");
        assert!(!patch.apply_to(&mut block));
        assert_eq!(block, Block::divider(LineStyle::Single));
    }

    #[test]
    fn test_empty_links_patch_keeps_one_entry() {
        let mut block = Block::empty(BlockKind::LinkList);
        BlockPatch::new().with_links(Vec::new()).apply_to(&mut block);
        assert_eq!(block, Block::links(vec![Link::default()]));
    }

    #[test]
    fn test_is_empty() {
        assert!(BlockPatch::new().is_empty());
        assert!(!BlockPatch::new().with_alt("a").is_empty());
    }
}

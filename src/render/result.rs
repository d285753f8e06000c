//! Rendering result with statistics.

use crate::model::BlockKind;
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (HTML or text)
    pub content: String,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: RenderStats) -> Self {
        Self { content, stats }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            stats: RenderStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of paragraph blocks
    pub paragraph_count: u32,

    /// Number of heading blocks
    pub heading_count: u32,

    /// Number of link list blocks
    pub link_list_count: u32,

    /// Number of image blocks
    pub image_count: u32,

    /// Number of divider blocks
    pub divider_count: u32,

    /// Paragraph lines rendered as bullets
    pub bullet_count: u32,

    /// Paragraph lines split into title/date rows
    pub dash_row_count: u32,

    /// Horizontal rules drawn (empty lines, dividers, heading rules)
    pub rule_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one block of the given kind.
    pub fn add_block(&mut self, kind: BlockKind) {
        match kind {
            BlockKind::Paragraph => self.paragraph_count += 1,
            BlockKind::Heading => self.heading_count += 1,
            BlockKind::LinkList => self.link_list_count += 1,
            BlockKind::Image => self.image_count += 1,
            BlockKind::Divider => self.divider_count += 1,
        }
    }

    /// Increment bullet count.
    pub fn add_bullet(&mut self) {
        self.bullet_count += 1;
    }

    /// Increment dash row count.
    pub fn add_dash_row(&mut self) {
        self.dash_row_count += 1;
    }

    /// Add horizontal rules.
    pub fn add_rules(&mut self, count: u32) {
        self.rule_count += count;
    }

    /// Total number of blocks counted.
    pub fn block_count(&self) -> u32 {
        self.paragraph_count
            + self.heading_count
            + self.link_list_count
            + self.image_count
            + self.divider_count
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.paragraph_count += other.paragraph_count;
        self.heading_count += other.heading_count;
        self.link_list_count += other.link_list_count;
        self.image_count += other.image_count;
        self.divider_count += other.divider_count;
        self.bullet_count += other.bullet_count;
        self.dash_row_count += other.dash_row_count;
        self.rule_count += other.rule_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

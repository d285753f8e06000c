//! Document model types for block documents.
//!
//! A document is an ordered, never-empty list of typed blocks. This module
//! also owns the persisted layout and the one-way adapters that turn legacy
//! persisted shapes into blocks.

mod block;
mod document;
mod persisted;
mod template;

pub use block::{
    Block, BlockKind, Dimension, Divider, Heading, HeadingLevel, Image, ImageAlign, LineStyle,
    Link, LinkField, LinkList, Paragraph,
};
pub use document::{Document, DocumentKind};
pub use persisted::{
    adapt_block, normalize, normalize_str, section_title, serialize, to_sections,
    PersistedDocument, PersistedPayload, PortfolioSection, DEFAULT_SECTION_TITLE,
};
pub use template::resume_template;

//! # blockfolio
//!
//! Block document engine for resume and portfolio builders.
//!
//! Documents are ordered lists of typed blocks. They are edited through
//! pure operations or through a voice/text command grammar, and rendered
//! deterministically to HTML, plain text, or JSON.
//!
//! ## Quick Start
//!
//! ```
//! use blockfolio::{CommandGrammar, DocumentKind, EditorSession, RenderOptions};
//!
//! fn main() -> blockfolio::Result<()> {
//!     let mut session = EditorSession::new(DocumentKind::Portfolio);
//!     let grammar = CommandGrammar::new();
//!
//!     // Unmatched phrases are dictated into the last text block
//!     session.handle_utterance(&grammar, "Hello there");
//!     session.handle_utterance(&grammar, "new heading two Projects");
//!
//!     let html = session.preview_html(&RenderOptions::default())?;
//!     assert!(html.contains(">Projects</h2>"));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Never-empty documents**: every edit keeps at least one block
//! - **Command grammar**: ordered, first-match-wins phrase rules
//! - **Legacy shapes**: older persisted layouts normalize into blocks
//! - **Deterministic rendering**: one tree for preview and print export
//! - **Speech input**: phrases arrive over a channel and dispatch in order

pub mod command;
pub mod detect;
pub mod edit;
pub mod error;
pub mod model;
pub mod render;
pub mod session;
pub mod speech;

// Re-export commonly used types
pub use command::{Command, CommandGrammar, Dispatch, Outcome, Selection, UiHint};
pub use detect::{detect_shape, detect_shape_from_str, PersistedShape};
pub use edit::{BlockPatch, Direction, Operation};
pub use error::{Error, Result};
pub use model::{
    Block, BlockKind, Dimension, Divider, Document, DocumentKind, Heading, HeadingLevel, Image,
    ImageAlign, LineStyle, Link, LinkField, LinkList, Paragraph, PersistedDocument,
    PersistedPayload,
};
pub use render::{JsonFormat, RenderOptions, RenderResult, RenderStats, Surface};
pub use session::{
    EditorSession, ImageUploader, JsonFilePersistence, MemoryPersistence, Persistence,
    UploadTicket, UploadedImage,
};
pub use speech::{ChannelSpeechSource, Phrase, SpeechOptions, SpeechSource, VoiceController};

use std::io::Read;
use std::path::Path;

/// Load a persisted JSON document from a file.
///
/// Any known persisted shape is accepted and normalized. A missing or
/// empty file is an error here; use [`EditorSession::open`] with a
/// [`JsonFilePersistence`] to start fresh instead.
///
/// # Example
///
/// ```no_run
/// use blockfolio::{load_file, DocumentKind};
///
/// let doc = load_file("resume.json", DocumentKind::Resume).unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P, kind: DocumentKind) -> Result<Document> {
    let content = std::fs::read_to_string(path)?;
    parse_json(&content, kind)
}

/// Parse a persisted JSON document from a string.
///
/// # Example
///
/// ```
/// use blockfolio::{parse_json, DocumentKind};
///
/// let doc = parse_json(r#"{"summary": "Hi", "blocks": []}"#, DocumentKind::Portfolio).unwrap();
/// assert_eq!(doc.plain_text(), "Hi");
/// ```
pub fn parse_json(json: &str, kind: DocumentKind) -> Result<Document> {
    model::normalize_str(json, kind)
}

/// Parse a persisted JSON document from a reader.
pub fn parse_reader<R: Read>(mut reader: R, kind: DocumentKind) -> Result<Document> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_json(&content, kind)
}

/// Render a persisted document file as an HTML fragment.
///
/// # Example
///
/// ```no_run
/// use blockfolio::{to_html, DocumentKind};
///
/// let html = to_html("portfolio.json", DocumentKind::Portfolio).unwrap();
/// std::fs::write("preview.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P, kind: DocumentKind) -> Result<String> {
    let doc = load_file(path, kind)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Render a persisted document file as plain text.
pub fn to_text<P: AsRef<Path>>(
    path: P,
    kind: DocumentKind,
    options: &RenderOptions,
) -> Result<String> {
    let doc = load_file(path, kind)?;
    render::to_text(&doc, options)
}

/// Re-serialize a persisted document file in the current layout.
pub fn to_json<P: AsRef<Path>>(path: P, kind: DocumentKind, format: JsonFormat) -> Result<String> {
    let doc = load_file(path, kind)?;
    render::to_json(&doc, format)
}

/// Builder for loading and rendering documents.
///
/// # Example
///
/// ```no_run
/// use blockfolio::{Blockfolio, DocumentKind};
///
/// let page = Blockfolio::new()
///     .with_kind(DocumentKind::Resume)
///     .with_page_title("Jane Doe")
///     .for_print()
///     .load("resume.json")?
///     .to_html_page()?;
/// # Ok::<(), blockfolio::Error>(())
/// ```
pub struct Blockfolio {
    kind: DocumentKind,
    render_options: RenderOptions,
}

impl Blockfolio {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            kind: DocumentKind::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Set the document kind used to seed empty documents.
    pub fn with_kind(mut self, kind: DocumentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Render for the print/export surface.
    pub fn for_print(mut self) -> Self {
        self.render_options = self.render_options.for_print();
        self
    }

    /// Set the accent color for link-like labels.
    pub fn with_accent_color(mut self, color: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_accent_color(color);
        self
    }

    /// Set the standalone page title.
    pub fn with_page_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_page_title(title);
        self
    }

    /// Set the plain-text line width.
    pub fn with_text_width(mut self, width: usize) -> Self {
        self.render_options = self.render_options.with_text_width(width);
        self
    }

    /// Load a persisted document file.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<BlockfolioResult> {
        let document = load_file(path, self.kind)?;
        Ok(self.wrap(document))
    }

    /// Load a persisted document from a JSON string.
    pub fn load_str(self, json: &str) -> Result<BlockfolioResult> {
        let document = parse_json(json, self.kind)?;
        Ok(self.wrap(document))
    }

    fn wrap(self, document: Document) -> BlockfolioResult {
        BlockfolioResult {
            document,
            render_options: self.render_options,
        }
    }
}

impl Default for Blockfolio {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded document with its render options.
pub struct BlockfolioResult {
    /// The loaded document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl BlockfolioResult {
    /// Render an HTML fragment.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Render a standalone HTML page.
    pub fn to_html_page(&self) -> Result<String> {
        render::to_html_page(&self.document, &self.render_options)
    }

    /// Render plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Serialize as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Plain text of every text block.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

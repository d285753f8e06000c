//! Rendering module for turning block documents into output.
//!
//! The same deterministic tree serves the on-screen preview and the
//! print/export capture; [`Surface`] only adds print attributes.

mod classify;
mod html;
mod json;
mod options;
mod result;
mod text;
mod tree;

pub use classify::{
    classify_line, contact_segments, inline_spans, is_link_label, paragraph_role, strip_bold,
    ContactSegment, LineClass, ParagraphRole, Span, DEFAULT_LINK_LABELS, PROJECT_LINK, TOOLS_USED,
};
pub use html::{render_tree, to_html, to_html_page, to_html_with_stats, HtmlRenderer};
pub use json::{to_json, to_sections_json, JsonFormat};
pub use options::{RenderOptions, Surface};
pub use result::{RenderResult, RenderStats};
pub use text::to_text;
pub use tree::{escape_attr, escape_text, Element, Node, NBSP};

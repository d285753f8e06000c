//! Persisted document layout and legacy-shape normalization.

use super::{
    Block, Dimension, Divider, Document, DocumentKind, Heading, HeadingLevel, Image, ImageAlign,
    LineStyle, Link, LinkList, Paragraph,
};
use crate::detect::{detect_shape, PersistedShape};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title used for the single portfolio section when none is given.
pub const DEFAULT_SECTION_TITLE: &str = "My Portfolio";

/// The document as handed to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedDocument {
    /// Text of the first paragraph, or empty
    #[serde(default)]
    pub summary: String,

    /// Full block sequence
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl PersistedDocument {
    /// Rebuild a document, seeding it for `kind` if no blocks were stored.
    pub fn into_document(self, kind: DocumentKind) -> Document {
        Document::from_blocks(self.blocks, kind)
    }
}

/// One portfolio section as stored by the portfolio record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSection {
    /// Always `"section"`
    #[serde(rename = "type")]
    pub section_type: String,

    /// Section title
    pub title: String,

    /// Section blocks
    pub blocks: Vec<Block>,
}

/// What a session hands to its store: the block record for resumes, the
/// section list for portfolios.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PersistedPayload {
    /// `{ summary, blocks }`
    Record(PersistedDocument),
    /// `{ sections: [...] }`
    Sections {
        /// Portfolio sections, one per document
        sections: Vec<PortfolioSection>,
    },
}

impl PersistedPayload {
    /// Serialize a document in the layout `kind` is stored in.
    pub fn for_kind(kind: DocumentKind, title: &str, doc: &Document) -> Self {
        match kind {
            DocumentKind::Resume => Self::Record(serialize(doc)),
            DocumentKind::Portfolio => Self::Sections {
                sections: to_sections(title, doc),
            },
        }
    }

    /// Number of blocks carried.
    pub fn block_count(&self) -> usize {
        match self {
            Self::Record(record) => record.blocks.len(),
            Self::Sections { sections } => sections.iter().map(|s| s.blocks.len()).sum(),
        }
    }
}

/// Serialize a document for persistence.
pub fn serialize(doc: &Document) -> PersistedDocument {
    let summary = doc
        .blocks()
        .iter()
        .find_map(|b| match b {
            Block::Paragraph(p) => Some(p.text.clone()),
            _ => None,
        })
        .unwrap_or_default();

    PersistedDocument {
        summary,
        blocks: doc.blocks().to_vec(),
    }
}

/// Serialize a document as the single-section portfolio layout.
pub fn to_sections(title: &str, doc: &Document) -> Vec<PortfolioSection> {
    let title = if title.is_empty() {
        DEFAULT_SECTION_TITLE
    } else {
        title
    };
    vec![PortfolioSection {
        section_type: "section".to_string(),
        title: title.to_string(),
        blocks: doc.blocks().to_vec(),
    }]
}

/// Title of the first persisted section, if the value has sections.
pub fn section_title(value: &Value) -> Option<String> {
    value
        .get("sections")?
        .as_array()?
        .first()?
        .get("title")?
        .as_str()
        .map(str::to_string)
}

/// Normalize any known persisted shape into a non-empty document.
pub fn normalize(value: &Value, kind: DocumentKind) -> Document {
    let shape = detect_shape(value);
    debug!("Normalizing {} document from {} shape", kind, shape);

    let blocks = match shape {
        PersistedShape::Blocks => adapt_all(&value["blocks"]),
        PersistedShape::ResumeRecord => return normalize(&value["content"], kind),
        PersistedShape::HeroSection => hero_blocks(&value["sections"][0]),
        PersistedShape::BlockSection => adapt_all(&value["sections"][0]["blocks"]),
        PersistedShape::SectionList => adapt_all(&value["sections"]),
        PersistedShape::Summary => {
            vec![Block::paragraph(str_field_value(value, "summary"))]
        }
        PersistedShape::Empty => Vec::new(),
    };

    Document::from_blocks(blocks, kind)
}

/// Normalize persisted JSON text.
pub fn normalize_str(json: &str, kind: DocumentKind) -> crate::Result<Document> {
    let value: Value = serde_json::from_str(json)?;
    Ok(normalize(&value, kind))
}

fn adapt_all(entries: &Value) -> Vec<Block> {
    entries
        .as_array()
        .map(|a| a.iter().map(adapt_block).collect())
        .unwrap_or_default()
}

fn hero_blocks(section: &Value) -> Vec<Block> {
    let mut blocks = Vec::new();
    let title = str_field_value(section, "title");
    let content = str_field_value(section, "content");
    if !title.is_empty() {
        blocks.push(Block::heading(title, HeadingLevel::One));
    }
    if !content.is_empty() {
        blocks.push(Block::paragraph(content));
    }
    blocks
}

/// Adapt one persisted entry into a block.
///
/// Recognized fields pass through; missing or malformed ones take their
/// defaults. Entries of unknown type become an empty paragraph.
pub fn adapt_block(entry: &Value) -> Block {
    let Some(obj) = entry.as_object() else {
        warn!("Persisted block is not an object, using empty paragraph");
        return Block::paragraph("");
    };

    let block_type = obj.get("type").and_then(Value::as_str).unwrap_or_default();
    match block_type {
        "paragraph" => Block::Paragraph(Paragraph {
            text: text_field(obj),
            color: str_field(obj, "color"),
        }),
        "heading" => Block::Heading(Heading {
            text: text_field(obj),
            level: level_field(obj),
            color: str_field(obj, "color"),
            line_style: line_style_field(obj),
        }),
        "links" | "link_list" => Block::LinkList(LinkList::new(links_field(obj))),
        "image" => Block::Image(Image {
            url: str_field(obj, "url"),
            alt: str_field(obj, "alt"),
            align: obj
                .get("align")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<ImageAlign>().ok())
                .unwrap_or_default(),
            width: dimension_field(obj, "width"),
            height: dimension_field(obj, "height"),
        }),
        "divider" => Block::Divider(Divider {
            line_style: line_style_field(obj),
        }),
        other => {
            warn!("Unknown block type '{}', using empty paragraph", other);
            Block::paragraph("")
        }
    }
}

fn str_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn str_field_value(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn text_field(obj: &Map<String, Value>) -> String {
    obj.get("content")
        .or_else(|| obj.get("text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn level_field(obj: &Map<String, Value>) -> HeadingLevel {
    let level = match obj.get("level") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(1.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(1.0),
        _ => 1.0,
    };
    HeadingLevel::from(level.clamp(1.0, 3.0) as u8)
}

fn line_style_field(obj: &Map<String, Value>) -> LineStyle {
    obj.get("lineStyle")
        .or_else(|| obj.get("line_style"))
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

fn links_field(obj: &Map<String, Value>) -> Vec<Link> {
    obj.get("links")
        .and_then(Value::as_array)
        .map(|links| {
            links
                .iter()
                .map(|l| {
                    Link::new(
                        str_field_value(l, "label"),
                        str_field_value(l, "href"),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

fn dimension_field(obj: &Map<String, Value>, key: &str) -> Dimension {
    obj.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}

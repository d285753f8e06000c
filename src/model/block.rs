//! Block-level types.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One addressable unit of document content.
///
/// Blocks carry no identity; they are addressed by their position in the
/// owning [`Document`](super::Document).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Free text, possibly several `\n`-separated lines
    Paragraph(Paragraph),

    /// A heading of level 1 to 3
    Heading(Heading),

    /// A list of labelled links
    #[serde(rename = "links")]
    LinkList(LinkList),

    /// An image reference
    Image(Image),

    /// A horizontal separator
    Divider(Divider),
}

impl Block {
    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(Paragraph::new(text))
    }

    /// Create a heading block.
    pub fn heading(text: impl Into<String>, level: HeadingLevel) -> Self {
        Block::Heading(Heading::new(text, level))
    }

    /// Create a link list block.
    pub fn links(links: Vec<Link>) -> Self {
        Block::LinkList(LinkList::new(links))
    }

    /// Create an image block for the given url.
    pub fn image(url: impl Into<String>) -> Self {
        Block::Image(Image {
            url: url.into(),
            ..Default::default()
        })
    }

    /// Create a divider block.
    pub fn divider(line_style: LineStyle) -> Self {
        Block::Divider(Divider { line_style })
    }

    /// Create a default-valued block of the given kind.
    pub fn empty(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Paragraph => Block::Paragraph(Paragraph::default()),
            BlockKind::Heading => Block::Heading(Heading::default()),
            BlockKind::LinkList => Block::LinkList(LinkList::default()),
            BlockKind::Image => Block::Image(Image::default()),
            BlockKind::Divider => Block::Divider(Divider::default()),
        }
    }

    /// Get the kind of this block.
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Paragraph(_) => BlockKind::Paragraph,
            Block::Heading(_) => BlockKind::Heading,
            Block::LinkList(_) => BlockKind::LinkList,
            Block::Image(_) => BlockKind::Image,
            Block::Divider(_) => BlockKind::Divider,
        }
    }

    /// Text content for paragraph and heading blocks.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Paragraph(p) => Some(&p.text),
            Block::Heading(h) => Some(&h.text),
            _ => None,
        }
    }

    /// Mutable text content for paragraph and heading blocks.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Block::Paragraph(p) => Some(&mut p.text),
            Block::Heading(h) => Some(&mut h.text),
            _ => None,
        }
    }

    /// Check if this block holds editable text.
    pub fn is_text(&self) -> bool {
        matches!(self, Block::Paragraph(_) | Block::Heading(_))
    }

    /// Color override, if any.
    pub fn color(&self) -> Option<&str> {
        match self {
            Block::Paragraph(p) => non_empty(&p.color),
            Block::Heading(h) => non_empty(&h.color),
            _ => None,
        }
    }

    /// Short one-line summary used by block pickers.
    pub fn label(&self) -> String {
        match self {
            Block::Paragraph(p) if p.text.is_empty() => "Empty".to_string(),
            Block::Paragraph(p) => first_line(&p.text),
            Block::Heading(h) if h.text.is_empty() => format!("H{} Empty", h.level.as_u8()),
            Block::Heading(h) => format!("H{} {}", h.level.as_u8(), first_line(&h.text)),
            Block::LinkList(l) => format!("{} link(s)", l.links.len()),
            Block::Image(i) if i.url.is_empty() => "No image".to_string(),
            Block::Image(_) => "Image".to_string(),
            Block::Divider(_) => "Horizontal line".to_string(),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn first_line(s: &str) -> String {
    s.lines().next().unwrap_or_default().to_string()
}

/// The five block variants, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Paragraph
    Paragraph,
    /// Heading
    Heading,
    /// Link list
    LinkList,
    /// Image
    Image,
    /// Divider
    Divider,
}

impl BlockKind {
    /// All kinds in picker order.
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Paragraph,
        BlockKind::Heading,
        BlockKind::LinkList,
        BlockKind::Image,
        BlockKind::Divider,
    ];

    /// Wire name used in the `type` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading => "heading",
            BlockKind::LinkList => "links",
            BlockKind::Image => "image",
            BlockKind::Divider => "divider",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paragraph" | "p" => Ok(BlockKind::Paragraph),
            "heading" | "h" => Ok(BlockKind::Heading),
            "links" | "link_list" | "linklist" => Ok(BlockKind::LinkList),
            "image" | "img" => Ok(BlockKind::Image),
            "divider" | "line" | "hr" => Ok(BlockKind::Divider),
            other => Err(format!("unknown block type: {}", other)),
        }
    }
}

/// A paragraph of free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text content, lines separated by `\n`
    #[serde(rename = "content", alias = "text", default)]
    pub text: String,

    /// Text color override; empty means inherit
    #[serde(default)]
    pub color: String,
}

impl Paragraph {
    /// Create a paragraph with the given text and default color.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: String::new(),
        }
    }
}

/// A heading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading text
    #[serde(rename = "content", alias = "text", default)]
    pub text: String,

    /// Visual weight
    #[serde(default)]
    pub level: HeadingLevel,

    /// Text color override; empty means inherit
    #[serde(default)]
    pub color: String,

    /// Rule drawn under level-2 headings
    #[serde(rename = "lineStyle", default)]
    pub line_style: LineStyle,
}

impl Heading {
    /// Create a heading with the given text and level.
    pub fn new(text: impl Into<String>, level: HeadingLevel) -> Self {
        Self {
            text: text.into(),
            level,
            ..Default::default()
        }
    }
}

/// Heading level, restricted to 1..=3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum HeadingLevel {
    /// Title
    #[default]
    One,
    /// Section heading with rule
    Two,
    /// Sub-heading
    Three,
}

impl HeadingLevel {
    /// Numeric level.
    pub fn as_u8(&self) -> u8 {
        match self {
            HeadingLevel::One => 1,
            HeadingLevel::Two => 2,
            HeadingLevel::Three => 3,
        }
    }

    /// Map a spoken level word ("one", "two", "three").
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "one" => Some(HeadingLevel::One),
            "two" => Some(HeadingLevel::Two),
            "three" => Some(HeadingLevel::Three),
            _ => None,
        }
    }
}

impl From<u8> for HeadingLevel {
    /// Out-of-range levels are clamped.
    fn from(level: u8) -> Self {
        match level {
            0 | 1 => HeadingLevel::One,
            2 => HeadingLevel::Two,
            _ => HeadingLevel::Three,
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.as_u8()
    }
}

/// Rule style for dividers and level-2 headings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// One rule
    #[default]
    Single,
    /// Two closely stacked rules
    Double,
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(LineStyle::Single),
            "double" => Ok(LineStyle::Double),
            other => Err(format!("unknown line style: {}", other)),
        }
    }
}

/// A list of links. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLinkList")]
pub struct LinkList {
    /// Link entries, at least one
    pub links: Vec<Link>,
}

/// Wire form of a link list before the non-empty rule applies.
#[derive(Deserialize)]
struct RawLinkList {
    #[serde(default)]
    links: Vec<Link>,
}

impl From<RawLinkList> for LinkList {
    fn from(raw: RawLinkList) -> Self {
        Self::new(raw.links)
    }
}

impl LinkList {
    /// Create a link list; an empty vector is seeded with one empty link.
    pub fn new(links: Vec<Link>) -> Self {
        if links.is_empty() {
            Self::default()
        } else {
            Self { links }
        }
    }

    /// Links that carry a label or a target.
    pub fn visible(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|l| !l.is_empty())
    }
}

impl Default for LinkList {
    fn default() -> Self {
        Self {
            links: default_links(),
        }
    }
}

fn default_links() -> Vec<Link> {
    vec![Link::default()]
}

/// A single labelled link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Display label
    #[serde(default)]
    pub label: String,

    /// Target url
    #[serde(default)]
    pub href: String,
}

impl Link {
    /// Create a link.
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }

    /// Check if both label and href are empty.
    pub fn is_empty(&self) -> bool {
        self.label.is_empty() && self.href.is_empty()
    }
}

/// Field of a [`Link`] addressed by `updateLink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    /// The display label
    Label,
    /// The target url
    Href,
}

/// An image block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image url; empty until an upload succeeds
    #[serde(default)]
    pub url: String,

    /// Alternative text
    #[serde(default)]
    pub alt: String,

    /// Placement relative to following content
    #[serde(default)]
    pub align: ImageAlign,

    /// Display width
    #[serde(default)]
    pub width: Dimension,

    /// Display height
    #[serde(default)]
    pub height: Dimension,
}

/// Image placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageAlign {
    /// Own row, content continues below
    #[default]
    Block,
    /// Floated left, content wraps on the right
    Left,
    /// Floated right, content wraps on the left
    Right,
}

impl FromStr for ImageAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "block" => Ok(ImageAlign::Block),
            "left" => Ok(ImageAlign::Left),
            "right" => Ok(ImageAlign::Right),
            other => Err(format!("unknown image alignment: {}", other)),
        }
    }
}

/// Image width or height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawDimension")]
pub enum Dimension {
    /// Natural size
    #[default]
    Auto,
    /// Fixed size in pixels
    Px(u32),
    /// Percentage of the container
    Percent(u32),
}

impl Dimension {
    /// CSS value for this dimension, `None` for auto.
    pub fn css(&self) -> Option<String> {
        match self {
            Dimension::Auto => None,
            Dimension::Px(n) => Some(format!("{}px", n)),
            Dimension::Percent(n) => Some(format!("{}%", n)),
        }
    }

    /// Parse a persisted dimension string ("auto", "150px", "150", "100%").
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if let Some(pct) = s.strip_suffix('%') {
            return pct.trim().parse().map(Dimension::Percent).unwrap_or_default();
        }
        let number = s.strip_suffix("px").unwrap_or(s).trim();
        number
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| Dimension::Px(n.round() as u32))
            .unwrap_or_default()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Auto => f.write_str("auto"),
            Dimension::Px(n) => write!(f, "{}", n),
            Dimension::Percent(n) => write!(f, "{}%", n),
        }
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Dimension::Px(n) => serializer.serialize_u32(*n),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

/// Wire forms a dimension may arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDimension {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl From<RawDimension> for Dimension {
    fn from(raw: RawDimension) -> Self {
        match raw {
            RawDimension::Number(n) if n.is_finite() && n >= 0.0 => Dimension::Px(n.round() as u32),
            RawDimension::Number(_) | RawDimension::Other(_) => Dimension::Auto,
            RawDimension::Text(s) => Dimension::parse(&s),
        }
    }
}

/// A horizontal separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divider {
    /// Single or double rule
    #[serde(rename = "lineStyle", default)]
    pub line_style: LineStyle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_wire_format() {
        let block = Block::paragraph("Hello");
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value, json!({"type": "paragraph", "content": "Hello", "color": ""}));

        let links = Block::empty(BlockKind::LinkList);
        let value = serde_json::to_value(&links).unwrap();
        assert_eq!(value["type"], "links");
        assert_eq!(value["links"], json!([{"label": "", "href": ""}]));
    }

    #[test]
    fn test_text_alias() {
        let block: Block = serde_json::from_value(json!({"type": "heading", "text": "T", "level": 2}))
            .unwrap();
        assert_eq!(block, Block::heading("T", HeadingLevel::Two));
    }

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(HeadingLevel::from(0), HeadingLevel::One);
        assert_eq!(HeadingLevel::from(7), HeadingLevel::Three);
        assert_eq!(HeadingLevel::from_word("Two"), Some(HeadingLevel::Two));
        assert_eq!(HeadingLevel::from_word("four"), None);
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!(Dimension::parse("auto"), Dimension::Auto);
        assert_eq!(Dimension::parse("150px"), Dimension::Px(150));
        assert_eq!(Dimension::parse("200"), Dimension::Px(200));
        assert_eq!(Dimension::parse("100%"), Dimension::Percent(100));
        assert_eq!(Dimension::parse("wide"), Dimension::Auto);
    }

    #[test]
    fn test_dimension_wire_format() {
        let image = Image {
            width: Dimension::Px(300),
            height: Dimension::Auto,
            ..Default::default()
        };
        let value = serde_json::to_value(&image).unwrap();
        assert_eq!(value["width"], json!(300));
        assert_eq!(value["height"], json!("auto"));

        let back: Image = serde_json::from_value(json!({"width": "120px", "height": 80.4})).unwrap();
        assert_eq!(back.width, Dimension::Px(120));
        assert_eq!(back.height, Dimension::Px(80));
    }

    #[test]
    fn test_link_list_never_empty() {
        let list = LinkList::new(Vec::new());
        assert_eq!(list.links.len(), 1);
        assert!(list.links[0].is_empty());
        assert_eq!(list.visible().count(), 0);
    }

    #[test]
    fn test_link_list_deserialize_reseeds_empty() {
        let block: Block = serde_json::from_value(json!({"type": "links", "links": []})).unwrap();
        assert_eq!(block, Block::LinkList(LinkList::default()));

        let missing: LinkList = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.links, vec![Link::default()]);
    }

    #[test]
    fn test_block_kind_from_str() {
        assert_eq!("Links".parse::<BlockKind>(), Ok(BlockKind::LinkList));
        assert_eq!("hr".parse::<BlockKind>(), Ok(BlockKind::Divider));
        assert!("table".parse::<BlockKind>().is_err());
    }

    #[test]
    fn test_block_label() {
        assert_eq!(Block::paragraph("").label(), "Empty");
        assert_eq!(Block::heading("Title", HeadingLevel::One).label(), "H1 Title");
        assert_eq!(Block::divider(LineStyle::Double).label(), "Horizontal line");
        assert_eq!(Block::empty(BlockKind::Image).label(), "No image");
    }
}

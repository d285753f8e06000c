//! Block document to presentational tree and HTML.

use crate::error::Result;
use crate::model::{
    Block, Divider, Document, Heading, HeadingLevel, Image, ImageAlign, LineStyle, LinkList,
    Paragraph,
};

use super::classify::{
    classify_line, contact_segments, inline_spans, paragraph_role, LineClass, ParagraphRole, Span,
};
use super::tree::{escape_text, Element, Node, NBSP};
use super::{RenderOptions, RenderResult, RenderStats, Surface};

/// Stylesheet embedded in the standalone page.
const PAGE_CSS: &str = "\
body { font-family: Georgia, 'Times New Roman', serif; color: #111827; margin: 0; }
.document { max-width: 48rem; margin: 0 auto; padding: 2rem; line-height: 1.45; }
.block { margin: 0 0 0.5rem 0; }
.block-heading h1 { font-size: 2rem; font-weight: 700; margin: 0; }
.block-heading h2 { font-size: 1.25rem; font-weight: 700; margin: 0.75rem 0 0.25rem 0; }
.block-heading h3 { font-size: 1.05rem; font-weight: 700; margin: 0.5rem 0 0.25rem 0; }
hr { border: 0; border-top: 1px solid currentColor; margin: 0.25rem 0; }
hr.double { margin: 2px 0; }
.bullet { padding-left: 1.25rem; text-indent: -0.75rem; }
.link-label { font-weight: 600; text-decoration: underline; }
.links { list-style: none; padding: 0; margin: 0; }
.document[data-surface=\"print\"] { padding: 0; }
@page { margin: 1.5cm; }
";

/// Build the presentational tree for a document.
pub fn render_tree(doc: &Document, options: &RenderOptions) -> Node {
    let mut renderer = HtmlRenderer::new(options.clone());
    renderer.render_tree(doc)
}

/// Convert a document to an HTML fragment.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to an HTML fragment with statistics.
pub fn to_html_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = HtmlRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Convert a document to a standalone HTML page for print or export.
pub fn to_html_page(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render_page(doc)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    stats: RenderStats,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
        }
    }

    /// Render a document to an HTML fragment.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        Ok(self.render_tree(doc).to_html())
    }

    /// Render a document to HTML with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let tree = self.render_tree(doc);
        self.stats.count_text(&tree.text_content());
        Ok(RenderResult::new(tree.to_html(), self.stats))
    }

    /// Render a document to a standalone HTML page.
    pub fn render_page(mut self, doc: &Document) -> Result<String> {
        let body = self.render_tree(doc).to_html();
        let mut page = String::new();
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        page.push_str("<meta charset=\"utf-8\">\n");
        page.push_str(&format!(
            "<title>{}</title>\n",
            escape_text(&self.options.page_title)
        ));
        page.push_str("<style>\n");
        page.push_str(PAGE_CSS);
        page.push_str("</style>\n</head>\n<body>\n");
        page.push_str(&body);
        page.push_str("\n</body>\n</html>\n");
        Ok(page)
    }

    /// Build the presentational tree.
    pub fn render_tree(&mut self, doc: &Document) -> Node {
        let mut root = Element::new("div").with_class("document");
        if self.options.surface == Surface::Print {
            root = root.with_attr("data-surface", Surface::Print.as_str());
        }

        let mut previous: Option<&Block> = None;
        for block in doc.blocks() {
            if self.options.collect_stats {
                self.stats.add_block(block.kind());
            }
            if let Some(node) = self.render_block(block, previous) {
                root.push(node);
            }
            previous = Some(block);
        }

        root.into()
    }

    fn render_block(&mut self, block: &Block, previous: Option<&Block>) -> Option<Node> {
        let element = match block {
            Block::Paragraph(p) => self.render_paragraph(p, paragraph_role(previous)),
            Block::Heading(h) => self.render_heading(h),
            Block::LinkList(list) => self.render_links(list),
            Block::Image(img) => self.render_image(img)?,
            Block::Divider(d) => self.render_divider(d),
        };

        let element = match block.color() {
            Some(color) => element.with_style("color", color),
            None => element,
        };
        Some(element.into())
    }

    fn block_root(&self, block_class: &str) -> Element {
        Element::new("div")
            .with_class("block")
            .with_class(format!("block-{}", block_class))
    }

    fn render_paragraph(&mut self, p: &Paragraph, role: ParagraphRole) -> Element {
        let root = self.block_root("paragraph");

        if p.text.is_empty() {
            return root.with_text(NBSP);
        }

        match role {
            ParagraphRole::Subtitle => root
                .with_class("subtitle")
                .with_style("text-align", "center")
                .with_children(
                    p.text
                        .split('\n')
                        .map(|line| {
                            Node::from(
                                Element::new("div")
                                    .with_class("line")
                                    .with_children(inline(line)),
                            )
                        }),
                ),
            ParagraphRole::Contact => self.render_contact(root, &p.text),
            ParagraphRole::Body => {
                let lines: Vec<Node> = p.text.split('\n').map(|l| self.render_line(l)).collect();
                root.with_children(lines)
            }
        }
    }

    fn render_contact(&self, root: Element, text: &str) -> Element {
        let mut root = root
            .with_class("contact-line")
            .with_style("text-align", "center");

        for (i, segment) in contact_segments(text, &self.options.link_labels)
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                root.push(Node::text(" • "));
            }
            let span = if segment.is_label {
                self.link_label(segment.text)
            } else {
                Element::new("span")
                    .with_class("contact-item")
                    .with_text(segment.text)
            };
            root.push(span);
        }
        root
    }

    fn render_line(&mut self, line: &str) -> Node {
        let element = match classify_line(line) {
            LineClass::Rule => {
                if self.options.collect_stats {
                    self.stats.add_rules(1);
                }
                Element::new("hr").with_class("line-rule")
            }
            LineClass::Bullet(text) => {
                if self.options.collect_stats {
                    self.stats.add_bullet();
                }
                Element::new("div")
                    .with_class("bullet")
                    .with_style("padding-left", "1.25rem")
                    .with_child(Element::new("span").with_class("bullet-marker").with_text("• "))
                    .with_child(
                        Element::new("span")
                            .with_class("bullet-text")
                            .with_children(inline(text)),
                    )
            }
            LineClass::ProjectLink => Element::new("div")
                .with_class("project-link")
                .with_child(self.link_label(line)),
            LineClass::ToolsUsed(rest) => Element::new("div")
                .with_class("tools-used")
                .with_child(Element::new("strong").with_text(super::classify::TOOLS_USED))
                .with_text(rest),
            LineClass::PipeRow => Element::new("div")
                .with_class("pipe-row")
                .with_child(Element::new("strong").with_child(Element::new("em").with_text(line))),
            LineClass::DashRow { left, right } => {
                if self.options.collect_stats {
                    self.stats.add_dash_row();
                }
                Element::new("div")
                    .with_class("dash-row")
                    .with_style("display", "flex")
                    .with_style("justify-content", "space-between")
                    .with_child(
                        Element::new("strong")
                            .with_class("dash-left")
                            .with_text(or_nbsp(left)),
                    )
                    .with_child(
                        Element::new("span")
                            .with_class("dash-right")
                            .with_style("text-align", "right")
                            .with_text(or_nbsp(right)),
                    )
            }
            LineClass::Plain => Element::new("div")
                .with_class("line")
                .with_children(inline(line)),
        };
        element.into()
    }

    fn link_label(&self, text: &str) -> Element {
        Element::new("span")
            .with_class("link-label")
            .with_style("color", self.options.accent_color.clone())
            .with_text(text)
    }

    fn render_heading(&mut self, h: &Heading) -> Element {
        let root = self
            .block_root("heading")
            .with_style("clear", "both");

        match h.level {
            HeadingLevel::One => root.with_child(
                Element::new("h1")
                    .with_style("text-align", "center")
                    .with_text(h.text.as_str()),
            ),
            HeadingLevel::Two => {
                let root = root.with_child(
                    Element::new("h2")
                        .with_style("text-align", "left")
                        .with_text(h.text.as_str()),
                );
                self.with_rules(root, h.line_style, "heading-rule")
            }
            HeadingLevel::Three => root.with_child(
                Element::new("h3")
                    .with_style("text-align", "left")
                    .with_text(h.text.as_str()),
            ),
        }
    }

    fn with_rules(&mut self, mut root: Element, style: LineStyle, class: &str) -> Element {
        let count = match style {
            LineStyle::Single => 1,
            LineStyle::Double => 2,
        };
        for _ in 0..count {
            let mut hr = Element::new("hr").with_class(class);
            if style == LineStyle::Double {
                hr = hr.with_class("double");
            }
            root.push(hr);
        }
        if self.options.collect_stats {
            self.stats.add_rules(count);
        }
        root
    }

    fn render_links(&mut self, list: &LinkList) -> Element {
        let items = list.visible().map(|link| {
            let label = if !link.label.is_empty() {
                link.label.as_str()
            } else if !link.href.is_empty() {
                link.href.as_str()
            } else {
                "Link"
            };
            let href = if link.href.is_empty() {
                "#"
            } else {
                link.href.as_str()
            };
            Node::from(
                Element::new("li")
                    .with_child(Element::new("a").with_attr("href", href).with_text(label)),
            )
        });

        self.block_root("links")
            .with_child(Element::new("ul").with_class("links").with_children(items))
    }

    fn render_image(&mut self, img: &Image) -> Option<Element> {
        if img.url.is_empty() {
            return None;
        }

        let mut tag = Element::new("img")
            .with_attr("src", img.url.as_str())
            .with_attr("alt", img.alt.as_str());
        if self.options.surface == Surface::Print {
            if let crate::model::Dimension::Px(w) = img.width {
                tag = tag.with_attr("width", w.to_string());
            }
            if let crate::model::Dimension::Px(h) = img.height {
                tag = tag.with_attr("height", h.to_string());
            }
        }
        if let Some(width) = img.width.css() {
            tag = tag.with_style("width", width);
        }
        if let Some(height) = img.height.css() {
            tag = tag.with_style("height", height);
        }

        let root = self.block_root("image");
        let root = match img.align {
            ImageAlign::Block => root
                .with_class("image-block")
                .with_style("display", "block"),
            ImageAlign::Left => root
                .with_class("image-left")
                .with_style("float", "left")
                .with_style("margin", "0 1rem 0.5rem 0"),
            ImageAlign::Right => root
                .with_class("image-right")
                .with_style("float", "right")
                .with_style("margin", "0 0 0.5rem 1rem"),
        };
        Some(root.with_child(tag))
    }

    fn render_divider(&mut self, d: &Divider) -> Element {
        let root = self.block_root("divider").with_style("clear", "both");
        self.with_rules(root, d.line_style, "divider-rule")
    }
}

fn inline(text: &str) -> Vec<Node> {
    inline_spans(text)
        .into_iter()
        .map(|span| match span {
            Span::Text(t) => Node::text(t),
            Span::Bold(t) => Element::new("strong").with_text(t).into(),
        })
        .collect()
}

fn or_nbsp(text: &str) -> &str {
    if text.is_empty() {
        NBSP
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dimension, DocumentKind, Link};

    fn doc(blocks: Vec<Block>) -> Document {
        Document::from_blocks(blocks, DocumentKind::Portfolio)
    }

    fn first_block(doc: &Document, options: &RenderOptions) -> Element {
        let tree = render_tree(doc, options);
        let root = tree.as_element().unwrap().clone();
        root.children[0].as_element().unwrap().clone()
    }

    #[test]
    fn test_empty_paragraph_is_nbsp() {
        let html = to_html(&Document::new(), &RenderOptions::default()).unwrap();
        assert_eq!(
            html,
            r#"<div class="document"><div class="block block-paragraph">&nbsp;</div></div>"#
        );
    }

    #[test]
    fn test_bold_and_bullets() {
        let d = doc(vec![Block::paragraph("**Lead** dev\n• Built **it**\n\nend")]);
        let html = to_html(&d, &RenderOptions::default()).unwrap();
        assert!(html.contains(r#"<div class="line"><strong>Lead</strong> dev</div>"#));
        assert!(html.contains(r#"<span class="bullet-text">Built <strong>it</strong></span>"#));
        assert!(html.contains(r#"<hr class="line-rule">"#));
    }

    #[test]
    fn test_heading_rules() {
        let mut heading = Heading::new("Experience", HeadingLevel::Two);
        heading.line_style = LineStyle::Double;
        let block = first_block(&doc(vec![Block::Heading(heading)]), &RenderOptions::default());
        let rules = block
            .children
            .iter()
            .filter(|c| c.as_element().is_some_and(|e| e.tag == "hr"))
            .count();
        assert_eq!(rules, 2);
        assert_eq!(block.style("clear"), Some("both"));
    }

    #[test]
    fn test_color_override_on_root() {
        let mut p = Paragraph::new("x");
        p.color = "#ff0000".to_string();
        let block = first_block(&doc(vec![Block::Paragraph(p)]), &RenderOptions::default());
        assert_eq!(block.style("color"), Some("#ff0000"));
    }

    #[test]
    fn test_subtitle_after_h1() {
        let d = doc(vec![
            Block::heading("Jane Doe", HeadingLevel::One),
            Block::paragraph("Designer"),
        ]);
        let tree = render_tree(&d, &RenderOptions::default());
        let subtitle = tree.as_element().unwrap().find_class("subtitle").unwrap();
        assert_eq!(subtitle.style("text-align"), Some("center"));
    }

    #[test]
    fn test_links_fallbacks() {
        let d = doc(vec![Block::links(vec![
            Link::new("", "https://a.dev"),
            Link::default(),
            Link::new("Blog", ""),
        ])]);
        let html = to_html(&d, &RenderOptions::default()).unwrap();
        assert!(html.contains(r#"<a href="https://a.dev">https://a.dev</a>"#));
        assert!(html.contains(r##"<a href="#">Blog</a>"##));
        assert_eq!(html.matches("<li>").count(), 2);
    }

    #[test]
    fn test_empty_image_renders_nothing() {
        let d = doc(vec![Block::image(""), Block::paragraph("after")]);
        let tree = render_tree(&d, &RenderOptions::default());
        assert_eq!(tree.as_element().unwrap().children.len(), 1);
    }

    #[test]
    fn test_image_float_and_print_dimensions() {
        let img = Image {
            url: "me.png".into(),
            alt: "Me".into(),
            align: ImageAlign::Right,
            width: Dimension::Px(120),
            height: Dimension::Auto,
        };
        let options = RenderOptions::default().for_print();
        let block = first_block(&doc(vec![Block::Image(img)]), &options);
        assert_eq!(block.style("float"), Some("right"));
        let tag = block.children[0].as_element().unwrap();
        assert_eq!(tag.attr("width"), Some("120"));
        assert_eq!(tag.attr("height"), None);
        assert_eq!(tag.style("width"), Some("120px"));
    }

    #[test]
    fn test_stats() {
        let d = doc(vec![
            Block::heading("Experience", HeadingLevel::Two),
            Block::paragraph("Acme — 2020\n• one\n• two"),
            Block::divider(LineStyle::Double),
        ]);
        let result = to_html_with_stats(&d, &RenderOptions::default()).unwrap();
        assert_eq!(result.stats.block_count(), 3);
        assert_eq!(result.stats.bullet_count, 2);
        assert_eq!(result.stats.dash_row_count, 1);
        assert_eq!(result.stats.rule_count, 3);
    }

    #[test]
    fn test_page_wraps_fragment() {
        let options = RenderOptions::default().with_page_title("A & B");
        let page = to_html_page(&Document::new(), &options).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>A &amp; B</title>"));
        assert!(page.contains(r#"<div class="document">"#));
    }
}

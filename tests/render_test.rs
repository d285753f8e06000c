//! Integration tests for rendering and persisted round trips.

use blockfolio::model::{self, Block, Document, DocumentKind, HeadingLevel, LineStyle, Link};
use blockfolio::render::{self, JsonFormat, Node, RenderOptions, Surface};

fn doc(blocks: Vec<Block>) -> Document {
    Document::from_blocks(blocks, DocumentKind::Resume)
}

fn text_of(node: &Node) -> String {
    node.text_content()
}

#[test]
fn test_contact_line_highlights_link_names() {
    let d = doc(vec![
        Block::heading("Contact", HeadingLevel::Two),
        Block::paragraph("555-1234 • LinkedIn"),
    ]);
    let tree = render::render_tree(&d, &RenderOptions::default());
    let root = tree.as_element().unwrap();

    let contact = root.find_class("contact-line").unwrap();
    assert_eq!(contact.style("text-align"), Some("center"));

    let phone = contact.find_class("contact-item").unwrap();
    assert_eq!(phone.children, vec![Node::text("555-1234")]);
    assert!(phone.style("color").is_none());

    let label = contact.find_class("link-label").unwrap();
    assert_eq!(label.children, vec![Node::text("LinkedIn")]);
    assert_eq!(label.style("color"), Some("#2563eb"));

    let line: String = contact.children.iter().map(text_of).collect();
    assert_eq!(line, "555-1234 • LinkedIn");
}

#[test]
fn test_contact_line_keeps_blank_segments() {
    let d = doc(vec![
        Block::heading("Contact", HeadingLevel::Two),
        Block::paragraph("555-1234 •  • LinkedIn"),
    ]);
    let tree = render::render_tree(&d, &RenderOptions::default());
    let root = tree.as_element().unwrap();
    let contact = root.find_class("contact-line").unwrap();

    let line: String = contact.children.iter().map(text_of).collect();
    assert_eq!(line, "555-1234 •  • LinkedIn");

    let text = render::to_text(&d, &RenderOptions::default()).unwrap();
    assert!(text.contains("555-1234 •  • LinkedIn"));
}

#[test]
fn test_contact_heading_match_ignores_case() {
    let d = doc(vec![
        Block::heading("CONTACT", HeadingLevel::Two),
        Block::paragraph("me@x.dev • GitHub"),
    ]);
    let html = render::to_html(&d, &RenderOptions::default()).unwrap();
    assert!(html.contains("contact-line"));
    assert!(html.contains(">GitHub</span>"));
}

#[test]
fn test_dash_row_split() {
    let d = doc(vec![Block::paragraph("Acme Corp — Jan 2020 - Dec 2021")]);
    let tree = render::render_tree(&d, &RenderOptions::default());
    let row = tree.as_element().unwrap().find_class("dash-row").unwrap();

    let left = row.find_class("dash-left").unwrap();
    assert_eq!(left.tag, "strong");
    assert_eq!(left.children, vec![Node::text("Acme Corp")]);

    let right = row.find_class("dash-right").unwrap();
    assert_eq!(right.style("text-align"), Some("right"));
    assert_eq!(right.children, vec![Node::text("Jan 2020 - Dec 2021")]);
}

#[test]
fn test_paragraph_line_classes() {
    let d = doc(vec![Block::paragraph(
        "\n• Built **fast** things\nProject Link\nTools Used: Rust, SQL\nShop | Rust\nplain **bold**",
    )]);
    let html = render::to_html(&d, &RenderOptions::default()).unwrap();

    assert!(html.contains(r#"<hr class="line-rule">"#));
    assert!(html.contains("<strong>fast</strong>"));
    assert!(html.contains(r#"<div class="project-link">"#));
    assert!(html.contains("<strong>Tools Used:</strong> Rust, SQL"));
    assert!(html.contains("<strong><em>Shop | Rust</em></strong>"));
    assert!(html.contains("plain <strong>bold</strong>"));
}

#[test]
fn test_empty_paragraph_and_empty_links() {
    let d = doc(vec![
        Block::paragraph(""),
        Block::links(vec![Link::default(), Link::new("Blog", "https://b.dev")]),
    ]);
    let html = render::to_html(&d, &RenderOptions::default()).unwrap();
    assert!(html.contains("&nbsp;"));
    assert_eq!(html.matches("<li>").count(), 1);
}

#[test]
fn test_double_divider_renders_two_rules() {
    let d = doc(vec![Block::divider(LineStyle::Double)]);
    let html = render::to_html(&d, &RenderOptions::default()).unwrap();
    assert_eq!(html.matches("<hr").count(), 2);
}

#[test]
fn test_print_surface_marks_root() {
    let d = doc(vec![Block::paragraph("x")]);
    let options = RenderOptions::new().with_surface(Surface::Print);
    let html = render::to_html(&d, &options).unwrap();
    assert!(html.contains(r#"data-surface="print""#));
}

#[test]
fn test_render_is_deterministic() {
    let d = Document::seeded(DocumentKind::Resume);
    let options = RenderOptions::default();
    assert_eq!(
        render::to_html(&d, &options).unwrap(),
        render::to_html(&d, &options).unwrap()
    );
}

#[test]
fn test_round_trip_preserves_blocks() {
    let d = Document::seeded(DocumentKind::Resume);
    let persisted = model::serialize(&d);
    let value = serde_json::to_value(&persisted).unwrap();
    assert_eq!(model::normalize(&value, DocumentKind::Resume), d);

    let json = render::to_json(&d, JsonFormat::Compact).unwrap();
    assert_eq!(model::normalize_str(&json, DocumentKind::Portfolio).unwrap(), d);
}

#[test]
fn test_sections_round_trip() {
    let d = doc(vec![
        Block::heading("Work", HeadingLevel::Two),
        Block::image("https://cdn/a.png"),
    ]);
    let json = render::to_sections_json("Studio", &d, JsonFormat::Pretty).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(model::section_title(&value), Some("Studio".to_string()));
    assert_eq!(model::normalize(&value, DocumentKind::Portfolio), d);
}

#[test]
fn test_text_output() {
    let d = doc(vec![
        Block::heading("Skills", HeadingLevel::Two),
        Block::paragraph("• Rust\n• **SQL**"),
    ]);
    let text = render::to_text(&d, &RenderOptions::default()).unwrap();
    assert_eq!(text, "SKILLS\n------\n\n  • Rust\n  • SQL");
}

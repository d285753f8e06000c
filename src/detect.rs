//! Persisted document shape detection.
//!
//! Documents reach the editor in several historical layouts. Detection
//! only classifies; [`crate::model::normalize`] does the conversion.

use crate::error::Result;
use serde_json::Value;
use std::fmt;

/// Known persisted layouts, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistedShape {
    /// `{ blocks: [...] }` with at least one entry
    Blocks,
    /// `{ content: { summary, blocks } }` as stored by the resume record
    ResumeRecord,
    /// `{ sections: [{ type: "hero", title, content }] }`
    HeroSection,
    /// `{ sections: [{ type: "section", title, blocks }] }`
    BlockSection,
    /// `{ sections: [...] }` where each section is itself a block
    SectionList,
    /// `{ summary: "..." }` with a non-empty summary
    Summary,
    /// Nothing usable; the document kind's seed applies
    Empty,
}

impl fmt::Display for PersistedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PersistedShape::Blocks => "blocks",
            PersistedShape::ResumeRecord => "resume record",
            PersistedShape::HeroSection => "hero section",
            PersistedShape::BlockSection => "block section",
            PersistedShape::SectionList => "section list",
            PersistedShape::Summary => "summary",
            PersistedShape::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// Classify a persisted JSON value.
///
/// # Example
/// ```
/// use blockfolio::detect::{detect_shape, PersistedShape};
/// use serde_json::json;
///
/// let shape = detect_shape(&json!({ "summary": "Hello" }));
/// assert_eq!(shape, PersistedShape::Summary);
/// ```
pub fn detect_shape(value: &Value) -> PersistedShape {
    let Some(obj) = value.as_object() else {
        return PersistedShape::Empty;
    };

    if has_entries(obj.get("blocks")) {
        return PersistedShape::Blocks;
    }

    if obj.get("content").is_some_and(Value::is_object) {
        return PersistedShape::ResumeRecord;
    }

    if let Some(first) = obj
        .get("sections")
        .and_then(Value::as_array)
        .and_then(|s| s.first())
    {
        if is_hero(first) {
            return PersistedShape::HeroSection;
        }
        if first.get("blocks").is_some_and(Value::is_array) {
            return PersistedShape::BlockSection;
        }
        return PersistedShape::SectionList;
    }

    if obj
        .get("summary")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
    {
        return PersistedShape::Summary;
    }

    PersistedShape::Empty
}

/// Classify persisted JSON text.
pub fn detect_shape_from_str(json: &str) -> Result<PersistedShape> {
    let value: Value = serde_json::from_str(json)?;
    Ok(detect_shape(&value))
}

fn has_entries(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_array)
        .is_some_and(|a| !a.is_empty())
}

/// A hero section counts only when it carries a title or content.
fn is_hero(section: &Value) -> bool {
    let non_empty = |key: &str| {
        section
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty())
    };
    section.get("type").and_then(Value::as_str) == Some("hero")
        && (non_empty("title") || non_empty("content"))
}

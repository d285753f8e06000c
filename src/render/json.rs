//! JSON rendering for block documents.

use crate::error::{Error, Result};
use crate::model::{serialize, to_sections, Document, PersistedPayload};
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to the persisted `{ summary, blocks }` JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    write(&serialize(doc), format)
}

/// Convert a document to the portfolio `{ sections: [...] }` JSON.
pub fn to_sections_json(title: &str, doc: &Document, format: JsonFormat) -> Result<String> {
    let payload = PersistedPayload::Sections {
        sections: to_sections(title, doc),
    };
    write(&payload, format)
}

fn write<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, DocumentKind, HeadingLevel};

    #[test]
    fn test_to_json_pretty() {
        let doc = Document::from_blocks(
            vec![
                Block::heading("Jane", HeadingLevel::One),
                Block::paragraph("Designer"),
            ],
            DocumentKind::Portfolio,
        );

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"summary\": \"Designer\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&Document::new(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"summary":"","blocks":[{"type":"paragraph","content":"","color":""}]}"#
        );
    }

    #[test]
    fn test_to_sections_json() {
        let json = to_sections_json("", &Document::new(), JsonFormat::Compact).unwrap();
        assert!(json.starts_with(r#"{"sections":[{"type":"section","title":"My Portfolio""#));
    }
}

//! Extracted document types.

use serde::{Deserialize, Serialize};

/// A document after text extraction: an ordered sequence of per-page text
/// blocks. Immutable once extracted; owned by the pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Source filename, used as the document identifier in output records.
    pub filename: String,

    /// Declared title from the collection descriptor.
    pub title: String,

    /// Text blocks in reading order.
    pub blocks: Vec<TextBlock>,
}

impl Document {
    /// Create a document from its parts.
    pub fn new(filename: impl Into<String>, title: impl Into<String>, blocks: Vec<TextBlock>) -> Self {
        Self {
            filename: filename.into(),
            title: title.into(),
            blocks,
        }
    }

    /// Check whether the document has any text at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.text.trim().is_empty())
    }

    /// Title to use when a document yields no detectable headings: the
    /// declared title, or the filename stem if the title is blank.
    pub fn fallback_title(&self) -> String {
        let title = self.title.trim();
        if !title.is_empty() {
            return title.to_string();
        }
        match self.filename.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => self.filename.clone(),
        }
    }
}

/// A single extracted text block with its page number and a structural hint
/// usable to infer headings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    /// 1-indexed page number.
    pub page: u32,

    /// Raw block text.
    pub text: String,

    /// Rendering hint reported by the extraction collaborator.
    #[serde(default)]
    pub hint: StructuralHint,
}

impl TextBlock {
    /// Create a block with a neutral structural hint.
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
            hint: StructuralHint::default(),
        }
    }

    /// Create a block with an explicit emphasis signal.
    pub fn with_emphasis(page: u32, text: impl Into<String>, emphasis: f32) -> Self {
        Self {
            page,
            text: text.into(),
            hint: StructuralHint {
                emphasis,
                leading_whitespace: 0,
            },
        }
    }
}

/// Approximate rendering signals attached to a text block by the extractor.
///
/// `emphasis` is a relative font weight/size signal where 1.0 means body
/// text; values meaningfully above 1.0 suggest a heading. Extractors that
/// cannot measure fonts report 1.0 and heading detection falls back to
/// lexical heuristics alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StructuralHint {
    /// Relative font weight/size signal (1.0 = body text).
    pub emphasis: f32,

    /// Leading whitespace width in characters.
    pub leading_whitespace: u16,
}

impl Default for StructuralHint {
    fn default() -> Self {
        Self {
            emphasis: 1.0,
            leading_whitespace: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_is_empty() {
        let doc = Document::new("a.pdf", "A", vec![TextBlock::new(1, "   ")]);
        assert!(doc.is_empty());

        let doc = Document::new("a.pdf", "A", vec![TextBlock::new(1, "text")]);
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_fallback_title() {
        let doc = Document::new("menu.pdf", "Dinner Ideas", vec![]);
        assert_eq!(doc.fallback_title(), "Dinner Ideas");

        let doc = Document::new("menu.pdf", "  ", vec![]);
        assert_eq!(doc.fallback_title(), "menu");

        let doc = Document::new("menu", "", vec![]);
        assert_eq!(doc.fallback_title(), "menu");
    }

    #[test]
    fn test_default_hint_is_body_text() {
        let block = TextBlock::new(1, "hello");
        assert_eq!(block.hint.emphasis, 1.0);
    }
}

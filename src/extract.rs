//! Text extraction seam.
//!
//! PDF byte-stream parsing is an external collaborator: the pipeline only
//! needs something that turns a filename into an ordered per-page block
//! sequence. [`PlainTextExtractor`] reads pre-extracted text files so the
//! CLI and tests are runnable end to end; PDF-backed extractors implement
//! the same trait out of tree.

use crate::error::{Error, Result};
use crate::model::TextBlock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Capability that yields a document's ordered text-block sequence.
///
/// Implementations must be shareable across parallel document workers.
pub trait TextExtractor: Send + Sync {
    /// Extract blocks for a document, or fail with an extraction error.
    fn extract(&self, filename: &str) -> Result<Vec<TextBlock>>;
}

/// Extractor reading pre-extracted plain text from a directory.
///
/// For a document `guide.pdf` it looks for `guide.txt` (falling back to
/// the literal filename). Pages are separated by form-feed characters;
/// each non-empty line becomes one text block.
pub struct PlainTextExtractor {
    root: PathBuf,
}

impl PlainTextExtractor {
    /// Create an extractor rooted at a directory of text files.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, filename: &str) -> PathBuf {
        let with_txt = match filename.rsplit_once('.') {
            Some((stem, _)) => format!("{stem}.txt"),
            None => format!("{filename}.txt"),
        };
        let candidate = self.root.join(&with_txt);
        if candidate.exists() {
            candidate
        } else {
            self.root.join(filename)
        }
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, filename: &str) -> Result<Vec<TextBlock>> {
        let path = self.resolve(filename);
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::extraction(filename, format!("{}: {e}", path.display())))?;
        Ok(blocks_from_text(&content))
    }
}

/// Split raw text into page-numbered blocks: form feeds delimit pages,
/// non-empty lines become blocks.
pub fn blocks_from_text(content: &str) -> Vec<TextBlock> {
    let mut blocks = Vec::new();
    for (page_idx, page) in content.split('\u{c}').enumerate() {
        for line in page.lines() {
            let line = line.trim();
            if !line.is_empty() {
                blocks.push(TextBlock::new(page_idx as u32 + 1, line));
            }
        }
    }
    blocks
}

/// In-memory extractor for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExtractor {
    documents: HashMap<String, Vec<TextBlock>>,
}

impl InMemoryExtractor {
    /// Create an empty extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document's blocks under a filename.
    pub fn insert(&mut self, filename: impl Into<String>, blocks: Vec<TextBlock>) {
        self.documents.insert(filename.into(), blocks);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_document(mut self, filename: impl Into<String>, blocks: Vec<TextBlock>) -> Self {
        self.insert(filename, blocks);
        self
    }
}

impl TextExtractor for InMemoryExtractor {
    fn extract(&self, filename: &str) -> Result<Vec<TextBlock>> {
        self.documents
            .get(filename)
            .cloned()
            .ok_or_else(|| Error::extraction(filename, "document not registered"))
    }
}

/// Helper for resolving the conventional texts directory next to a
/// collection descriptor.
pub fn default_texts_dir(collection_dir: &Path) -> PathBuf {
    collection_dir.join("texts")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_blocks_from_text_pages_and_lines() {
        let blocks = blocks_from_text("line one\nline two\n\u{c}next page line\n");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].page, 1);
        assert_eq!(blocks[1].page, 1);
        assert_eq!(blocks[2].page, 2);
        assert_eq!(blocks[2].text, "next page line");
    }

    #[test]
    fn test_blocks_from_text_skips_blank_lines() {
        let blocks = blocks_from_text("a\n\n\nb\n");
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_plain_text_extractor_resolves_txt() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("guide.txt")).unwrap();
        writeln!(file, "Getting Around").unwrap();
        writeln!(file, "The metro runs late.").unwrap();

        let extractor = PlainTextExtractor::new(dir.path());
        let blocks = extractor.extract("guide.pdf").unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "Getting Around");
    }

    #[test]
    fn test_plain_text_extractor_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = PlainTextExtractor::new(dir.path());
        let err = extractor.extract("missing.pdf").unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }));
    }

    #[test]
    fn test_in_memory_extractor() {
        let extractor = InMemoryExtractor::new()
            .with_document("a.pdf", vec![TextBlock::new(1, "hello")]);
        assert_eq!(extractor.extract("a.pdf").unwrap().len(), 1);
        assert!(extractor.extract("b.pdf").is_err());
    }
}

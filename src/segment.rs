//! Section detection: text-block streams → candidate sections.
//!
//! Heading detection is inherently approximate, so the heuristics live
//! behind the [`HeadingHeuristics`] trait and their thresholds in
//! [`SegmentOptions`]. Alternative strategies (e.g. font-metadata-based)
//! can be substituted without touching the scorer or ranker.

use crate::model::{CandidateSection, Document, TextBlock};
use log::debug;
use regex::Regex;

/// Thresholds for the rule-based heading heuristics.
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Minimum heading length in characters.
    pub min_heading_len: usize,

    /// Maximum heading length in characters.
    pub max_heading_len: usize,

    /// Emphasis signal at or above which a block is treated as a heading
    /// regardless of its lexical shape.
    pub emphasis_threshold: f32,

    /// Blocks shorter than this merge into the following block instead of
    /// being discarded.
    pub min_block_len: usize,
}

impl SegmentOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading length bounds.
    pub fn with_heading_len(mut self, min: usize, max: usize) -> Self {
        self.min_heading_len = min;
        self.max_heading_len = max;
        self
    }

    /// Set the emphasis threshold.
    pub fn with_emphasis_threshold(mut self, threshold: f32) -> Self {
        self.emphasis_threshold = threshold;
        self
    }

    /// Set the minimum meaningful block length.
    pub fn with_min_block_len(mut self, len: usize) -> Self {
        self.min_block_len = len;
        self
    }
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            min_heading_len: 3,
            max_heading_len: 100,
            emphasis_threshold: 1.2,
            min_block_len: 3,
        }
    }
}

/// Strategy interface for classifying a text block as a heading.
pub trait HeadingHeuristics: Send + Sync {
    /// Decide whether the block opens a new section.
    fn is_heading(&self, block: &TextBlock) -> bool;
}

/// Default lexical + structural-hint heuristics.
///
/// A block is a heading when its length is within bounds and either its
/// emphasis hint clears the threshold or its text matches one of the
/// heading patterns (ALL CAPS, numbered, Title Case, bullet + capital,
/// single word with colon) without terminal sentence punctuation.
pub struct RuleBasedHeuristics {
    options: SegmentOptions,
    patterns: Vec<Regex>,
}

impl RuleBasedHeuristics {
    /// Build heuristics with the given thresholds.
    pub fn new(options: SegmentOptions) -> Self {
        let patterns = [
            r"^[A-Z][A-Z\s]{2,}$",               // ALL CAPS
            r"^\d+\.?\s+[A-Z]",                  // numbered sections
            r"^[A-Z][a-z]+(\s[A-Z][a-z]+)*:?$",  // Title Case
            r"^[•\-\*]\s+[A-Z]",                 // bullet with capital
            r"^\w+\s*:$",                        // single word with colon
        ]
        .iter()
        .map(|p| Regex::new(p).expect("heading pattern is valid"))
        .collect();

        Self { options, patterns }
    }

    fn matches_pattern(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

impl Default for RuleBasedHeuristics {
    fn default() -> Self {
        Self::new(SegmentOptions::default())
    }
}

impl HeadingHeuristics for RuleBasedHeuristics {
    fn is_heading(&self, block: &TextBlock) -> bool {
        let text = block.text.trim();
        let len = text.chars().count();
        if len < self.options.min_heading_len || len > self.options.max_heading_len {
            return false;
        }

        if block.hint.emphasis >= self.options.emphasis_threshold {
            return true;
        }

        let terminal_punct = text.ends_with(['.', '!', '?', ';', ',']);
        !terminal_punct && self.matches_pattern(text)
    }
}

/// Segment a document's block stream into candidate sections.
///
/// Sections come out in document order; each starts at a detected heading
/// and accumulates body blocks until the next heading. A document with no
/// detected heading becomes a single section titled from the document
/// title (filename stem if absent). A document with no text yields no
/// sections.
pub fn detect_sections(
    document: &Document,
    doc_index: usize,
    heuristics: &dyn HeadingHeuristics,
    options: &SegmentOptions,
) -> Vec<CandidateSection> {
    let blocks = merge_short_blocks(&document.blocks, options.min_block_len);

    let mut sections = Vec::new();
    let mut current: Option<(String, u32)> = None;
    let mut body: Vec<String> = Vec::new();

    let flush = |current: &mut Option<(String, u32)>, body: &mut Vec<String>, sections: &mut Vec<CandidateSection>| {
        if let Some((title, page)) = current.take() {
            if !body.is_empty() {
                sections.push(CandidateSection {
                    document: document.filename.clone(),
                    doc_index,
                    ordinal: sections.len(),
                    title,
                    page,
                    body: body.join("\n"),
                });
            }
            body.clear();
        }
    };

    for block in &blocks {
        let text = block.text.trim();
        if text.is_empty() {
            continue;
        }
        if heuristics.is_heading(block) {
            flush(&mut current, &mut body, &mut sections);
            current = Some((text.to_string(), block.page));
        } else if current.is_some() {
            body.push(text.to_string());
        }
        // Body text before the first heading is dropped, matching the
        // whole-document fallback below when no heading exists at all.
    }
    flush(&mut current, &mut body, &mut sections);

    if sections.is_empty() {
        if document.is_empty() {
            debug!("document '{}' has no text, no sections", document.filename);
            return Vec::new();
        }
        let page = document.blocks.first().map(|b| b.page).unwrap_or(1);
        let body = document
            .blocks
            .iter()
            .map(|b| b.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        debug!(
            "no headings detected in '{}', using whole-document section",
            document.filename
        );
        sections.push(CandidateSection {
            document: document.filename.clone(),
            doc_index,
            ordinal: 0,
            title: document.fallback_title(),
            page,
            body,
        });
    }

    sections
}

/// Merge blocks shorter than `min_len` into the following block so that
/// stray fragments do not spawn spurious sections.
fn merge_short_blocks(blocks: &[TextBlock], min_len: usize) -> Vec<TextBlock> {
    let mut merged: Vec<TextBlock> = Vec::with_capacity(blocks.len());
    let mut carry = String::new();

    for block in blocks {
        let text = block.text.trim();
        if text.is_empty() {
            continue;
        }
        let combined = if carry.is_empty() {
            text.to_string()
        } else {
            format!("{} {}", carry, text)
        };
        carry.clear();

        if combined.chars().count() < min_len {
            carry = combined;
            continue;
        }
        merged.push(TextBlock {
            page: block.page,
            text: combined,
            hint: block.hint,
        });
    }

    // A trailing fragment attaches to the last block rather than vanishing.
    if !carry.is_empty() {
        if let Some(last) = merged.last_mut() {
            last.text.push(' ');
            last.text.push_str(&carry);
        } else {
            merged.push(TextBlock::new(1, carry));
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextBlock;

    fn doc(blocks: Vec<TextBlock>) -> Document {
        Document::new("guide.pdf", "City Guide", blocks)
    }

    fn detect(document: &Document) -> Vec<CandidateSection> {
        let options = SegmentOptions::default();
        let heuristics = RuleBasedHeuristics::new(options.clone());
        detect_sections(document, 0, &heuristics, &options)
    }

    #[test]
    fn test_heading_patterns() {
        let heuristics = RuleBasedHeuristics::default();
        assert!(heuristics.is_heading(&TextBlock::new(1, "LOCAL ATTRACTIONS")));
        assert!(heuristics.is_heading(&TextBlock::new(1, "1. Getting There")));
        assert!(heuristics.is_heading(&TextBlock::new(1, "Vegetarian Buffet Menu")));
        assert!(heuristics.is_heading(&TextBlock::new(1, "Overview:")));

        assert!(!heuristics.is_heading(&TextBlock::new(1, "This is a full sentence.")));
        assert!(!heuristics.is_heading(&TextBlock::new(1, "ab"))); // below min length
    }

    #[test]
    fn test_emphasis_hint_overrides_lexical_shape() {
        let heuristics = RuleBasedHeuristics::default();
        // lowercase text, but rendered large
        let block = TextBlock::with_emphasis(1, "a quiet word on packing", 1.5);
        assert!(heuristics.is_heading(&block));

        let body = TextBlock::with_emphasis(1, "a quiet word on packing", 1.0);
        assert!(!heuristics.is_heading(&body));
    }

    #[test]
    fn test_sections_follow_headings() {
        let document = doc(vec![
            TextBlock::new(1, "Getting Around"),
            TextBlock::new(1, "The metro runs until midnight and covers most districts."),
            TextBlock::new(2, "Where To Eat"),
            TextBlock::new(2, "Street food stalls open after dark near the harbor."),
            TextBlock::new(2, "Reservations are rarely needed outside summer."),
        ]);

        let sections = detect(&document);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Getting Around");
        assert_eq!(sections[0].page, 1);
        assert_eq!(sections[1].title, "Where To Eat");
        assert_eq!(sections[1].page, 2);
        assert!(sections[1].body.contains("Reservations"));
        assert_eq!(sections[0].ordinal, 0);
        assert_eq!(sections[1].ordinal, 1);
    }

    #[test]
    fn test_no_headings_yields_single_section() {
        let document = doc(vec![
            TextBlock::new(1, "the metro runs until midnight."),
            TextBlock::new(2, "street food stalls open after dark."),
        ]);

        let sections = detect(&document);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "City Guide");
        assert_eq!(sections[0].page, 1);
        assert!(sections[0].body.contains("metro"));
        assert!(sections[0].body.contains("stalls"));
    }

    #[test]
    fn test_empty_document_yields_no_sections() {
        let document = doc(vec![TextBlock::new(1, "   ")]);
        assert!(detect(&document).is_empty());
    }

    #[test]
    fn test_short_blocks_merge_forward() {
        let merged = merge_short_blocks(
            &[
                TextBlock::new(1, "a)"),
                TextBlock::new(1, "pack light for the summer."),
            ],
            3,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "a) pack light for the summer.");
    }

    #[test]
    fn test_trailing_short_block_attaches_to_last() {
        let merged = merge_short_blocks(
            &[TextBlock::new(1, "pack light for the summer"), TextBlock::new(1, "ok")],
            3,
        );
        assert_eq!(merged.len(), 1);
        assert!(merged[0].text.ends_with("ok"));
    }

    #[test]
    fn test_heading_without_body_is_dropped() {
        let document = doc(vec![
            TextBlock::new(1, "Empty Heading"),
            TextBlock::new(1, "Full Heading"),
            TextBlock::new(1, "body text follows the second heading only."),
        ]);

        let sections = detect(&document);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Full Heading");
    }
}

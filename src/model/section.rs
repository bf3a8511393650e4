//! Section types produced by the pipeline stages.
//!
//! Each stage wraps the previous stage's output rather than mutating it:
//! `CandidateSection` → `ScoredSection` → `RankedSection` → `RefinedSection`.

use serde::{Deserialize, Serialize};

/// A contiguous span of a document associated with one inferred heading.
/// Created by the section detector, read-only afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSection {
    /// Filename of the source document.
    pub document: String,

    /// Position of the source document in the collection descriptor's
    /// document list. Used for deterministic tie-breaking.
    pub doc_index: usize,

    /// Ordinal of this section within its document (0-based).
    pub ordinal: usize,

    /// Inferred section title.
    pub title: String,

    /// Page number of the triggering heading block.
    pub page: u32,

    /// Concatenated body text.
    pub body: String,
}

impl CandidateSection {
    /// Title and body joined for whole-section term matching.
    pub fn full_text(&self) -> String {
        if self.body.is_empty() {
            self.title.clone()
        } else {
            format!("{}\n{}", self.title, self.body)
        }
    }
}

/// A candidate section with its relevance score attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSection {
    /// The scored candidate.
    pub section: CandidateSection,

    /// Normalized relevance score in [0.0, 1.0].
    pub relevance_score: f32,

    /// Per-factor contributions, recorded when diagnostics are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

/// Contributing-factor breakdown for one scored section. Each factor is
/// normalized to [0, 1] before weighting.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Weighted keyword match fraction.
    pub keyword: f32,

    /// Priority-concept contribution.
    pub priority: f32,

    /// Task-alignment cosine similarity.
    pub task: f32,

    /// Title-keyword and primacy bonus.
    pub structural: f32,
}

/// A scored section with its collection-wide importance rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedSection {
    /// The underlying scored section.
    pub scored: ScoredSection,

    /// 1-based rank, unique and contiguous within a collection.
    pub importance_rank: u32,
}

impl RankedSection {
    /// Convenience accessor for the candidate section.
    pub fn section(&self) -> &CandidateSection {
        &self.scored.section
    }
}

/// Terminal artifact: a ranked section with its refined excerpt and key
/// concepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinedSection {
    /// The underlying ranked section.
    pub ranked: RankedSection,

    /// Bounded-length persona-biased excerpt.
    pub refined_text: String,

    /// Deduplicated salient terms, ordered by salience.
    pub key_concepts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, body: &str) -> CandidateSection {
        CandidateSection {
            document: "doc.pdf".to_string(),
            doc_index: 0,
            ordinal: 0,
            title: title.to_string(),
            page: 1,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_full_text_joins_title_and_body() {
        let section = candidate("Menu Ideas", "Serve a buffet.");
        assert_eq!(section.full_text(), "Menu Ideas\nServe a buffet.");
    }

    #[test]
    fn test_full_text_empty_body() {
        let section = candidate("Menu Ideas", "");
        assert_eq!(section.full_text(), "Menu Ideas");
    }
}

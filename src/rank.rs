//! Cross-document ranking of scored sections.
//!
//! The ranker is the single serialization barrier per collection: it runs
//! after every document worker has finished scoring and produces a fully
//! deterministic total order regardless of worker interleaving.

use crate::model::{RankedSection, ScoredSection};
use std::cmp::Ordering;

/// Ranking configuration.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Keep at most this many sections. Truncation preserves the ranks
    /// already assigned (top-K keeps ranks 1..K).
    pub top_k: Option<usize>,

    /// Sections scoring below this are not considered for ranking.
    pub min_score: f32,
}

impl RankOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of ranked sections.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }

    /// Disable truncation.
    pub fn unbounded(mut self) -> Self {
        self.top_k = None;
        self
    }

    /// Set the admission threshold.
    pub fn with_min_score(mut self, min: f32) -> Self {
        self.min_score = min;
        self
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_k: Some(20),
            min_score: 0.05,
        }
    }
}

/// Pool scored sections across a collection, order them, and assign
/// contiguous 1-based importance ranks.
///
/// Order: relevance score descending; ties broken by document index in the
/// descriptor's document list, then page number, then section ordinal, so
/// the result is identical across repeated and concurrent runs.
pub fn rank_sections(sections: Vec<ScoredSection>, options: &RankOptions) -> Vec<RankedSection> {
    let mut admitted: Vec<ScoredSection> = sections
        .into_iter()
        .filter(|s| s.relevance_score >= options.min_score)
        .collect();

    admitted.sort_by(compare_sections);

    let mut ranked: Vec<RankedSection> = admitted
        .into_iter()
        .enumerate()
        .map(|(i, scored)| RankedSection {
            scored,
            importance_rank: (i + 1) as u32,
        })
        .collect();

    if let Some(k) = options.top_k {
        ranked.truncate(k);
    }
    ranked
}

fn compare_sections(a: &ScoredSection, b: &ScoredSection) -> Ordering {
    b.relevance_score
        .partial_cmp(&a.relevance_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.section.doc_index.cmp(&b.section.doc_index))
        .then_with(|| a.section.page.cmp(&b.section.page))
        .then_with(|| a.section.ordinal.cmp(&b.section.ordinal))
}

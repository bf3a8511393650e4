//! Multi-factor relevance scoring of candidate sections.
//!
//! Each factor is normalized to [0, 1] before combination and the final
//! weighted sum is re-clamped, so `relevance_score` always stays inside
//! the unit interval for valid and degenerate input alike.

pub mod similarity;

use crate::model::{CandidateSection, ScoreBreakdown, ScoredSection};
use crate::persona::PersonaProfile;
use crate::text;
use serde::{Deserialize, Serialize};
use similarity::{cosine_similarity, TermVector};

/// Task tokens shorter than this are ignored for alignment.
const TASK_TOKEN_MIN_LEN: usize = 3;

/// Primacy bonus decay per section ordinal within a document.
const PRIMACY_DECAY: f32 = 0.1;

/// Factor weights for the combined relevance score.
///
/// The exact split is tunable configuration, not a fixed law; defaults are
/// keyword 0.35, priority 0.25, task 0.30, structural 0.10. The weights in
/// effect are logged per run so every score is reproducible and
/// explainable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the keyword match factor.
    pub keyword: f32,

    /// Weight of the priority concept factor.
    pub priority: f32,

    /// Weight of the task-alignment factor.
    pub task: f32,

    /// Weight of the structural (title keyword + primacy) factor.
    pub structural: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            keyword: 0.35,
            priority: 0.25,
            task: 0.30,
            structural: 0.10,
        }
    }
}

/// Scores candidate sections against one persona profile.
///
/// Holds only read-only state, so a single scorer is shared across
/// parallel document workers.
pub struct RelevanceScorer<'a> {
    profile: &'a PersonaProfile,
    weights: ScoreWeights,
    task_vector: TermVector,
    record_breakdown: bool,
}

impl<'a> RelevanceScorer<'a> {
    /// Create a scorer for a profile with the given weights.
    pub fn new(profile: &'a PersonaProfile, weights: ScoreWeights) -> Self {
        let task_vector =
            TermVector::from_tokens(text::tokenize_min_len(&profile.task, TASK_TOKEN_MIN_LEN));
        Self {
            profile,
            weights,
            task_vector,
            record_breakdown: false,
        }
    }

    /// Record per-factor contributions on every scored section.
    pub fn with_breakdown(mut self, record: bool) -> Self {
        self.record_breakdown = record;
        self
    }

    /// Score a candidate section. Never fails; an empty section receives
    /// the minimum score.
    pub fn score(&self, section: CandidateSection) -> ScoredSection {
        if section.full_text().trim().is_empty() {
            return ScoredSection {
                section,
                relevance_score: 0.0,
                breakdown: self.record_breakdown.then(ScoreBreakdown::default),
            };
        }

        let title_lower = section.title.to_lowercase();
        let body_lower = section.body.to_lowercase();

        let keyword = self.keyword_factor(&title_lower, &body_lower);
        let priority = self.priority_factor(&title_lower, &body_lower);
        let task = self.task_factor(&section);
        let structural = self.structural_factor(&title_lower, section.ordinal);

        let combined = keyword * self.weights.keyword
            + priority * self.weights.priority
            + task * self.weights.task
            + structural * self.weights.structural;

        ScoredSection {
            section,
            relevance_score: combined.clamp(0.0, 1.0),
            breakdown: self.record_breakdown.then(|| ScoreBreakdown {
                keyword,
                priority,
                task,
                structural,
            }),
        }
    }

    /// Weighted fraction of profile keywords found in the section. A hit
    /// in the title counts full weight, a body-only hit half weight.
    fn keyword_factor(&self, title_lower: &str, body_lower: &str) -> f32 {
        let total = self.profile.total_keyword_weight();
        if total == 0.0 {
            return 0.0;
        }
        let matched: f32 = self
            .profile
            .keywords
            .iter()
            .map(|(keyword, weight)| {
                if text::contains_term(title_lower, keyword) {
                    *weight
                } else if text::contains_term(body_lower, keyword) {
                    weight * 0.5
                } else {
                    0.0
                }
            })
            .sum();
        (matched / total).clamp(0.0, 1.0)
    }

    /// Priority concepts count double and saturate quickly: fewer,
    /// stronger signals than the generic keyword factor.
    fn priority_factor(&self, title_lower: &str, body_lower: &str) -> f32 {
        if self.profile.priorities.is_empty() {
            return 0.0;
        }
        let hits = self
            .profile
            .priorities
            .iter()
            .filter(|p| {
                text::contains_term(title_lower, p) || text::contains_term(body_lower, p)
            })
            .count();
        ((hits as f32 * 2.0) / self.profile.priorities.len() as f32).clamp(0.0, 1.0)
    }

    /// Cosine similarity between the task's and the section's
    /// term-frequency vectors over their shared vocabulary.
    fn task_factor(&self, section: &CandidateSection) -> f32 {
        if self.task_vector.is_empty() {
            return 0.0;
        }
        let section_vector = TermVector::from_tokens(text::tokenize(&section.full_text()));
        cosine_similarity(&self.task_vector, &section_vector)
    }

    /// Small bonus for keyword-bearing titles and early document position.
    fn structural_factor(&self, title_lower: &str, ordinal: usize) -> f32 {
        let title_hit = self
            .profile
            .keywords
            .iter()
            .any(|(keyword, _)| text::contains_term(title_lower, keyword));
        let primacy = (1.0 - PRIMACY_DECAY * ordinal as f32).max(0.0);
        0.6 * if title_hit { 1.0 } else { 0.0 } + 0.4 * primacy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::build_profile;

    fn candidate(title: &str, body: &str, ordinal: usize) -> CandidateSection {
        CandidateSection {
            document: "menus.pdf".to_string(),
            doc_index: 0,
            ordinal,
            title: title.to_string(),
            page: 1,
            body: body.to_string(),
        }
    }

    fn food_profile() -> PersonaProfile {
        build_profile(
            "Food Contractor",
            "Prepare vegetarian buffet-style dinner menu for corporate gathering",
        )
    }

    #[test]
    fn test_relevant_section_outranks_irrelevant() {
        let profile = food_profile();
        let scorer = RelevanceScorer::new(&profile, ScoreWeights::default());

        let relevant = scorer.score(candidate(
            "Vegetarian Buffet Menu Ideas",
            "A corporate buffet works best with varied vegetarian dishes laid out by course.",
            0,
        ));
        let irrelevant = scorer.score(candidate(
            "Kitchen Equipment Maintenance",
            "Degrease the extraction hood monthly and inspect hose fittings.",
            0,
        ));

        assert!(relevant.relevance_score > irrelevant.relevance_score);
    }

    #[test]
    fn test_scores_stay_in_unit_interval() {
        let profile = food_profile();
        let scorer = RelevanceScorer::new(&profile, ScoreWeights::default());

        // Maximally matching text must still clamp to 1.0
        let stacked = scorer.score(candidate(
            "vegetarian buffet menu recipe catering corporate dietary",
            "vegetarian buffet menu recipe catering ingredients cooking preparation dietary \
             corporate scalability presentation dinner gathering prepare",
            0,
        ));
        assert!(stacked.relevance_score <= 1.0);
        assert!(stacked.relevance_score > 0.5);

        let empty = scorer.score(candidate("", "", 0));
        assert_eq!(empty.relevance_score, 0.0);
    }

    #[test]
    fn test_empty_profile_scores_zero_without_panic() {
        let profile = build_profile("", "");
        let scorer = RelevanceScorer::new(&profile, ScoreWeights::default());
        let scored = scorer.score(candidate("Any Title", "any body text here", 0));
        // structural primacy alone still applies, so the score is small but bounded
        assert!(scored.relevance_score >= 0.0 && scored.relevance_score <= 1.0);
    }

    #[test]
    fn test_task_alignment_alone_gives_nonzero_score() {
        // Unknown role and a section sharing only task vocabulary
        let profile = build_profile("Archivist", "catalog medieval manuscripts");
        let scorer = RelevanceScorer::new(&profile, ScoreWeights::default());
        let scored = scorer.score(candidate(
            "Shelf Notes",
            "several manuscripts were recovered from the east wing",
            5,
        ));
        assert!(scored.relevance_score > 0.0);
    }

    #[test]
    fn test_title_match_outweighs_body_match() {
        let profile = food_profile();
        let scorer = RelevanceScorer::new(&profile, ScoreWeights::default());

        let in_title = scorer.score(candidate(
            "Buffet Layout",
            "arrange the long tables near the entrance.",
            1,
        ));
        let in_body = scorer.score(candidate(
            "Table Layout",
            "arrange the buffet tables near the entrance.",
            1,
        ));
        assert!(in_title.relevance_score > in_body.relevance_score);
    }

    #[test]
    fn test_earlier_section_gets_primacy_bonus() {
        let profile = food_profile();
        let scorer = RelevanceScorer::new(&profile, ScoreWeights::default());

        let early = scorer.score(candidate("Buffet Basics", "plan the menu early.", 0));
        let late = scorer.score(candidate("Buffet Basics", "plan the menu early.", 8));
        assert!(early.relevance_score > late.relevance_score);
    }

    #[test]
    fn test_breakdown_recorded_when_enabled() {
        let profile = food_profile();
        let scorer = RelevanceScorer::new(&profile, ScoreWeights::default()).with_breakdown(true);
        let scored = scorer.score(candidate("Buffet Menu", "vegetarian dishes.", 0));

        let breakdown = scored.breakdown.expect("breakdown enabled");
        assert!(breakdown.keyword > 0.0);
        for factor in [
            breakdown.keyword,
            breakdown.priority,
            breakdown.task,
            breakdown.structural,
        ] {
            assert!((0.0..=1.0).contains(&factor));
        }

        let plain = RelevanceScorer::new(&profile, ScoreWeights::default())
            .score(candidate("Buffet Menu", "vegetarian dishes.", 0));
        assert!(plain.breakdown.is_none());
    }
}

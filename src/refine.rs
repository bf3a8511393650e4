//! Content refinement and key-concept extraction for top-ranked sections.
//!
//! Refinement scores sentence-like units with the same keyword/priority
//! logic the section scorer uses, then keeps the strongest units in their
//! original order under a character budget.

use crate::model::{RankedSection, RefinedSection};
use crate::persona::PersonaProfile;
use crate::text;
use std::collections::HashMap;

/// Minimum character length for frequency-derived concept terms.
const CONCEPT_TERM_MIN_LEN: usize = 4;

/// Refinement configuration.
#[derive(Debug, Clone)]
pub struct RefineOptions {
    /// Maximum refined_text length in characters.
    pub char_budget: usize,

    /// Maximum number of key concepts per section.
    pub max_concepts: usize,

    /// Refine only the top N ranked sections.
    pub refine_top: usize,
}

impl RefineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the refined text character budget.
    pub fn with_char_budget(mut self, budget: usize) -> Self {
        self.char_budget = budget;
        self
    }

    /// Set the key-concept cap.
    pub fn with_max_concepts(mut self, max: usize) -> Self {
        self.max_concepts = max;
        self
    }

    /// Set how many ranked sections receive refinement.
    pub fn with_refine_top(mut self, top: usize) -> Self {
        self.refine_top = top;
        self
    }
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            char_budget: 500,
            max_concepts: 5,
            refine_top: 15,
        }
    }
}

/// Refine one ranked section into a bounded excerpt plus key concepts.
///
/// Never fails: empty input yields empty refined_text and no concepts.
pub fn refine(
    ranked: RankedSection,
    profile: &PersonaProfile,
    options: &RefineOptions,
) -> RefinedSection {
    let body = ranked.section().body.clone();
    let full_text = ranked.section().full_text();

    let refined_text = refine_body(&body, profile, options.char_budget);
    let key_concepts = extract_concepts(&full_text, profile, options.max_concepts);

    RefinedSection {
        ranked,
        refined_text,
        key_concepts,
    }
}

/// Select the most persona-relevant sentences, in original order, within
/// the character budget. A body already under budget passes through whole.
fn refine_body(body: &str, profile: &PersonaProfile, char_budget: usize) -> String {
    let body = body.trim();
    if body.is_empty() || char_budget == 0 {
        return String::new();
    }
    if body.chars().count() <= char_budget {
        return body.to_string();
    }

    let sentences = split_sentences(body);
    let scores: Vec<f32> = sentences
        .iter()
        .map(|s| sentence_score(s, profile))
        .collect();

    let mut order: Vec<usize> = (0..sentences.len()).collect();
    // Highest-scoring first; index ascending keeps ties deterministic.
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut selected: Vec<usize> = Vec::new();
    let mut used = 0usize;
    for idx in order {
        let len = sentences[idx].chars().count();
        // account for the joining space
        let cost = if selected.is_empty() { len } else { len + 1 };
        if used + cost > char_budget {
            continue;
        }
        used += cost;
        selected.push(idx);
    }

    if selected.is_empty() {
        // No sentence fits whole; fall back to a plain truncation.
        return text::truncate_chars(body, char_budget).to_string();
    }

    selected.sort_unstable();
    selected
        .into_iter()
        .map(|i| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keyword/priority relevance of a single sentence.
fn sentence_score(sentence: &str, profile: &PersonaProfile) -> f32 {
    let lower = sentence.to_lowercase();

    let total = profile.total_keyword_weight();
    let keyword = if total == 0.0 {
        0.0
    } else {
        let matched: f32 = profile
            .keywords
            .iter()
            .filter(|(k, _)| text::contains_term(&lower, k))
            .map(|(_, w)| w)
            .sum();
        (matched / total).clamp(0.0, 1.0)
    };

    let priority = if profile.priorities.is_empty() {
        0.0
    } else {
        let hits = profile
            .priorities
            .iter()
            .filter(|p| text::contains_term(&lower, p))
            .count();
        ((hits as f32 * 2.0) / profile.priorities.len() as f32).clamp(0.0, 1.0)
    };

    0.6 * keyword + 0.4 * priority
}

/// Split text into sentence-like units on punctuation boundaries.
fn split_sentences(body: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let boundary = chars.peek().map_or(true, |n| n.is_whitespace());
            if boundary {
                let trimmed = current.trim();
                if !trimmed.is_empty() {
                    sentences.push(trimmed.to_string());
                }
                current.clear();
            }
        }
    }
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    sentences
}

/// Extract key concepts: profile keywords and priority concepts present in
/// the text first, then the highest-frequency remaining terms. Deduplicated
/// case-insensitively, capped at `max_concepts`.
fn extract_concepts(full_text: &str, profile: &PersonaProfile, max_concepts: usize) -> Vec<String> {
    if max_concepts == 0 || full_text.trim().is_empty() {
        return Vec::new();
    }
    let lower = full_text.to_lowercase();

    let mut concepts: Vec<String> = Vec::new();
    let push = |term: &str, concepts: &mut Vec<String>| {
        let normalized = text::normalize_term(term);
        if !normalized.is_empty() && !concepts.contains(&normalized) {
            concepts.push(normalized);
        }
    };

    for (keyword, _) in &profile.keywords {
        if text::contains_term(&lower, keyword) {
            push(keyword, &mut concepts);
        }
    }
    for priority in &profile.priorities {
        if text::contains_term(&lower, priority) {
            push(priority, &mut concepts);
        }
    }

    if concepts.len() < max_concepts {
        let mut frequencies: HashMap<String, usize> = HashMap::new();
        for token in text::tokenize(&lower) {
            if token.chars().count() >= CONCEPT_TERM_MIN_LEN {
                *frequencies.entry(token).or_insert(0) += 1;
            }
        }
        let mut by_frequency: Vec<(String, usize)> = frequencies.into_iter().collect();
        // count descending, then alphabetical for a stable order
        by_frequency.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        for (term, _) in by_frequency {
            if concepts.len() >= max_concepts {
                break;
            }
            push(&term, &mut concepts);
        }
    }

    concepts.truncate(max_concepts);
    concepts
}

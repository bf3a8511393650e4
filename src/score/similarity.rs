//! Sparse term-frequency vectors and cosine similarity.
//!
//! Persona-free on purpose: the scorer builds its vectors from tokenized
//! text and this module only does the vector math, so it can be tested
//! independently of the domain model.

use std::collections::HashMap;

/// A sparse term-frequency vector.
#[derive(Debug, Clone, Default)]
pub struct TermVector {
    counts: HashMap<String, f32>,
}

impl TermVector {
    /// Build a vector from pre-tokenized terms.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts = HashMap::new();
        for token in tokens {
            *counts.entry(token.into()).or_insert(0.0) += 1.0;
        }
        Self { counts }
    }

    /// Whether the vector has no terms.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Frequency of a term (0.0 if absent).
    pub fn get(&self, term: &str) -> f32 {
        self.counts.get(term).copied().unwrap_or(0.0)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f32 {
        self.counts.values().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Dot product with another vector over the shared vocabulary.
    pub fn dot(&self, other: &TermVector) -> f32 {
        // Iterate the smaller map.
        let (small, large) = if self.counts.len() <= other.counts.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .counts
            .iter()
            .map(|(term, v)| v * large.get(term))
            .sum()
    }
}

/// Cosine similarity between two term-frequency vectors, in [0, 1].
///
/// Either vector being empty yields 0.0 rather than NaN.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f32 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

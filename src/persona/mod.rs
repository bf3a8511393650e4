//! Persona modeling: role/task strings → weighted keyword profile.
//!
//! A [`PersonaProfile`] is built once per run and shared read-only across
//! all concurrent document workers. Known role categories map to curated
//! keyword sets; unknown roles degrade to a uniform-weight profile built
//! from the role and task tokens themselves, so malformed input is never
//! fatal.

mod categories;

pub use categories::{builtin_categories, CURATED_WEIGHT, FALLBACK_WEIGHT};

use crate::text;
use serde::{Deserialize, Serialize};

/// Minimum character length for task tokens promoted to priority concepts.
const PRIORITY_TOKEN_MIN_LEN: usize = 3;

/// A curated role category: keywords with hand-assigned weights plus
/// role-specific priority terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaCategory {
    /// Lowercase category name matched against role strings.
    pub name: String,

    /// Curated keywords with weights.
    pub keywords: Vec<(String, f32)>,

    /// Terms that boost relevance disproportionately for this role.
    pub priorities: Vec<String>,
}

impl PersonaCategory {
    /// Build a category with uniformly weighted curated keywords.
    pub fn new(name: &str, keywords: &[&str], priorities: &[&str]) -> Self {
        Self {
            name: name.to_lowercase(),
            keywords: keywords
                .iter()
                .map(|k| (k.to_lowercase(), CURATED_WEIGHT))
                .collect(),
            priorities: priorities.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    /// Check whether a lowercase role string matches this category.
    ///
    /// Matching is substring-tolerant in both directions so that e.g.
    /// "Senior Travel Planner" still resolves to "travel planner".
    fn matches(&self, role_lower: &str) -> bool {
        !role_lower.is_empty()
            && (role_lower.contains(&self.name) || self.name.contains(role_lower))
    }
}

/// The static role-category table plus profile construction.
///
/// Built once at startup and read-only afterward. Custom categories can be
/// registered to support dynamic personas without code changes.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    categories: Vec<PersonaCategory>,
}

impl PersonaRegistry {
    /// Registry with no categories; every role uses the token fallback.
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Registry preloaded with the built-in categories.
    pub fn with_builtin() -> Self {
        Self {
            categories: builtin_categories(),
        }
    }

    /// Register an additional category. Later registrations take
    /// precedence over earlier ones when both match a role.
    pub fn register(&mut self, category: PersonaCategory) {
        self.categories.insert(0, category);
    }

    /// Look up the category matching a role string, if any.
    pub fn category_for(&self, role: &str) -> Option<&PersonaCategory> {
        let role_lower = role.trim().to_lowercase();
        self.categories.iter().find(|c| c.matches(&role_lower))
    }

    /// Build a persona profile from role and task strings.
    ///
    /// Pure function of its inputs and the category table. Never fails:
    /// empty or unrecognized input degrades to whatever tokens are
    /// present.
    pub fn build_profile(&self, role: &str, task: &str) -> PersonaProfile {
        let category = self.category_for(role);

        let keywords = match category {
            Some(category) => category.keywords.clone(),
            None => {
                // Unknown role: every role+task token becomes a keyword
                // with a uniform base weight.
                let mut seen = Vec::new();
                let mut keywords = Vec::new();
                for token in text::tokenize(role).into_iter().chain(text::tokenize(task)) {
                    if !seen.contains(&token) {
                        seen.push(token.clone());
                        keywords.push((token, FALLBACK_WEIGHT));
                    }
                }
                keywords
            }
        };

        // Priority concepts: role-specific priority terms plus the task's
        // own meaningful tokens.
        let mut priorities: Vec<String> = category
            .map(|c| c.priorities.clone())
            .unwrap_or_default();
        for token in text::tokenize_min_len(task, PRIORITY_TOKEN_MIN_LEN) {
            if !priorities.contains(&token) {
                priorities.push(token);
            }
        }

        PersonaProfile {
            role: role.trim().to_string(),
            task: task.trim().to_string(),
            keywords,
            priorities,
        }
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

/// Build a profile using the built-in category table.
pub fn build_profile(role: &str, task: &str) -> PersonaProfile {
    PersonaRegistry::with_builtin().build_profile(role, task)
}

/// A weighted keyword/priority profile for one persona and task.
///
/// Read-only after construction; shared across document workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaProfile {
    /// Role label as supplied.
    pub role: String,

    /// Task text as supplied.
    pub task: String,

    /// Ordered weighted keywords (lowercase).
    pub keywords: Vec<(String, f32)>,

    /// Priority concepts (lowercase, deduplicated).
    pub priorities: Vec<String>,
}

impl PersonaProfile {
    /// Sum of all keyword weights; the keyword factor normalizer.
    pub fn total_keyword_weight(&self) -> f32 {
        self.keywords.iter().map(|(_, w)| w).sum()
    }

    /// Whether the profile carries no lexical signal at all.
    pub fn is_minimal(&self) -> bool {
        self.keywords.is_empty() && self.priorities.is_empty()
    }
}

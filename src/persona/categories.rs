//! Built-in persona categories.
//!
//! Curated keyword/priority sets for the role categories the system ships
//! with. The table is configuration data: callers can extend or replace it
//! through [`PersonaRegistry`](super::PersonaRegistry) without code changes.

use super::PersonaCategory;

/// Weight assigned to curated category keywords.
pub const CURATED_WEIGHT: f32 = 1.0;

/// Uniform weight for fallback keywords derived from an unknown role/task.
pub const FALLBACK_WEIGHT: f32 = 0.6;

/// Build the built-in category table.
pub fn builtin_categories() -> Vec<PersonaCategory> {
    vec![
        PersonaCategory::new(
            "travel planner",
            &[
                "travel",
                "destination",
                "accommodation",
                "transport",
                "itinerary",
                "attractions",
                "restaurants",
                "budget",
                "activities",
                "booking",
            ],
            &[
                "practical information",
                "recommendations",
                "logistics",
                "costs",
            ],
        ),
        PersonaCategory::new(
            "hr professional",
            &[
                "forms",
                "compliance",
                "onboarding",
                "hr",
                "employee",
                "workflow",
                "automation",
                "fillable",
                "digital",
                "process",
            ],
            &["efficiency", "compliance", "automation", "user experience"],
        ),
        PersonaCategory::new(
            "food contractor",
            &[
                "recipe",
                "menu",
                "vegetarian",
                "buffet",
                "catering",
                "ingredients",
                "cooking",
                "preparation",
                "dietary",
                "corporate",
            ],
            &[
                "scalability",
                "dietary restrictions",
                "presentation",
                "cost-effectiveness",
            ],
        ),
    ]
}

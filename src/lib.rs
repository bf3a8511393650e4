//! # docsieve
//!
//! Persona-driven document section relevance ranking for Rust.
//!
//! Given per-document text-block streams, a persona role, and a task
//! ("job to be done"), docsieve detects sections, scores them against a
//! weighted keyword profile, ranks them across the whole collection, and
//! produces refined excerpts with key concepts for the top sections.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsieve::{analyze_collection, AnalyzeOptions};
//! use docsieve::extract::PlainTextExtractor;
//! use docsieve::model::CollectionDescriptor;
//! use docsieve::output::{to_json, JsonFormat};
//!
//! fn main() -> docsieve::Result<()> {
//!     let json = std::fs::read_to_string("challenge1b_input.json")?;
//!     let descriptor = CollectionDescriptor::from_json(&json)?;
//!     let extractor = PlainTextExtractor::new("texts");
//!
//!     let analysis = analyze_collection(&descriptor, &extractor, &AnalyzeOptions::default())?;
//!     println!("{}", to_json(&analysis, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Deterministic ranking**: lexical scoring with a documented factor
//!   split and a total tie-break order, reproducible across runs
//! - **Persona profiles**: curated role categories plus a graceful
//!   token fallback for unknown roles
//! - **Pluggable heuristics**: heading detection behind a strategy trait
//! - **Parallel processing**: per-document fan-out on Rayon with a single
//!   ranking barrier per collection
//! - **Streaming**: incremental ranked/refined records over a channel

pub mod error;
pub mod extract;
pub mod model;
pub mod output;
pub mod persona;
pub mod pipeline;
pub mod rank;
pub mod refine;
pub mod score;
pub mod segment;
pub mod stream;
pub mod text;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    CandidateSection, CollectionDescriptor, Document, RankedSection, RefinedSection,
    ScoreBreakdown, ScoredSection, StructuralHint, TextBlock,
};
pub use output::{
    to_json, AnalysisMetadata, CollectionAnalysis, ExtractedSectionRecord, JsonFormat,
    SubsectionRecord,
};
pub use persona::{build_profile, PersonaCategory, PersonaProfile, PersonaRegistry};
pub use pipeline::{
    analyze_collection, analyze_collection_with_heuristics, analyze_collections, AnalyzeOptions,
};
pub use rank::{rank_sections, RankOptions};
pub use refine::{refine, RefineOptions};
pub use score::{RelevanceScorer, ScoreWeights};
pub use segment::{detect_sections, HeadingHeuristics, RuleBasedHeuristics, SegmentOptions};
pub use stream::{analyze_collection_streaming, AnalysisEvent};

/// Analyze a collection whose descriptor is raw JSON.
///
/// Convenience wrapper over [`CollectionDescriptor::from_json`] and
/// [`analyze_collection`].
pub fn analyze_json(
    descriptor_json: &str,
    extractor: &dyn extract::TextExtractor,
    options: &AnalyzeOptions,
) -> Result<CollectionAnalysis> {
    let descriptor = CollectionDescriptor::from_json(descriptor_json)?;
    analyze_collection(&descriptor, extractor, options)
}

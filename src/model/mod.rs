//! Data model for collection analysis.
//!
//! This module defines the intermediate representation that flows through
//! the pipeline: extracted documents and text blocks on the input side,
//! candidate/scored/ranked/refined sections on the output side. Values are
//! produced once per stage and read-only afterward, so concurrent document
//! workers never share mutable state.

mod collection;
mod document;
mod section;

pub use collection::{
    ChallengeInfo, CollectionDescriptor, DocumentEntry, JobToBeDone, Persona,
};
pub use document::{Document, StructuralHint, TextBlock};
pub use section::{
    CandidateSection, RankedSection, RefinedSection, ScoreBreakdown, ScoredSection,
};

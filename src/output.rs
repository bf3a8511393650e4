//! Output records serialized per collection.
//!
//! Field names and list ordering are part of the contract: both lists are
//! ordered by importance_rank ascending and the shapes round-trip through
//! serde without loss. Relevance scores serialize rounded to three
//! decimals.

use crate::model::{RankedSection, RefinedSection};
use crate::text;
use serde::{Deserialize, Serialize, Serializer};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Complete analysis result for one collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionAnalysis {
    /// Run metadata.
    pub metadata: AnalysisMetadata,

    /// One record per ranked section, rank ascending.
    pub extracted_sections: Vec<ExtractedSectionRecord>,

    /// One record per refined section, rank ascending.
    pub subsection_analysis: Vec<SubsectionRecord>,
}

/// Metadata record emitted with every collection result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Challenge identifier from the descriptor.
    pub challenge_id: String,

    /// Test case name from the descriptor.
    pub test_case_name: String,

    /// Filenames of documents that were actually processed.
    pub input_documents: Vec<String>,

    /// Persona role.
    pub persona: String,

    /// Task text.
    pub job_to_be_done: String,

    /// Wall-clock timestamp of the run ("%Y-%m-%d %H:%M:%S", UTC).
    pub processing_timestamp: String,

    /// Number of sections that entered ranking.
    pub total_sections_analyzed: usize,

    /// Number of documents that survived extraction.
    pub total_documents_processed: usize,
}

/// One extracted-section output record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSectionRecord {
    /// Source document filename.
    pub document: String,

    /// Inferred section title.
    pub section_title: String,

    /// 1-based collection-wide rank.
    pub importance_rank: u32,

    /// Page number of the section heading.
    pub page_number: u32,

    /// Relevance score, rounded to 3 decimals on output.
    #[serde(serialize_with = "round3")]
    pub relevance_score: f32,

    /// Plain truncation of the raw section body.
    pub content_preview: String,
}

impl ExtractedSectionRecord {
    /// Build a record from a ranked section, truncating the preview to
    /// `preview_len` characters.
    pub fn from_ranked(ranked: &RankedSection, preview_len: usize) -> Self {
        let section = ranked.section();
        let body = section.body.as_str();
        let content_preview = if body.chars().count() > preview_len {
            format!("{}...", text::truncate_chars(body, preview_len))
        } else {
            body.to_string()
        };
        Self {
            document: section.document.clone(),
            section_title: section.title.clone(),
            importance_rank: ranked.importance_rank,
            page_number: section.page,
            relevance_score: ranked.scored.relevance_score,
            content_preview,
        }
    }
}

/// One subsection-analysis output record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionRecord {
    /// Source document filename.
    pub document: String,

    /// Persona-biased bounded excerpt.
    pub refined_text: String,

    /// Page number of the section heading.
    pub page_number: u32,

    /// Relevance score, rounded to 3 decimals on output.
    #[serde(serialize_with = "round3")]
    pub relevance_score: f32,

    /// Salient terms, deduplicated and capped.
    pub key_concepts: Vec<String>,
}

impl SubsectionRecord {
    /// Build a record from a refined section.
    pub fn from_refined(refined: &RefinedSection) -> Self {
        let section = refined.ranked.section();
        Self {
            document: section.document.clone(),
            refined_text: refined.refined_text.clone(),
            page_number: section.page,
            relevance_score: refined.ranked.scored.relevance_score,
            key_concepts: refined.key_concepts.clone(),
        }
    }
}

/// Serialize a score rounded to three decimal places.
fn round3<S: Serializer>(score: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    let rounded = (f64::from(*score) * 1000.0).round() / 1000.0;
    serializer.serialize_f64(rounded)
}

/// Serialize an analysis to JSON.
pub fn to_json(analysis: &CollectionAnalysis, format: JsonFormat) -> crate::Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(analysis),
        JsonFormat::Compact => serde_json::to_string(analysis),
    };
    result.map_err(|e| crate::Error::Serialize(e.to_string()))
}

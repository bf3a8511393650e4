//! Collection analysis pipeline.
//!
//! Per-document work (extract → detect → score) is independent and fans
//! out across rayon workers; collecting the results is the single
//! synchronization barrier per collection, after which ranking and
//! refinement run serially. Collections themselves share no mutable
//! state and may be processed concurrently by the caller.

use crate::error::{Error, Result};
use crate::extract::TextExtractor;
use crate::model::{CollectionDescriptor, Document, RankedSection, RefinedSection, ScoredSection};
use crate::output::{
    AnalysisMetadata, CollectionAnalysis, ExtractedSectionRecord, SubsectionRecord,
};
use crate::persona::PersonaRegistry;
use crate::rank::{rank_sections, RankOptions};
use crate::refine::{refine, RefineOptions};
use crate::score::{RelevanceScorer, ScoreWeights};
use crate::segment::{detect_sections, HeadingHeuristics, RuleBasedHeuristics, SegmentOptions};
use chrono::Utc;
use log::{debug, info, warn};
use rayon::prelude::*;

/// Timestamp format for output metadata.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Relevance factor weights.
    pub weights: ScoreWeights,

    /// Section detection thresholds.
    pub segment: SegmentOptions,

    /// Ranking configuration.
    pub rank: RankOptions,

    /// Refinement configuration.
    pub refine: RefineOptions,

    /// Content preview length in characters.
    pub preview_len: usize,

    /// Process documents on parallel workers.
    pub parallel: bool,

    /// Record per-factor score breakdowns.
    pub record_breakdown: bool,

    /// Persona category table.
    pub registry: PersonaRegistry,
}

impl AnalyzeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the section detection thresholds.
    pub fn with_segment(mut self, segment: SegmentOptions) -> Self {
        self.segment = segment;
        self
    }

    /// Set the ranking configuration.
    pub fn with_rank(mut self, rank: RankOptions) -> Self {
        self.rank = rank;
        self
    }

    /// Keep at most `k` ranked sections.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.rank.top_k = Some(k);
        self
    }

    /// Set the refinement configuration.
    pub fn with_refine(mut self, refine: RefineOptions) -> Self {
        self.refine = refine;
        self
    }

    /// Set the refined text character budget.
    pub fn with_char_budget(mut self, budget: usize) -> Self {
        self.refine.char_budget = budget;
        self
    }

    /// Set the content preview length.
    pub fn with_preview_len(mut self, len: usize) -> Self {
        self.preview_len = len;
        self
    }

    /// Disable parallel document processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable per-factor score breakdowns.
    pub fn with_breakdown(mut self, record: bool) -> Self {
        self.record_breakdown = record;
        self
    }

    /// Replace the persona category table.
    pub fn with_registry(mut self, registry: PersonaRegistry) -> Self {
        self.registry = registry;
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            segment: SegmentOptions::default(),
            rank: RankOptions::default(),
            refine: RefineOptions::default(),
            preview_len: 200,
            parallel: true,
            record_breakdown: false,
            registry: PersonaRegistry::with_builtin(),
        }
    }
}

/// Intermediate result of the per-collection pipeline, before output
/// records are built.
pub struct CollectionRun {
    /// Ranked sections, rank ascending.
    pub ranked: Vec<RankedSection>,

    /// Refined top sections, rank ascending.
    pub refined: Vec<RefinedSection>,

    /// Filenames that survived extraction, in descriptor order.
    pub processed: Vec<String>,

    /// Sections admitted to ranking before truncation.
    pub sections_analyzed: usize,
}

/// Analyze a collection with the default rule-based heading heuristics.
pub fn analyze_collection(
    descriptor: &CollectionDescriptor,
    extractor: &dyn TextExtractor,
    options: &AnalyzeOptions,
) -> Result<CollectionAnalysis> {
    let heuristics = RuleBasedHeuristics::new(options.segment.clone());
    analyze_collection_with_heuristics(descriptor, extractor, &heuristics, options)
}

/// Analyze a collection with caller-supplied heading heuristics.
pub fn analyze_collection_with_heuristics(
    descriptor: &CollectionDescriptor,
    extractor: &dyn TextExtractor,
    heuristics: &dyn HeadingHeuristics,
    options: &AnalyzeOptions,
) -> Result<CollectionAnalysis> {
    let run = run_collection(descriptor, extractor, heuristics, options)?;
    Ok(build_analysis(descriptor, &run, options))
}

/// Run the pipeline stages for one collection.
///
/// Returns the ranked and refined sections; output-record assembly is
/// separate so streaming callers can emit records incrementally.
pub fn run_collection(
    descriptor: &CollectionDescriptor,
    extractor: &dyn TextExtractor,
    heuristics: &dyn HeadingHeuristics,
    options: &AnalyzeOptions,
) -> Result<CollectionRun> {
    let profile = options
        .registry
        .build_profile(&descriptor.persona.role, &descriptor.job_to_be_done.task);
    info!(
        "analyzing '{}': {} documents, persona '{}', weights {:?}",
        descriptor.label(),
        descriptor.documents.len(),
        profile.role,
        options.weights
    );

    let scorer =
        RelevanceScorer::new(&profile, options.weights).with_breakdown(options.record_breakdown);

    // Fan out per document; `doc_index` is captured from descriptor order
    // before the fan-out so ranking stays deterministic regardless of
    // worker interleaving.
    let process = |(doc_index, entry): (usize, &crate::model::DocumentEntry)| {
        match extractor.extract(&entry.filename) {
            Ok(blocks) => {
                let document = Document::new(&entry.filename, &entry.title, blocks);
                let sections = detect_sections(&document, doc_index, heuristics, &options.segment);
                debug!(
                    "'{}': {} candidate sections",
                    entry.filename,
                    sections.len()
                );
                let scored: Vec<ScoredSection> =
                    sections.into_iter().map(|s| scorer.score(s)).collect();
                Some((entry.filename.clone(), scored))
            }
            Err(e) => {
                warn!("skipping '{}' (stage: extraction): {e}", entry.filename);
                None
            }
        }
    };

    let entries: Vec<(usize, &crate::model::DocumentEntry)> =
        descriptor.documents.iter().enumerate().collect();
    // Collecting here is the per-collection synchronization barrier.
    let per_document: Vec<Option<(String, Vec<ScoredSection>)>> = if options.parallel {
        entries.into_par_iter().map(process).collect()
    } else {
        entries.into_iter().map(process).collect()
    };

    let mut processed = Vec::new();
    let mut pooled: Vec<ScoredSection> = Vec::new();
    for item in per_document.into_iter().flatten() {
        processed.push(item.0);
        pooled.extend(item.1);
    }

    if processed.is_empty() {
        return Err(Error::EmptyCollection(descriptor.label().to_string()));
    }

    let sections_analyzed = pooled
        .iter()
        .filter(|s| s.relevance_score >= options.rank.min_score)
        .count();
    let ranked = rank_sections(pooled, &options.rank);

    let refined: Vec<RefinedSection> = ranked
        .iter()
        .take(options.refine.refine_top)
        .cloned()
        .map(|r| refine(r, &profile, &options.refine))
        .collect();

    info!(
        "'{}': {} sections ranked, {} refined",
        descriptor.label(),
        ranked.len(),
        refined.len()
    );

    Ok(CollectionRun {
        ranked,
        refined,
        processed,
        sections_analyzed,
    })
}

/// Assemble the serializable analysis from a completed run.
pub fn build_analysis(
    descriptor: &CollectionDescriptor,
    run: &CollectionRun,
    options: &AnalyzeOptions,
) -> CollectionAnalysis {
    CollectionAnalysis {
        metadata: AnalysisMetadata {
            challenge_id: descriptor.challenge_info.challenge_id.clone(),
            test_case_name: descriptor.challenge_info.test_case_name.clone(),
            input_documents: run.processed.clone(),
            persona: descriptor.persona.role.clone(),
            job_to_be_done: descriptor.job_to_be_done.task.clone(),
            processing_timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
            total_sections_analyzed: run.sections_analyzed,
            total_documents_processed: run.processed.len(),
        },
        extracted_sections: run
            .ranked
            .iter()
            .map(|r| ExtractedSectionRecord::from_ranked(r, options.preview_len))
            .collect(),
        subsection_analysis: run.refined.iter().map(SubsectionRecord::from_refined).collect(),
    }
}

/// Analyze several independent collections, absorbing per-collection
/// failures so one bad collection never blocks the rest.
pub fn analyze_collections<'a, I>(
    collections: I,
    options: &AnalyzeOptions,
) -> Vec<Result<CollectionAnalysis>>
where
    I: IntoIterator<Item = (&'a CollectionDescriptor, &'a dyn TextExtractor)>,
{
    collections
        .into_iter()
        .map(|(descriptor, extractor)| {
            analyze_collection(descriptor, extractor, options).map_err(|e| {
                warn!("collection '{}' failed: {e}", descriptor.label());
                e
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::InMemoryExtractor;
    use crate::model::{ChallengeInfo, DocumentEntry, JobToBeDone, Persona, TextBlock};

    fn descriptor(documents: Vec<DocumentEntry>) -> CollectionDescriptor {
        CollectionDescriptor {
            challenge_info: ChallengeInfo {
                challenge_id: "round_1b_002".to_string(),
                test_case_name: "travel_test".to_string(),
                description: None,
            },
            documents,
            persona: Persona {
                role: "Travel Planner".to_string(),
            },
            job_to_be_done: JobToBeDone {
                task: "Plan a four day trip for college friends".to_string(),
            },
        }
    }

    fn entry(filename: &str, title: &str) -> DocumentEntry {
        DocumentEntry {
            filename: filename.to_string(),
            title: title.to_string(),
        }
    }

    fn guide_blocks() -> Vec<TextBlock> {
        vec![
            TextBlock::new(1, "Top Attractions"),
            TextBlock::new(1, "The old town and the harbor fort are the main attractions for a day trip."),
            TextBlock::new(2, "Budget Tips"),
            TextBlock::new(2, "Book accommodation early to keep the budget low; transport passes help."),
        ]
    }

    #[test]
    fn test_analyze_collection_end_to_end() {
        let extractor = InMemoryExtractor::new().with_document("guide.pdf", guide_blocks());
        let descriptor = descriptor(vec![entry("guide.pdf", "City Guide")]);
        let options = AnalyzeOptions::default().sequential();

        let analysis = analyze_collection(&descriptor, &extractor, &options).unwrap();
        assert_eq!(analysis.metadata.total_documents_processed, 1);
        assert_eq!(analysis.metadata.persona, "Travel Planner");
        assert!(!analysis.extracted_sections.is_empty());

        // ranks contiguous from 1
        let ranks: Vec<u32> = analysis
            .extracted_sections
            .iter()
            .map(|s| s.importance_rank)
            .collect();
        let expected: Vec<u32> = (1..=ranks.len() as u32).collect();
        assert_eq!(ranks, expected);
    }

    #[test]
    fn test_failed_extraction_skips_document_only() {
        let extractor = InMemoryExtractor::new().with_document("guide.pdf", guide_blocks());
        let descriptor = descriptor(vec![
            entry("broken.pdf", "Broken"),
            entry("guide.pdf", "City Guide"),
        ]);
        let options = AnalyzeOptions::default().sequential();

        let analysis = analyze_collection(&descriptor, &extractor, &options).unwrap();
        assert_eq!(analysis.metadata.total_documents_processed, 1);
        assert_eq!(analysis.metadata.input_documents, vec!["guide.pdf"]);
        assert!(analysis
            .extracted_sections
            .iter()
            .all(|s| s.document == "guide.pdf"));
    }

    #[test]
    fn test_all_documents_failing_is_collection_error() {
        let extractor = InMemoryExtractor::new();
        let descriptor = descriptor(vec![entry("a.pdf", "A"), entry("b.pdf", "B")]);
        let options = AnalyzeOptions::default();

        let err = analyze_collection(&descriptor, &extractor, &options).unwrap_err();
        assert!(matches!(err, Error::EmptyCollection(_)));
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let extractor = InMemoryExtractor::new()
            .with_document("guide.pdf", guide_blocks())
            .with_document(
                "food.pdf",
                vec![
                    TextBlock::new(1, "Local Restaurants"),
                    TextBlock::new(1, "The harbor restaurants fit most budgets and take bookings."),
                ],
            );
        let descriptor = descriptor(vec![
            entry("guide.pdf", "City Guide"),
            entry("food.pdf", "Food Guide"),
        ]);

        let parallel =
            analyze_collection(&descriptor, &extractor, &AnalyzeOptions::default()).unwrap();
        let sequential = analyze_collection(
            &descriptor,
            &extractor,
            &AnalyzeOptions::default().sequential(),
        )
        .unwrap();

        let titles = |a: &CollectionAnalysis| -> Vec<String> {
            a.extracted_sections
                .iter()
                .map(|s| format!("{}:{}:{}", s.importance_rank, s.document, s.section_title))
                .collect()
        };
        assert_eq!(titles(&parallel), titles(&sequential));
    }

    #[test]
    fn test_analyze_collections_absorbs_failures() {
        let good_extractor = InMemoryExtractor::new().with_document("guide.pdf", guide_blocks());
        let bad_extractor = InMemoryExtractor::new();
        let good = descriptor(vec![entry("guide.pdf", "City Guide")]);
        let bad = descriptor(vec![entry("guide.pdf", "City Guide")]);
        let options = AnalyzeOptions::default().sequential();

        let results = analyze_collections(
            vec![
                (&bad, &bad_extractor as &dyn TextExtractor),
                (&good, &good_extractor as &dyn TextExtractor),
            ],
            &options,
        );
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
    }
}

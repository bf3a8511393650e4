//! Streaming analysis interface.
//!
//! Emits [`AnalysisEvent`]s over a channel as the pipeline progresses, so
//! callers can surface per-document progress and consume ranked records
//! incrementally instead of waiting for the whole collection result.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use docsieve::{analyze_collection_streaming, AnalysisEvent, AnalyzeOptions};
//! use docsieve::extract::PlainTextExtractor;
//! use docsieve::model::CollectionDescriptor;
//!
//! fn main() -> docsieve::Result<()> {
//!     let json = std::fs::read_to_string("challenge1b_input.json")?;
//!     let descriptor = CollectionDescriptor::from_json(&json)?;
//!     let extractor = Arc::new(PlainTextExtractor::new("texts"));
//!
//!     let events = analyze_collection_streaming(descriptor, extractor, AnalyzeOptions::default());
//!     for event in events {
//!         match event {
//!             AnalysisEvent::SectionRanked(record) => {
//!                 println!("#{} {}", record.importance_rank, record.section_title);
//!             }
//!             AnalysisEvent::Failed { error } => eprintln!("failed: {error}"),
//!             _ => {}
//!         }
//!     }
//!     Ok(())
//! }
//! ```

use crate::extract::TextExtractor;
use crate::model::CollectionDescriptor;
use crate::output::{AnalysisMetadata, ExtractedSectionRecord, SubsectionRecord};
use crate::pipeline::{build_analysis, run_collection, AnalyzeOptions};
use crate::segment::RuleBasedHeuristics;
use crossbeam_channel::{unbounded, Receiver};
use std::sync::Arc;
use std::thread;

/// Events emitted during streaming analysis.
#[derive(Debug, Clone)]
pub enum AnalysisEvent {
    /// Analysis of a collection has started.
    Start {
        /// Collection label.
        label: String,
        /// Number of documents in the descriptor.
        documents: usize,
    },

    /// A ranked section record, emitted in rank order.
    SectionRanked(ExtractedSectionRecord),

    /// A refined section record, emitted in rank order.
    SectionRefined(SubsectionRecord),

    /// Analysis completed; carries the final metadata.
    End {
        /// Run metadata.
        metadata: AnalysisMetadata,
    },

    /// Analysis failed for the whole collection.
    Failed {
        /// Error description.
        error: String,
    },
}

impl AnalysisEvent {
    /// Check whether this is a terminal event.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisEvent::End { .. } | AnalysisEvent::Failed { .. })
    }
}

/// Analyze a collection on a background thread, streaming events as the
/// ranking and refinement stages produce records.
///
/// The receiver ends after a terminal event ([`AnalysisEvent::End`] or
/// [`AnalysisEvent::Failed`]).
pub fn analyze_collection_streaming(
    descriptor: CollectionDescriptor,
    extractor: Arc<dyn TextExtractor>,
    options: AnalyzeOptions,
) -> Receiver<AnalysisEvent> {
    let (sender, receiver) = unbounded();

    thread::spawn(move || {
        let _ = sender.send(AnalysisEvent::Start {
            label: descriptor.label().to_string(),
            documents: descriptor.documents.len(),
        });

        let heuristics = RuleBasedHeuristics::new(options.segment.clone());
        match run_collection(&descriptor, extractor.as_ref(), &heuristics, &options) {
            Ok(run) => {
                for ranked in &run.ranked {
                    let record = ExtractedSectionRecord::from_ranked(ranked, options.preview_len);
                    if sender.send(AnalysisEvent::SectionRanked(record)).is_err() {
                        return; // receiver dropped
                    }
                }
                for refined in &run.refined {
                    let record = SubsectionRecord::from_refined(refined);
                    if sender.send(AnalysisEvent::SectionRefined(record)).is_err() {
                        return;
                    }
                }
                let analysis = build_analysis(&descriptor, &run, &options);
                let _ = sender.send(AnalysisEvent::End {
                    metadata: analysis.metadata,
                });
            }
            Err(e) => {
                let _ = sender.send(AnalysisEvent::Failed {
                    error: e.to_string(),
                });
            }
        }
    });

    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::InMemoryExtractor;
    use crate::model::{ChallengeInfo, DocumentEntry, JobToBeDone, Persona, TextBlock};

    fn descriptor() -> CollectionDescriptor {
        CollectionDescriptor {
            challenge_info: ChallengeInfo::default(),
            documents: vec![DocumentEntry {
                filename: "guide.pdf".to_string(),
                title: "City Guide".to_string(),
            }],
            persona: Persona {
                role: "Travel Planner".to_string(),
            },
            job_to_be_done: JobToBeDone {
                task: "Plan a weekend trip".to_string(),
            },
        }
    }

    #[test]
    fn test_streaming_emits_ranked_then_terminal() {
        let extractor = Arc::new(InMemoryExtractor::new().with_document(
            "guide.pdf",
            vec![
                TextBlock::new(1, "Top Attractions"),
                TextBlock::new(1, "Plan the trip around the harbor attractions and budget hotels."),
            ],
        ));

        let events: Vec<AnalysisEvent> =
            analyze_collection_streaming(descriptor(), extractor, AnalyzeOptions::default())
                .iter()
                .collect();

        assert!(matches!(events.first(), Some(AnalysisEvent::Start { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, AnalysisEvent::SectionRanked(_))));
        assert!(events.last().unwrap().is_terminal());
        assert!(matches!(events.last(), Some(AnalysisEvent::End { .. })));

        // ranked records arrive in rank order
        let ranks: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                AnalysisEvent::SectionRanked(r) => Some(r.importance_rank),
                _ => None,
            })
            .collect();
        let expected: Vec<u32> = (1..=ranks.len() as u32).collect();
        assert_eq!(ranks, expected);
    }

    #[test]
    fn test_streaming_reports_collection_failure() {
        let extractor = Arc::new(InMemoryExtractor::new());
        let events: Vec<AnalysisEvent> =
            analyze_collection_streaming(descriptor(), extractor, AnalyzeOptions::default())
                .iter()
                .collect();

        assert!(matches!(events.last(), Some(AnalysisEvent::Failed { .. })));
    }
}

//! Template generation
//!
//! Runs the entity pass, then the predicate pass on its output. Batches keep
//! per-question state; one failing question is recorded and skipped.

use crate::config::{ChunkerConfig, Vocabulary};
use crate::entity::EntityExtractor;
use crate::error::ChunkerError;
use crate::predicate::PredicateExtractor;
use crate::types::{BatchMetadata, BatchResult, TemplateFailure, TemplatedQuestion};
use rayon::prelude::*;
use rqcnl_domain::{ChunkMapping, DocumentParser};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Orchestrates the entity and predicate passes
pub struct TemplateGenerator<P> {
    vocabulary: Arc<Vocabulary>,
    entity: EntityExtractor<P>,
    predicate: PredicateExtractor<P>,
}

impl<P> TemplateGenerator<P>
where
    P: DocumentParser,
    P::Error: Display,
{
    /// Create a generator owning `parser`
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or its prefix pattern
    /// file cannot be read
    pub fn new(parser: P, config: &ChunkerConfig) -> Result<Self, ChunkerError> {
        let vocabulary = Arc::new(Vocabulary::from_config(config)?);
        Ok(Self::with_shared(Arc::new(parser), vocabulary))
    }

    /// Create a generator over an already shared parser and vocabulary
    pub fn with_shared(parser: Arc<P>, vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            entity: EntityExtractor::new(Arc::clone(&parser), Arc::clone(&vocabulary)),
            predicate: PredicateExtractor::new(parser, Arc::clone(&vocabulary)),
            vocabulary,
        }
    }

    /// Compiled vocabulary in use
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Template `question` without recording a mapping
    pub fn template(&self, question: &str) -> Result<String, ChunkerError> {
        let entities = self.entity.extract(question)?;
        self.predicate.extract(&entities)
    }

    /// Template `question` and record what every placeholder replaced
    pub fn template_with_mapping(&self, question: &str) -> Result<TemplatedQuestion, ChunkerError> {
        let mut mapping = ChunkMapping::new();
        let entities = self.entity.extract_with_mapping(question, &mut mapping)?;
        let template = self.predicate.extract_with_mapping(&entities, &mut mapping)?;
        debug!("{:?} -> {:?}", question, template);

        Ok(TemplatedQuestion {
            question: question.to_string(),
            template,
            mapping,
        })
    }

    /// Template every question in order on the calling thread
    pub fn generate_batch<S: AsRef<str>>(&self, questions: &[S]) -> BatchResult {
        info!("Templating {} questions", questions.len());
        let start_time = Instant::now();
        let outcomes = questions
            .iter()
            .map(|question| self.template_with_mapping(question.as_ref()))
            .collect();
        summarize(questions, outcomes, false, start_time)
    }
}

impl<P> TemplateGenerator<P>
where
    P: DocumentParser + Send + Sync,
    P::Error: Display,
{
    /// Template every question on the rayon pool
    ///
    /// Results come back in input order.
    pub fn generate_batch_parallel<S: AsRef<str> + Sync>(&self, questions: &[S]) -> BatchResult {
        info!(
            "Templating {} questions on {} threads",
            questions.len(),
            rayon::current_num_threads()
        );
        let start_time = Instant::now();
        let outcomes = questions
            .par_iter()
            .map(|question| self.template_with_mapping(question.as_ref()))
            .collect();
        summarize(questions, outcomes, true, start_time)
    }
}

fn summarize<S: AsRef<str>>(
    questions: &[S],
    outcomes: Vec<Result<TemplatedQuestion, ChunkerError>>,
    parallel: bool,
    start_time: Instant,
) -> BatchResult {
    let mut templated = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();

    for (index, (question, outcome)) in questions.iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(result) => templated.push(result),
            Err(e) => {
                warn!("Failed to template question {} {:?}: {}", index, question.as_ref(), e);
                failures.push(TemplateFailure {
                    index,
                    question: question.as_ref().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let metadata = BatchMetadata {
        total: questions.len(),
        succeeded: templated.len(),
        failed: failures.len(),
        parallel,
        processing_time_ms: start_time.elapsed().as_millis() as u64,
    };
    info!(
        "Templated {}/{} questions in {}ms",
        metadata.succeeded, metadata.total, metadata.processing_time_ms
    );

    BatchResult {
        templated,
        failures,
        metadata,
    }
}

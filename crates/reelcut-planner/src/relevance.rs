//! Relevance scoring collaborators.
//!
//! The planner only needs one score per segment. Where those scores come
//! from (a similarity service, an LLM, a hand-tuned heuristic) is decided
//! by whoever constructs the planner.

use thiserror::Error;

use reelcut_models::Segment;

/// Errors reported by scoring collaborators.
#[derive(Debug, Error)]
pub enum RelevanceError {
    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("At least one topic is required")]
    NoTopics,

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl RelevanceError {
    /// Create an embedding failure error.
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }
}

/// Produces one relevance score per segment, higher is more relevant.
pub trait RelevanceProvider: Send + Sync {
    fn score(&self, segments: &[Segment]) -> Result<Vec<f64>, RelevanceError>;

    /// Short name for logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Scores computed upstream and handed over as-is.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedScores {
    scores: Vec<f64>,
}

impl PrecomputedScores {
    pub fn new(scores: Vec<f64>) -> Self {
        Self { scores }
    }
}

impl RelevanceProvider for PrecomputedScores {
    /// Returns the stored scores; the window expander checks their count.
    fn score(&self, _segments: &[Segment]) -> Result<Vec<f64>, RelevanceError> {
        Ok(self.scores.clone())
    }

    fn name(&self) -> &'static str {
        "precomputed"
    }
}

/// Text embedding model boundary.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, RelevanceError>;
}

/// Scores each segment by its cosine similarity to the closest topic.
pub struct TopicSimilarity<E> {
    embedder: E,
    topics: Vec<Vec<f32>>,
}

impl<E: Embedder> TopicSimilarity<E> {
    /// Embed the topics once up front.
    pub fn new<S: AsRef<str>>(embedder: E, topics: &[S]) -> Result<Self, RelevanceError> {
        if topics.is_empty() {
            return Err(RelevanceError::NoTopics);
        }
        let topics = topics
            .iter()
            .map(|topic| embedder.embed(topic.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { embedder, topics })
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }
}

impl<E: Embedder> RelevanceProvider for TopicSimilarity<E> {
    fn score(&self, segments: &[Segment]) -> Result<Vec<f64>, RelevanceError> {
        segments
            .iter()
            .map(|segment| {
                let embedding = self.embedder.embed(&segment.text)?;
                self.topics.iter().try_fold(f64::NEG_INFINITY, |best, topic| {
                    if topic.len() != embedding.len() {
                        return Err(RelevanceError::DimensionMismatch {
                            expected: topic.len(),
                            actual: embedding.len(),
                        });
                    }
                    Ok(best.max(cosine_similarity(topic, &embedding)))
                })
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "topic_similarity"
    }
}

/// Cosine similarity over the common prefix of `a` and `b`; zero vectors
/// score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

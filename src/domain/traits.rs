// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The two collaborators the pipeline consumes without caring
// how they are implemented:
//
//   CorpusSource      → ImdbLoader reads pos/neg directories
//   EmbeddingProvider → GloveEmbeddings reads a GloVe .txt file
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::review::Review;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Anything that can produce the labelled reviews of a named split.
pub trait CorpusSource {
    /// Load every review of `split` (e.g. "train", "dev").
    fn load_split(&self, split: &str) -> Result<Vec<Review>>;
}

// ─── EmbeddingProvider ────────────────────────────────────────────────────────
/// A lookup from token string to a fixed-length vector.
///
/// Misses return `None`; the vocabulary builder substitutes the
/// zero vector for them.
pub trait EmbeddingProvider {
    /// Length of every vector returned by `lookup`
    fn dim(&self) -> usize;

    fn lookup(&self, token: &str) -> Option<&[f32]>;
}

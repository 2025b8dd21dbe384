// ============================================================
// Layer 4 — Vocabulary & Embedding Table
// ============================================================
// Turns raw review text into integer ids and binds each id to
// a pretrained embedding row.
//
// Index layout:
//   0      <unk>   zero vector, every unseen word maps here
//   1      <pad>   zero vector, fills short sequences
//   2..    observed tokens, most frequent first, ties sorted
//          alphabetically
//
// Tokens are lower-cased and split on whitespace. The full
// vocabulary is kept (no frequency cutoff). A token missing
// from the embedding provider gets the zero vector.
//
// The label vocabulary is the same idea applied to labels:
// label strings get 0-based ids in order of first appearance.
// Training targets do NOT use these ids, see Sentiment::target.
//
// Reference: Mikolov et al. (2013), Pennington et al. (2014) GloVe

use anyhow::Result;
use std::collections::{HashMap, HashSet};
use tokenizers::Tokenizer;

use crate::domain::review::Review;
use crate::domain::traits::EmbeddingProvider;
use crate::infra::word_tokenizer::{build_word_level, encode_ids, PAD_TOKEN, UNK_TOKEN};

pub const UNK_INDEX: u32 = 0;
pub const PAD_INDEX: u32 = 1;

/// Whitespace-split a review and lower-case each character on its own,
/// matching the tokenizer's `Lowercase` normalizer. `str::to_lowercase`
/// would turn a word-final 'Σ' into 'ς' where the tokenizer gives 'σ'.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|word| word.chars().flat_map(char::to_lowercase).collect())
}

// ─── EmbeddingTable ───────────────────────────────────────────────────────────
/// Row-major `[vocab_len, dim]` matrix of embedding vectors.
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    dim:  usize,
    rows: Vec<f32>,
}

impl EmbeddingTable {
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.rows.len() / self.dim.max(1)
    }

    /// Embedding of `index`; out-of-range ids fall back to `<unk>`.
    pub fn row(&self, index: u32) -> &[f32] {
        let index = if (index as usize) < self.len() { index as usize } else { UNK_INDEX as usize };
        &self.rows[index * self.dim..(index + 1) * self.dim]
    }

    /// Index of the row closest to `vector` (squared Euclidean
    /// distance, ties go to the lower index).
    pub fn nearest(&self, vector: &[f32]) -> Option<u32> {
        if vector.len() != self.dim {
            return None;
        }
        let mut best: Option<(u32, f32)> = None;
        for (i, row) in self.rows.chunks_exact(self.dim).enumerate() {
            let dist: f32 = row.iter().zip(vector).map(|(a, b)| (a - b) * (a - b)).sum();
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((i as u32, dist));
            }
        }
        best.map(|(i, _)| i)
    }
}

// ─── VocabularyBuilder ────────────────────────────────────────────────────────
/// Counts tokens across one or more review collections.
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    freq: HashMap<String, usize>,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_reviews(mut self, reviews: &[Review]) -> Self {
        for review in reviews {
            for token in tokenize(&review.text) {
                *self.freq.entry(token).or_insert(0) += 1;
            }
        }
        self
    }

    /// Distinct observed tokens, e.g. to filter an embedding file.
    pub fn token_set(&self) -> HashSet<String> {
        self.freq.keys().cloned().collect()
    }

    /// Freeze the vocabulary and bind embeddings from `provider`.
    pub fn build(self, provider: &dyn EmbeddingProvider) -> Result<Vocabulary> {
        let mut words: Vec<(String, usize)> = self
            .freq
            .into_iter()
            .filter(|(w, _)| w != UNK_TOKEN && w != PAD_TOKEN)
            .collect();
        // Most frequent first, alphabetical among equals
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut tokens = Vec::with_capacity(words.len() + 2);
        tokens.push(UNK_TOKEN.to_string());
        tokens.push(PAD_TOKEN.to_string());
        tokens.extend(words.into_iter().map(|(w, _)| w));

        let dim      = provider.dim();
        let mut rows = vec![0.0f32; tokens.len() * dim];
        let mut covered = 0usize;
        for (i, token) in tokens.iter().enumerate().skip(2) {
            if let Some(vector) = provider.lookup(token) {
                anyhow::ensure!(
                    vector.len() == dim,
                    "embedding for '{token}' has {} values, expected {dim}",
                    vector.len()
                );
                rows[i * dim..(i + 1) * dim].copy_from_slice(vector);
                covered += 1;
            }
        }

        let tokenizer = build_word_level(&tokens)?;
        let index     = tokens.iter().enumerate().map(|(i, t)| (t.clone(), i as u32)).collect();

        tracing::info!(
            "Vocabulary: {} tokens, {} with pretrained vectors ({:.1}%)",
            tokens.len(),
            covered,
            100.0 * covered as f64 / tokens.len().saturating_sub(2).max(1) as f64
        );

        Ok(Vocabulary {
            tokens,
            index,
            tokenizer,
            embeddings: EmbeddingTable { dim, rows },
            covered,
        })
    }
}

// ─── Vocabulary ───────────────────────────────────────────────────────────────
/// Bidirectional token ↔ id map plus the bound embedding table.
/// Read-only once built.
pub struct Vocabulary {
    tokens:     Vec<String>,
    index:      HashMap<String, u32>,
    tokenizer:  Tokenizer,
    embeddings: EmbeddingTable,
    covered:    usize,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Id of `token`, `<unk>` when it was never observed.
    pub fn id(&self, token: &str) -> u32 {
        self.index.get(token).copied().unwrap_or(UNK_INDEX)
    }

    pub fn token(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    /// Encode raw review text into vocabulary ids.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        encode_ids(&self.tokenizer, text)
    }

    pub fn embeddings(&self) -> &EmbeddingTable {
        &self.embeddings
    }

    pub fn into_embeddings(self) -> EmbeddingTable {
        self.embeddings
    }

    /// Number of observed tokens that received a pretrained vector.
    pub fn covered(&self) -> usize {
        self.covered
    }

    /// Token whose embedding is nearest to `vector`.
    pub fn nearest_token(&self, vector: &[f32]) -> Option<&str> {
        self.embeddings.nearest(vector).and_then(|id| self.token(id))
    }
}

// ─── LabelVocabulary ──────────────────────────────────────────────────────────
/// Label string → id, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct LabelVocabulary {
    labels: Vec<String>,
}

impl LabelVocabulary {
    pub fn build<'a>(collections: impl IntoIterator<Item = &'a [Review]>) -> Self {
        let mut labels: Vec<String> = Vec::new();
        for reviews in collections {
            for review in reviews {
                let name = review.sentiment.dir_name();
                if !labels.iter().any(|l| l == name) {
                    labels.push(name.to_string());
                }
            }
        }
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Both classes were observed.
    pub fn is_binary(&self) -> bool {
        self.labels.len() == 2
    }
}

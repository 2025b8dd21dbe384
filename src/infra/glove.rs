// ============================================================
// Layer 6 — GloVe Embedding Reader
// ============================================================
// Reads pretrained vectors in the plain-text GloVe format:
//
//   the 0.418 0.24968 -0.41242 0.1217 ...
//   ,   0.013441 0.23682 -0.16899 ...
//
// One token per line followed by `dim` space-separated floats.
// Some GloVe releases contain tokens with embedded spaces, so
// the LAST `dim` fields are the vector and everything before
// them is the token.
//
// Only tokens present in the corpus vocabulary need to be kept;
// `load` accepts an optional filter set for that.
//
// Reference: Pennington et al. (2014) GloVe
//            https://nlp.stanford.edu/projects/glove/

use anyhow::{Context, Result};
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::domain::error::SentimentError;
use crate::domain::traits::EmbeddingProvider;

/// In-memory token → vector map with a fixed dimension.
#[derive(Debug, Clone)]
pub struct GloveEmbeddings {
    dim:     usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl GloveEmbeddings {
    /// Parse a GloVe text file, keeping only tokens in `keep` when given.
    pub fn load(path: impl AsRef<Path>, dim: usize, keep: Option<&HashSet<String>>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Cannot open embedding file '{}'", path.display()))?;

        let mut vectors = HashMap::new();
        for (n, line) in BufReader::new(file).lines().enumerate() {
            let line = line
                .with_context(|| format!("Cannot read line {} of '{}'", n + 1, path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            let (token, vector) = parse_line(&line, dim, n + 1)?;
            if keep.map_or(true, |k| k.contains(token)) {
                vectors.insert(token.to_string(), vector);
            }
        }

        tracing::info!(
            "Loaded {} embedding vectors (dim={}) from '{}'",
            vectors.len(),
            dim,
            path.display()
        );
        Ok(Self { dim, vectors })
    }

    /// Build from explicit pairs; every vector must have length `dim`.
    pub fn from_pairs(dim: usize, pairs: Vec<(String, Vec<f32>)>) -> Result<Self> {
        let mut vectors = HashMap::with_capacity(pairs.len());
        for (i, (token, vector)) in pairs.into_iter().enumerate() {
            if vector.len() != dim {
                return Err(SentimentError::InvalidEmbedding {
                    line:   i + 1,
                    reason: format!("'{token}' has {} values, expected {dim}", vector.len()),
                }
                .into());
            }
            vectors.insert(token, vector);
        }
        Ok(Self { dim, vectors })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl EmbeddingProvider for GloveEmbeddings {
    fn dim(&self) -> usize {
        self.dim
    }

    fn lookup(&self, token: &str) -> Option<&[f32]> {
        self.vectors.get(token).map(Vec::as_slice)
    }
}

fn parse_line(line: &str, dim: usize, line_no: usize) -> Result<(&str, Vec<f32>), SentimentError> {
    let fields: Vec<&str> = line.trim_end().split(' ').collect();
    if fields.len() < dim + 1 {
        return Err(SentimentError::InvalidEmbedding {
            line:   line_no,
            reason: format!("expected a token and {dim} values, found {} fields", fields.len()),
        });
    }

    let split  = fields.len() - dim;
    let vector = fields[split..]
        .iter()
        .map(|v| v.parse::<f32>())
        .collect::<Result<Vec<f32>, _>>()
        .map_err(|e| SentimentError::InvalidEmbedding {
            line:   line_no,
            reason: e.to_string(),
        })?;

    // Token is the prefix before the vector, spaces included
    let token_len = fields[..split].iter().map(|f| f.len()).sum::<usize>() + split - 1;
    Ok((&line[..token_len], vector))
}

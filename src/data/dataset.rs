use anyhow::Result;
use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::vocabulary::Vocabulary;
use crate::domain::review::Review;

/// One encoded review: vocabulary ids plus the 0/1 target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSample {
    pub token_ids: Vec<u32>,
    pub target:    u8,
}

impl ReviewSample {
    pub fn len(&self) -> usize {
        self.token_ids.len()
    }
}

pub struct ReviewDataset {
    name:    String,
    samples: Vec<ReviewSample>,
}

impl ReviewDataset {
    pub fn new(name: impl Into<String>, samples: Vec<ReviewSample>) -> Self {
        Self { name: name.into(), samples }
    }

    /// Encode every review of a split with the shared vocabulary.
    pub fn encode(name: impl Into<String>, reviews: &[Review], vocab: &Vocabulary) -> Result<Self> {
        let samples = reviews
            .iter()
            .map(|r| {
                Ok(ReviewSample {
                    token_ids: vocab.encode(&r.text)?,
                    target:    r.sentiment.target(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(name, samples))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Sequence length of sample `index` without cloning it.
    pub fn sequence_len(&self, index: usize) -> usize {
        self.samples.get(index).map_or(0, ReviewSample::len)
    }
}

impl Dataset<ReviewSample> for ReviewDataset {
    fn get(&self, index: usize) -> Option<ReviewSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

// ============================================================
// Layer 4 — Bucket Iterator
// ============================================================
// Feeds one epoch of batches to the training loop or evaluator.
//
// Per epoch:
//   1. Shuffle the example indices (seeded StdRng)
//   2. Cut them into pools of batch_size × pool_factor and sort
//      each pool by length, so neighbouring examples have
//      similar lengths and batches carry little padding
//   3. Chunk the result into batches of batch_size; only the
//      last one can be undersized (dropped if drop_last)
//   4. Shuffle the batch order
//   5. Hand each batch's samples to the Batcher, which sorts
//      within the batch and pads
//
// pool_factor = 1 gives plain shuffled batches.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            rand crate documentation

use burn::{
    data::{dataloader::batcher::Batcher, dataset::Dataset},
    prelude::*,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::data::batcher::{ReviewBatch, ReviewBatcher};
use crate::data::dataset::ReviewDataset;
use crate::domain::error::SentimentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IteratorConfig {
    pub batch_size:  usize,
    pub shuffle:     bool,
    pub drop_last:   bool,
    pub pool_factor: usize,
    pub seed:        u64,
}

impl Default for IteratorConfig {
    fn default() -> Self {
        Self {
            batch_size:  64,
            shuffle:     true,
            drop_last:   false,
            pool_factor: 100,
            seed:        42,
        }
    }
}

pub struct BucketIterator<B: Backend> {
    dataset: ReviewDataset,
    batcher: ReviewBatcher<B>,
    config:  IteratorConfig,
    rng:     StdRng,
}

impl<B: Backend> BucketIterator<B> {
    /// Fails with `EmptySplit` when the dataset has no samples.
    pub fn new(
        dataset: ReviewDataset,
        batcher: ReviewBatcher<B>,
        config:  IteratorConfig,
    ) -> Result<Self, SentimentError> {
        if dataset.is_empty() {
            return Err(SentimentError::EmptySplit(dataset.name().to_string()));
        }
        let config = IteratorConfig {
            batch_size:  config.batch_size.max(1),
            pool_factor: config.pool_factor.max(1),
            ..config
        };
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self { dataset, batcher, config, rng })
    }

    pub fn dataset(&self) -> &ReviewDataset {
        &self.dataset
    }

    /// Number of batches one epoch yields.
    pub fn num_batches(&self) -> usize {
        let n    = self.dataset.len();
        let full = n / self.config.batch_size;
        if self.config.drop_last || n % self.config.batch_size == 0 {
            full
        } else {
            full + 1
        }
    }

    /// Sample indices of each batch for the next epoch.
    pub fn plan_epoch(&mut self) -> Vec<Vec<usize>> {
        let IteratorConfig { batch_size, shuffle, drop_last, pool_factor, .. } = self.config;

        let mut order: Vec<usize> = (0..self.dataset.len()).collect();
        if shuffle {
            order.shuffle(&mut self.rng);
        }

        if pool_factor > 1 {
            for pool in order.chunks_mut(batch_size * pool_factor) {
                pool.sort_by_key(|&i| self.dataset.sequence_len(i));
            }
        }

        let mut batches: Vec<Vec<usize>> = order.chunks(batch_size).map(<[usize]>::to_vec).collect();
        if drop_last && batches.last().is_some_and(|b| b.len() < batch_size) {
            batches.pop();
        }
        if shuffle {
            batches.shuffle(&mut self.rng);
        }
        batches
    }

    /// Iterate one epoch of tensor batches.
    pub fn iter(&mut self) -> impl Iterator<Item = ReviewBatch<B>> + '_ {
        let plan = self.plan_epoch();
        let dataset = &self.dataset;
        let batcher = &self.batcher;
        plan.into_iter().map(move |indices| {
            let items = indices.into_iter().filter_map(|i| dataset.get(i)).collect();
            batcher.batch(items)
        })
    }
}

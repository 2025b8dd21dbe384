// ============================================================
// Layer 4 — Review Batcher
// ============================================================
// Implements Burn's Batcher trait to turn a Vec<ReviewSample>
// into model-ready tensors.
//
// How batching works here:
//   Input:  N samples with token sequences of different lengths
//   Output: ReviewBatch with
//             embeddings [N, L, D]  (L = longest sequence)
//             lengths    [N]        (true, unpadded lengths)
//             targets    [N]        (0 = neg, 1 = pos)
//
//   1. Sort samples by length, longest first
//   2. Look up each token id in the shared embedding table
//   3. Fill positions past a sequence's end with the <pad> row
//
// An empty review becomes a single <pad> step with length 1,
// so every sequence has a valid last timestep.
//
// Reference: Burn Book §4 (Batcher)

use std::sync::Arc;

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::ReviewSample;
use crate::data::vocabulary::{EmbeddingTable, PAD_INDEX};

// ─── ReviewBatch ──────────────────────────────────────────────────────────────
/// A padded batch of embedded reviews.
#[derive(Debug, Clone)]
pub struct ReviewBatch<B: Backend> {
    /// shape: [batch_size, max_len, embedding_dim]
    pub embeddings: Tensor<B, 3>,

    /// shape: [batch_size], non-increasing
    pub lengths: Tensor<B, 1, Int>,

    /// shape: [batch_size]
    pub targets: Tensor<B, 1, Int>,
}

impl<B: Backend> ReviewBatch<B> {
    pub fn size(&self) -> usize {
        self.targets.dims()[0]
    }
}

// ─── ReviewBatcher ────────────────────────────────────────────────────────────
/// Holds the target device and a read-only handle to the
/// embedding table shared by every batch of the run.
#[derive(Clone, Debug)]
pub struct ReviewBatcher<B: Backend> {
    pub device: B::Device,
    embeddings: Arc<EmbeddingTable>,
}

impl<B: Backend> ReviewBatcher<B> {
    pub fn new(embeddings: Arc<EmbeddingTable>, device: B::Device) -> Self {
        Self { device, embeddings }
    }
}

impl<B: Backend> Batcher<ReviewSample, ReviewBatch<B>> for ReviewBatcher<B> {
    fn batch(&self, mut items: Vec<ReviewSample>) -> ReviewBatch<B> {
        // Stable sort keeps equal-length samples in arrival order
        items.sort_by(|a, b| b.len().cmp(&a.len()));

        let batch_size = items.len();
        let dim        = self.embeddings.dim();
        let max_len    = items.iter().map(|s| s.len().max(1)).max().unwrap_or(1);

        let mut flat = Vec::with_capacity(batch_size * max_len * dim);
        for sample in &items {
            for t in 0..max_len {
                let id = sample.token_ids.get(t).copied().unwrap_or(PAD_INDEX);
                flat.extend_from_slice(self.embeddings.row(id));
            }
        }

        let lengths: Vec<i32> = items.iter().map(|s| s.len().max(1) as i32).collect();
        let targets: Vec<i32> = items.iter().map(|s| s.target as i32).collect();

        let embeddings = Tensor::<B, 3>::from_data(
            TensorData::new(flat, [batch_size, max_len, dim]),
            &self.device,
        );
        let lengths = Tensor::<B, 1, Int>::from_ints(lengths.as_slice(), &self.device);
        let targets = Tensor::<B, 1, Int>::from_ints(targets.as_slice(), &self.device);

        ReviewBatch { embeddings, lengths, targets }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocabulary::VocabularyBuilder;
    use crate::domain::review::{Review, Sentiment};
    use crate::infra::glove::GloveEmbeddings;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn table() -> Arc<EmbeddingTable> {
        let reviews = vec![Review::new("a.txt", "a b c", Sentiment::Positive)];
        let glove = GloveEmbeddings::from_pairs(
            2,
            vec![
                ("a".to_string(), vec![1.0, 1.0]),
                ("b".to_string(), vec![2.0, 2.0]),
                ("c".to_string(), vec![3.0, 3.0]),
            ],
        )
        .unwrap();
        let vocab = VocabularyBuilder::new().add_reviews(&reviews).build(&glove).unwrap();
        Arc::new(vocab.into_embeddings())
    }

    fn sample(ids: &[u32], target: u8) -> ReviewSample {
        ReviewSample { token_ids: ids.to_vec(), target }
    }

    fn ints(t: Tensor<TestBackend, 1, Int>) -> Vec<i64> {
        t.into_data().iter::<i64>().collect()
    }

    #[test]
    fn test_sorted_by_length_descending() {
        let batcher = ReviewBatcher::<TestBackend>::new(table(), Default::default());
        let batch = batcher.batch(vec![
            sample(&[2], 0),
            sample(&[2, 3, 4], 1),
            sample(&[3, 4], 0),
        ]);

        let lengths = ints(batch.lengths);
        assert_eq!(lengths, vec![3, 2, 1]);
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
        // Targets follow their samples through the sort
        assert_eq!(ints(batch.targets), vec![1, 0, 0]);
    }

    #[test]
    fn test_padded_width_is_max_length() {
        let batcher = ReviewBatcher::<TestBackend>::new(table(), Default::default());
        let batch = batcher.batch(vec![sample(&[2, 3], 1), sample(&[4, 2, 3, 4, 2], 0)]);
        assert_eq!(batch.embeddings.dims(), [2, 5, 2]);
        assert_eq!(batch.size(), 2);
    }

    #[test]
    fn test_padding_is_zero_and_values_are_embedded() {
        let batcher = ReviewBatcher::<TestBackend>::new(table(), Default::default());
        let table   = table();
        let batch = batcher.batch(vec![sample(&[2, 3], 1), sample(&[4], 0)]);
        let values: Vec<f32> = batch.embeddings.into_data().iter::<f32>().collect();

        let mut expected = Vec::new();
        expected.extend_from_slice(table.row(2));
        expected.extend_from_slice(table.row(3));
        expected.extend_from_slice(table.row(4));
        expected.extend_from_slice(&[0.0, 0.0]);
        assert_eq!(values, expected);
    }

    #[test]
    fn test_empty_review_has_length_one() {
        let batcher = ReviewBatcher::<TestBackend>::new(table(), Default::default());
        let batch = batcher.batch(vec![sample(&[], 1)]);
        assert_eq!(batch.embeddings.dims(), [1, 1, 2]);
        assert_eq!(ints(batch.lengths), vec![1]);
    }
}

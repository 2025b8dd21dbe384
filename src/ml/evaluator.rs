// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Runs the trained model over the evaluation split and counts
// a 2×2 confusion matrix.
//
// The model passed in is `model.valid()`: the inner backend
// has no autodiff, so no gradients are tracked and parameters
// cannot change.
//
// prediction = round(sigmoid(logit)), with an exact 0.5 rounded
// half-to-even down to 0, i.e. positive iff probability > 0.5.

use burn::{prelude::*, tensor::activation::sigmoid};

use crate::data::iterator::BucketIterator;
use crate::domain::metrics::ConfusionMatrix;
use crate::ml::model::SentimentClassifier;

/// Confusion matrix of `model` over one pass of `batches`.
pub fn evaluate<B, M>(model: &M, batches: &mut BucketIterator<B>) -> ConfusionMatrix
where
    B: Backend,
    M: SentimentClassifier<B>,
{
    let mut matrix = ConfusionMatrix::default();

    for batch in batches.iter() {
        let logits = model.score(batch.embeddings, batch.lengths);
        let predictions: Vec<i64> = sigmoid(logits)
            .greater_elem(0.5)
            .int()
            .into_data()
            .iter::<i64>()
            .collect();
        let targets: Vec<i64> = batch.targets.into_data().iter::<i64>().collect();

        matrix += tally(&predictions, &targets);
    }

    tracing::info!(
        "Evaluated {} reviews: TP={} TN={} FP={} FN={}",
        matrix.total(),
        matrix.true_positive,
        matrix.true_negative,
        matrix.false_positive,
        matrix.false_negative
    );
    matrix
}

/// Confusion matrix of 0/1 predictions against 0/1 targets.
pub fn tally(predictions: &[i64], targets: &[i64]) -> ConfusionMatrix {
    let mut matrix = ConfusionMatrix::default();
    for (&p, &t) in predictions.iter().zip(targets) {
        matrix.record(p == 1, t == 1);
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        batcher::ReviewBatcher,
        dataset::{ReviewDataset, ReviewSample},
        iterator::IteratorConfig,
        vocabulary::VocabularyBuilder,
    };
    use crate::infra::glove::GloveEmbeddings;
    use crate::ml::model::LstmClassifierConfig;
    use burn::backend::NdArray;
    use std::sync::Arc;

    type TestBackend = NdArray;

    /// Scores every review with a fixed logit.
    #[derive(Module, Clone, Debug)]
    struct ConstantModel {
        logit: f32,
    }

    impl<B: Backend> SentimentClassifier<B> for ConstantModel {
        fn score(&self, embeddings: Tensor<B, 3>, _lengths: Tensor<B, 1, Int>) -> Tensor<B, 1> {
            let [batch_size, _, _] = embeddings.dims();
            Tensor::full([batch_size], self.logit, &embeddings.device())
        }
    }

    fn iterator(targets: &[u8]) -> BucketIterator<TestBackend> {
        let glove = GloveEmbeddings::from_pairs(3, Vec::new()).unwrap();
        let table = Arc::new(VocabularyBuilder::new().build(&glove).unwrap().into_embeddings());
        let samples = targets
            .iter()
            .map(|&target| ReviewSample { token_ids: vec![0, 0], target })
            .collect();
        let config = IteratorConfig { batch_size: 3, ..IteratorConfig::default() };
        BucketIterator::new(
            ReviewDataset::new("dev", samples),
            ReviewBatcher::new(table, Default::default()),
            config,
        )
        .unwrap()
    }

    #[test]
    fn test_tally() {
        let m = tally(&[1, 1, 0, 0, 1], &[1, 0, 0, 1, 1]);
        assert_eq!(m, ConfusionMatrix::new(2, 1, 1, 1));
    }

    #[test]
    fn test_all_positive_predictions() {
        let mut it = iterator(&[1, 1, 0, 1, 0, 0, 0]);
        let m = evaluate::<TestBackend, _>(&ConstantModel { logit: 2.0 }, &mut it);
        assert_eq!(m, ConfusionMatrix::new(3, 0, 4, 0));
        assert_eq!(m.mcc(), None);
    }

    #[test]
    fn test_half_probability_rounds_to_negative() {
        let mut it = iterator(&[1, 0]);
        let m = evaluate::<TestBackend, _>(&ConstantModel { logit: 0.0 }, &mut it);
        assert_eq!(m, ConfusionMatrix::new(0, 1, 0, 1));
    }

    #[test]
    fn test_counts_every_review_once() {
        let targets: Vec<u8> = (0..10).map(|i| (i % 2) as u8).collect();
        let mut it = iterator(&targets);
        let model = LstmClassifierConfig::new()
            .with_embedding_dim(3)
            .init::<TestBackend>(&Default::default());
        let m = evaluate(&model, &mut it);
        assert_eq!(m.total(), 10);
        assert_eq!(m.true_positive + m.false_negative, 5);
    }
}

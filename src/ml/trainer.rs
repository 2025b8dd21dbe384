// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Per epoch, per batch:
//   forward  → logits = model.score(embeddings, lengths)
//   loss     → binary cross-entropy on logits vs 0/1 targets
//   backward → gradients of the loss
//   step     → one Adam update
//
// Burn produces fresh gradients on every backward pass, so
// there is no explicit "zero grad" step.
//
// The running loss is printed every `log_every` batches for
// monitoring only. A NaN/Inf loss stops the run immediately.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    module::AutodiffModule,
    nn::loss::BinaryCrossEntropyLossConfig,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::data::iterator::BucketIterator;
use crate::domain::error::SentimentError;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::SentimentClassifier;

#[derive(Debug, Clone, Copy)]
pub struct TrainingOptions {
    pub epochs:    usize,
    pub lr:        f64,
    pub log_every: usize,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self { epochs: 10, lr: 1e-3, log_every: 32 }
    }
}

/// Per-epoch losses of a finished run.
#[derive(Debug, Clone, Default)]
pub struct TrainingSummary {
    pub epochs: Vec<EpochMetrics>,
}

impl TrainingSummary {
    pub fn final_loss(&self) -> Option<f64> {
        self.epochs.last().map(|m| m.mean_loss)
    }

    pub fn total_batches(&self) -> usize {
        self.epochs.iter().map(|m| m.batches).sum()
    }
}

/// Train `model` for `options.epochs` epochs and return it with its loss history.
pub fn train<B, M>(
    mut model: M,
    batches:   &mut BucketIterator<B>,
    options:   &TrainingOptions,
    metrics:   Option<&MetricsLogger>,
) -> Result<(M, TrainingSummary)>
where
    B: AutodiffBackend,
    M: AutodiffModule<B> + SentimentClassifier<B>,
{
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let mut optim = AdamConfig::new().with_epsilon(1e-8).init::<B, M>();
    let log_every = options.log_every.max(1);

    let mut summary = TrainingSummary::default();

    for epoch in 1..=options.epochs {
        tracing::debug!(
            "Epoch {} start ({} samples in {} batches)",
            epoch,
            batches.dataset().sample_count(),
            batches.num_batches()
        );

        let mut running_loss = 0.0f64;
        let mut epoch_loss   = 0.0f64;
        let mut epoch_batches = 0usize;

        for (i, batch) in batches.iter().enumerate() {
            let logits = model.score(batch.embeddings, batch.lengths);

            let bce = BinaryCrossEntropyLossConfig::new()
                .with_logits(true)
                .init(&logits.device());
            let loss = bce.forward(logits, batch.targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            ensure_finite(loss_val, epoch, i + 1)?;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(options.lr, model, grads);

            running_loss  += loss_val;
            epoch_loss    += loss_val;
            epoch_batches += 1;

            if i % log_every == log_every - 1 {
                println!(
                    "Epoch: {:>2}, Batch: {:>4}, Loss: {:.3}",
                    epoch,
                    i + 1,
                    running_loss / log_every as f64
                );
                running_loss = 0.0;
            }
        }

        let mean_loss = if epoch_batches > 0 { epoch_loss / epoch_batches as f64 } else { f64::NAN };
        let record    = EpochMetrics::new(epoch, mean_loss, epoch_batches);
        tracing::info!("Epoch {} done: mean_loss={:.4} over {} batches", epoch, mean_loss, epoch_batches);

        if let Some(logger) = metrics {
            logger.log(&record)?;
        }
        summary.epochs.push(record);
    }

    tracing::info!("Training complete!");
    Ok((model, summary))
}

/// Reject NaN or infinite losses.
pub fn ensure_finite(loss: f64, epoch: usize, batch: usize) -> Result<(), SentimentError> {
    if loss.is_finite() {
        Ok(())
    } else {
        Err(SentimentError::NumericalInstability { epoch, batch, loss })
    }
}

// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full pipeline in order:
//
//   Step 1: Load train and eval splits     (Layer 4 - data)
//   Step 2: Build the vocabulary           (Layer 4 - data)
//   Step 3: Load GloVe vectors             (Layer 6 - infra)
//   Step 4: Encode both splits             (Layer 4 - data)
//   Step 5: Save config                    (Layer 6 - infra)
//   Step 6: Pick backend and architecture  (Layer 5 - ml)
//   Step 7: Train, then evaluate           (Layer 5 - ml)
//
// Backend and model are chosen once here. Everything below
// this point is generic and monomorphized per combination.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{Context, Result};
use burn::{
    backend::{ndarray::NdArrayDevice, wgpu::WgpuDevice, Autodiff, NdArray, Wgpu},
    module::AutodiffModule,
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::data::{
    batcher::ReviewBatcher,
    dataset::ReviewDataset,
    iterator::{BucketIterator, IteratorConfig},
    loader::ImdbLoader,
    vocabulary::{EmbeddingTable, LabelVocabulary, Vocabulary, VocabularyBuilder},
};
use crate::domain::{error::SentimentError, metrics::EvaluationReport, review::Review};
use crate::infra::{glove::GloveEmbeddings, metrics::MetricsLogger};
use crate::ml::{
    evaluator::evaluate,
    model::{CnnClassifierConfig, LstmClassifierConfig, ModelKind, SentimentClassifier},
    trainer::{train, TrainingOptions},
};

/// Tensor backend the run executes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Cpu,
    Wgpu,
}

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything a run needs. Serialisable so it can be written
// next to the metrics of the run it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_dir:      PathBuf,
    pub embeddings:    PathBuf,
    pub train_split:   String,
    pub eval_split:    String,
    pub model:         ModelKind,
    pub device:        DeviceKind,
    pub batch_size:    usize,
    pub epochs:        usize,
    pub lr:            f64,
    pub embedding_dim: usize,
    pub seed:          u64,
    pub pool_factor:   usize,
    pub drop_last:     bool,
    pub log_every:     usize,
    pub metrics_dir:   Option<PathBuf>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_dir:      PathBuf::from("data"),
            embeddings:    PathBuf::from("data/glove.6B.50d.txt"),
            train_split:   "train".to_string(),
            eval_split:    "dev".to_string(),
            model:         ModelKind::Lstm,
            device:        DeviceKind::Cpu,
            batch_size:    64,
            epochs:        10,
            lr:            1e-3,
            embedding_dim: 50,
            seed:          42,
            pool_factor:   100,
            drop_last:     false,
            log_every:     32,
            metrics_dir:   None,
        }
    }
}

impl TrainConfig {
    fn train_iterator_config(&self) -> IteratorConfig {
        IteratorConfig {
            batch_size:  self.batch_size,
            shuffle:     true,
            drop_last:   self.drop_last,
            pool_factor: self.pool_factor,
            seed:        self.seed,
        }
    }

    /// Every eval review is scored, whatever `drop_last` says.
    fn eval_iterator_config(&self) -> IteratorConfig {
        IteratorConfig {
            shuffle:   false,
            drop_last: false,
            ..self.train_iterator_config()
        }
    }

    fn training_options(&self) -> TrainingOptions {
        TrainingOptions { epochs: self.epochs, lr: self.lr, log_every: self.log_every }
    }
}

// ─── Corpus preparation ───────────────────────────────────────────────────────

/// Both splits plus the vocabulary built over them.
pub struct PreparedCorpus {
    pub train:  Vec<Review>,
    pub eval:   Vec<Review>,
    pub labels: LabelVocabulary,
    pub vocab:  Vocabulary,
}

/// Load both splits and build a vocabulary with GloVe vectors.
///
/// Only vectors for tokens that occur in the corpus are kept in
/// memory.
pub fn prepare_corpus(
    data_dir:      &Path,
    embeddings:    &Path,
    train_split:   &str,
    eval_split:    &str,
    embedding_dim: usize,
) -> Result<PreparedCorpus> {
    tracing::info!("Loading IMDB splits from '{}'", data_dir.display());
    let loader = ImdbLoader::new(data_dir);
    let mut splits = loader.load_splits(&[train_split, eval_split])?.into_iter();
    let (_, train) = splits.next().context("Train split was not loaded")?;
    let (_, eval)  = splits.next().context("Eval split was not loaded")?;
    tracing::info!("Loaded {} train and {} eval reviews", train.len(), eval.len());

    let labels = LabelVocabulary::build([train.as_slice(), eval.as_slice()]);
    if !labels.is_binary() {
        return Err(SentimentError::IncompleteLabels(labels.labels().to_vec()).into());
    }

    let builder = VocabularyBuilder::new().add_reviews(&train).add_reviews(&eval);
    let wanted  = builder.token_set();
    let glove   = GloveEmbeddings::load(embeddings, embedding_dim, Some(&wanted))
        .with_context(|| format!("Failed to load embeddings from '{}'", embeddings.display()))?;
    if glove.is_empty() {
        tracing::warn!("No corpus token has a vector in '{}'", embeddings.display());
    }
    let vocab = builder.build(&glove)?;

    Ok(PreparedCorpus { train, eval, labels, vocab })
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full pipeline and return the evaluation report.
    pub fn execute(&self) -> Result<EvaluationReport> {
        let cfg = &self.config;

        let corpus = prepare_corpus(
            &cfg.data_dir,
            &cfg.embeddings,
            &cfg.train_split,
            &cfg.eval_split,
            cfg.embedding_dim,
        )?;

        let train_set = ReviewDataset::encode(cfg.train_split.as_str(), &corpus.train, &corpus.vocab)?;
        let eval_set  = ReviewDataset::encode(cfg.eval_split.as_str(), &corpus.eval, &corpus.vocab)?;
        let table     = Arc::new(corpus.vocab.into_embeddings());

        let metrics = match &cfg.metrics_dir {
            Some(dir) => {
                let logger = MetricsLogger::new(dir)?;
                logger.save_config(cfg)?;
                Some(logger)
            }
            None => None,
        };

        tracing::info!("Training {:?} on {:?}", cfg.model, cfg.device);
        let report = match cfg.device {
            DeviceKind::Cpu => run_on::<Autodiff<NdArray>>(
                cfg, train_set, eval_set, table, metrics.as_ref(), NdArrayDevice::Cpu,
            )?,
            DeviceKind::Wgpu => run_on::<Autodiff<Wgpu>>(
                cfg, train_set, eval_set, table, metrics.as_ref(), WgpuDevice::default(),
            )?,
        };

        if let Some(logger) = &metrics {
            logger.save_evaluation(&report)?;
        }
        Ok(report)
    }
}

/// Dispatch on the architecture for one backend.
fn run_on<B: AutodiffBackend>(
    cfg:       &TrainConfig,
    train_set: ReviewDataset,
    eval_set:  ReviewDataset,
    table:     Arc<EmbeddingTable>,
    metrics:   Option<&MetricsLogger>,
    device:    B::Device,
) -> Result<EvaluationReport> {
    B::seed(cfg.seed);

    let mut train_it = BucketIterator::<B>::new(
        train_set,
        ReviewBatcher::new(table.clone(), device.clone()),
        cfg.train_iterator_config(),
    )?;
    let mut eval_it = BucketIterator::<B::InnerBackend>::new(
        eval_set,
        ReviewBatcher::new(table, device.clone()),
        cfg.eval_iterator_config(),
    )?;

    match cfg.model {
        ModelKind::Lstm => {
            let model = LstmClassifierConfig::new()
                .with_embedding_dim(cfg.embedding_dim)
                .init::<B>(&device);
            fit_and_evaluate(model, &mut train_it, &mut eval_it, cfg, metrics)
        }
        ModelKind::Cnn => {
            let model = CnnClassifierConfig::new()
                .with_channels(cfg.embedding_dim)
                .init::<B>(&device);
            fit_and_evaluate(model, &mut train_it, &mut eval_it, cfg, metrics)
        }
    }
}

fn fit_and_evaluate<B, M>(
    model:    M,
    train_it: &mut BucketIterator<B>,
    eval_it:  &mut BucketIterator<B::InnerBackend>,
    cfg:      &TrainConfig,
    metrics:  Option<&MetricsLogger>,
) -> Result<EvaluationReport>
where
    B: AutodiffBackend,
    M: AutodiffModule<B> + SentimentClassifier<B>,
    M::InnerModule: SentimentClassifier<B::InnerBackend>,
{
    tracing::info!("Model has {} parameters", model.num_params());

    let (model, summary) = train(model, train_it, &cfg.training_options(), metrics)?;
    if let Some(loss) = summary.final_loss() {
        tracing::info!("Final epoch mean loss: {:.4}", loss);
    }

    let matrix = evaluate(&model.valid(), eval_it);
    Ok(EvaluationReport::from(matrix))
}

// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `inspect`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for bad values
//   - type conversion (string → usize, f64, enums)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::{
    inspect_use_case::InspectConfig,
    train_use_case::{DeviceKind, TrainConfig},
};
use crate::ml::model::ModelKind;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a sentiment classifier and evaluate it
    Train(TrainArgs),

    /// Report corpus and vocabulary statistics without training
    Inspect(InspectArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelArg {
    Lstm,
    Cnn,
}

impl From<ModelArg> for ModelKind {
    fn from(m: ModelArg) -> Self {
        match m {
            ModelArg::Lstm => ModelKind::Lstm,
            ModelArg::Cnn  => ModelKind::Cnn,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceArg {
    Cpu,
    Wgpu,
}

impl From<DeviceArg> for DeviceKind {
    fn from(d: DeviceArg) -> Self {
        match d {
            DeviceArg::Cpu  => DeviceKind::Cpu,
            DeviceArg::Wgpu => DeviceKind::Wgpu,
        }
    }
}

/// Where the corpus and the word vectors live.
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Root containing <split>/pos and <split>/neg directories
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// GloVe text file, one token and its vector per line
    #[arg(long, default_value = "data/glove.6B.50d.txt")]
    pub embeddings: PathBuf,

    #[arg(long, default_value = "train")]
    pub train_split: String,

    /// Split the trained model is evaluated on
    #[arg(long, default_value = "dev")]
    pub eval_split: String,

    /// Length of every vector in the embeddings file
    #[arg(long, default_value_t = 50)]
    pub embedding_dim: usize,
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[arg(long, value_enum, default_value_t = ModelArg::Lstm)]
    pub model: ModelArg,

    #[arg(long, value_enum, default_value_t = DeviceArg::Cpu)]
    pub device: DeviceArg,

    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Number of full passes through the training split
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Seeds shuffling and weight initialisation
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Batches per length-sorted pool; 1 disables bucketing
    #[arg(long, default_value_t = 100)]
    pub pool_factor: usize,

    /// Skip the final undersized batch of each epoch
    #[arg(long)]
    pub drop_last: bool,

    /// Print the running loss every N batches
    #[arg(long, default_value_t = 32)]
    pub log_every: usize,

    /// Write metrics.csv, run_config.json and evaluation.json here
    #[arg(long)]
    pub metrics_dir: Option<PathBuf>,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_dir:      a.corpus.data_dir,
            embeddings:    a.corpus.embeddings,
            train_split:   a.corpus.train_split,
            eval_split:    a.corpus.eval_split,
            model:         a.model.into(),
            device:        a.device.into(),
            batch_size:    a.batch_size,
            epochs:        a.epochs,
            lr:            a.lr,
            embedding_dim: a.corpus.embedding_dim,
            seed:          a.seed,
            pool_factor:   a.pool_factor,
            drop_last:     a.drop_last,
            log_every:     a.log_every,
            metrics_dir:   a.metrics_dir,
        }
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,
}

impl From<InspectArgs> for InspectConfig {
    fn from(a: InspectArgs) -> Self {
        InspectConfig {
            data_dir:      a.corpus.data_dir,
            embeddings:    a.corpus.embeddings,
            train_split:   a.corpus.train_split,
            eval_split:    a.corpus.eval_split,
            embedding_dim: a.corpus.embedding_dim,
        }
    }
}
